//! BN254 curve (also known as alt_bn128).
//!
//! This module defines the configuration of the BN254 curve, with seed
//! x = 4965661367192848881:
//!
//!  - G1: y^2 = x^3 + 3 over Fp (254-bit p), generator (1, 2);
//!  - G2: y^2 = x^3 + 3/(9 + u) over Fp2 (D-twist);
//!  - GT: order-r subgroup of Fp12*.
//!
//! The cubical fixed-argument loop is not available for this curve;
//! the affine line tables can be used instead.

use crate::config::{CurveConfig, CurveFamily, CurveParams, TwistType};
use crate::error::Result;
use crate::pairing::PairingEngine;
use crate::point::{Affine, Jacobian};
use crate::tower;

pub use crate::field::Fp254 as Fp;

pub type Fp2 = tower::Fp2<Fp>;
pub type Fp12 = tower::Fp12<Fp>;
pub type G1Affine = Affine<Fp>;
pub type G2Affine = Affine<Fp2>;
pub type G1Jacobian = Jacobian<Fp>;
pub type G2Jacobian = Jacobian<Fp2>;
pub type Gt = Fp12;
pub type Engine = PairingEngine<Fp>;

/// Curve seed.
pub const SEED: u64 = 4965661367192848881;

/// Curve constant b (G1).
pub const B: Fp = Fp::w64be([0, 0, 0, 3]);

/// Twist constant b' = 3/(9 + u) (G2).
pub const B_TWIST: Fp2 = Fp2 {
    c0: Fp::w64be([
        0x2B149D40CEB8AAAE, 0x81BE18991BE06AC3,
        0xB5B4C5E559DBEFA3, 0x3267E6DC24A138E5,
    ]),
    c1: Fp::w64be([
        0x009713B03AF0FED4, 0xCD2CAFADEED8FDF4,
        0xA74FA084E52D1852, 0xE4A2BD0685C315D2,
    ]),
};

/// Subgroup order r (little-endian 64-bit limbs).
pub const ORDER: [u64; 4] = [
    0x43E1F593F0000001, 0x2833E84879B97091,
    0xB85045B68181585D, 0x30644E72E131A029,
];

/// Conventional generator of G1.
pub const G1: G1Affine = Affine {
    x: Fp::w64be([0, 0, 0, 1]),
    y: Fp::w64be([0, 0, 0, 2]),
};

/// Conventional generator of G2.
pub const G2: G2Affine = Affine {
    x: Fp2 {
        c0: Fp::w64be([
            0x1800DEEF121F1E76, 0x426A00665E5C4479,
            0x674322D4F75EDADD, 0x46DEBD5CD992F6ED,
        ]),
        c1: Fp::w64be([
            0x198E9393920D483A, 0x7260BFB731FB5D25,
            0xF1AA493335A9E712, 0x97E485B7AEF312C2,
        ]),
    },
    y: Fp2 {
        c0: Fp::w64be([
            0x12C85EA5DB8C6DEB, 0x4AAB71808DCB408F,
            0xE3D1E7690C43D37B, 0x4CE6CC0166FA7DAA,
        ]),
        c1: Fp::w64be([
            0x090689D0585FF075, 0xEC9E99AD690C3395,
            0xBC4B313370B38EF3, 0x55ACDADCD122975B,
        ]),
    },
};

/// Parameters of BN254.
pub fn params() -> CurveParams<'static, Fp> {
    CurveParams {
        name: "BN254",
        family: CurveFamily::Bn { seed: SEED },
        twist: TwistType::D,
        b: B,
        b_twist: B_TWIST,
        g1: G1,
        g2: G2,
        order: &ORDER,
    }
}

/// Configuration of BN254.
pub fn config() -> Result<CurveConfig<Fp>> {
    CurveConfig::new(params())
}

/// A pairing engine over BN254, with default options.
pub fn engine() -> Result<Engine> {
    Ok(PairingEngine::new(config()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CurveConfig, TwistType};
    use crate::error::PairingError;

    #[test]
    fn generators() {
        let cfg = config().unwrap();
        assert!(G1.is_on_curve(&B));
        assert!(G2.is_on_curve(&B_TWIST));
        assert!(G2.is_in_subgroup(&ORDER));
        assert!(G1.is_in_subgroup(&ORDER));
        assert_eq!(cfg.loop_counter.len(), 66);
        // b' * xi = b
        assert!(B_TWIST * Fp2::xi() == Fp2::from_base(B));
    }

    #[test]
    fn scalar_42() {
        let engine = engine().unwrap();
        let k = [42u64];
        let e1 = engine.pair(&G1.mul_vartime(&k), &G2).unwrap();
        let e2 = engine.pair(&G1, &G2.mul_vartime(&k)).unwrap();
        assert_eq!(hex::encode(e1.encode()), hex::encode(e2.encode()));
        assert!(e1 == engine.pair(&G1, &G2).unwrap().pow_vartime(&k));

        // Same value through the line tables and the worker pipeline.
        let t = engine.precompute_lines(&G2);
        let e3 = engine.pair_lines(&[G1.mul_vartime(&k)], &[&t]).unwrap();
        assert!(e3 == e1);
        let e4 = engine.multi_pair(&[G1, G1], &[G2.mul_vartime(&[40]), G2.mul_vartime(&[2])])
            .unwrap();
        assert!(e4 == e1);
    }

    #[test]
    fn twist_mismatch() {
        let mut p = params();
        p.twist = TwistType::M;
        assert_eq!(CurveConfig::new(p).unwrap_err(),
            PairingError::InvalidConfig("twist constant does not match twist type"));
    }
}
