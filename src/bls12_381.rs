//! BLS12-381 curve.
//!
//! This module defines the configuration of the BLS12-381 curve, with
//! seed x = -0xd201000000010000:
//!
//!  - G1: y^2 = x^3 + 4 over Fp (381-bit p);
//!  - G2: y^2 = x^3 + 4*(1 + u) over Fp2 (M-twist);
//!  - GT: order-r subgroup of Fp12*, with r a 255-bit prime.
//!
//! Generators are the standard ones (as used in, e.g., the IETF BLS
//! signature draft). All operations of the pairing engine are
//! supported, including the cubical fixed-argument loop.

use crate::config::{CurveConfig, CurveFamily, CurveParams, TwistType};
use crate::error::Result;
use crate::pairing::PairingEngine;
use crate::point::{Affine, Jacobian};
use crate::tower;

pub use crate::field::Fp381 as Fp;

pub type Fp2 = tower::Fp2<Fp>;
pub type Fp12 = tower::Fp12<Fp>;
pub type G1Affine = Affine<Fp>;
pub type G2Affine = Affine<Fp2>;
pub type G1Jacobian = Jacobian<Fp>;
pub type G2Jacobian = Jacobian<Fp2>;
pub type Gt = Fp12;
pub type Engine = PairingEngine<Fp>;

/// Absolute value of the curve seed (the seed is negative).
pub const SEED: u64 = 0xD201000000010000;

/// Curve constant b (G1).
pub const B: Fp = Fp::w64be([0, 0, 0, 0, 0, 4]);

/// Twist constant b' = 4*(1 + u) (G2).
pub const B_TWIST: Fp2 = Fp2 { c0: B, c1: B };

/// Subgroup order r (little-endian 64-bit limbs).
pub const ORDER: [u64; 4] = [
    0xFFFFFFFF00000001, 0x53BDA402FFFE5BFE,
    0x3339D80809A1D805, 0x73EDA753299D7D48,
];

/// Conventional generator of G1.
pub const G1: G1Affine = Affine {
    x: Fp::w64be([
        0x17F1D3A73197D794, 0x2695638C4FA9AC0F, 0xC3688C4F9774B905,
        0xA14E3A3F171BAC58, 0x6C55E83FF97A1AEF, 0xFB3AF00ADB22C6BB,
    ]),
    y: Fp::w64be([
        0x08B3F481E3AAA0F1, 0xA09E30ED741D8AE4, 0xFCF5E095D5D00AF6,
        0x00DB18CB2C04B3ED, 0xD03CC744A2888AE4, 0x0CAA232946C5E7E1,
    ]),
};

/// Conventional generator of G2.
pub const G2: G2Affine = Affine {
    x: Fp2 {
        c0: Fp::w64be([
            0x024AA2B2F08F0A91, 0x260805272DC51051, 0xC6E47AD4FA403B02,
            0xB4510B647AE3D177, 0x0BAC0326A805BBEF, 0xD48056C8C121BDB8,
        ]),
        c1: Fp::w64be([
            0x13E02B6052719F60, 0x7DACD3A088274F65, 0x596BD0D09920B61A,
            0xB5DA61BBDC7F5049, 0x334CF11213945D57, 0xE5AC7D055D042B7E,
        ]),
    },
    y: Fp2 {
        c0: Fp::w64be([
            0x0CE5D527727D6E11, 0x8CC9CDC6DA2E351A, 0xADFD9BAA8CBDD3A7,
            0x6D429A695160D12C, 0x923AC9CC3BACA289, 0xE193548608B82801,
        ]),
        c1: Fp::w64be([
            0x0606C4A02EA734CC, 0x32ACD2B02BC28B99, 0xCB3E287E85A763AF,
            0x267492AB572E99AB, 0x3F370D275CEC1DA1, 0xAAA9075FF05F79BE,
        ]),
    },
};

/// Parameters of BLS12-381.
pub fn params() -> CurveParams<'static, Fp> {
    CurveParams {
        name: "BLS12-381",
        family: CurveFamily::Bls12 { seed: SEED, negative: true },
        twist: TwistType::M,
        b: B,
        b_twist: B_TWIST,
        g1: G1,
        g2: G2,
        order: &ORDER,
    }
}

/// Configuration of BLS12-381.
pub fn config() -> Result<CurveConfig<Fp>> {
    CurveConfig::new(params())
}

/// A pairing engine over BLS12-381, with default options.
pub fn engine() -> Result<Engine> {
    Ok(PairingEngine::new(config()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CurveConfig, CurveFamily};
    use crate::error::PairingError;

    #[test]
    fn generators() {
        let cfg = config().unwrap();
        assert!(G1.is_on_curve(&B));
        assert!(G2.is_on_curve(&B_TWIST));
        assert!(G1.is_in_subgroup(&ORDER));
        assert!(G2.is_in_subgroup(&ORDER));
        assert_eq!(cfg.loop_counter.len(), 64);
        assert_eq!(hex::encode(&G1.x.encode()[..4]), "bbc622db");
    }

    #[test]
    fn scalar_42() {
        let engine = engine().unwrap();
        let k = [42u64];
        let e1 = engine.pair(&G1.mul_vartime(&k), &G2).unwrap();
        let e2 = engine.pair(&G1, &G2.mul_vartime(&k)).unwrap();
        assert_eq!(hex::encode(e1.encode()), hex::encode(e2.encode()));
        assert!(e1 == engine.pair(&G1, &G2).unwrap().pow_vartime(&k));
        assert!(!e1.is_one());
    }

    #[test]
    fn bad_configs() {
        let mut p = params();
        p.family = CurveFamily::Bls12 { seed: SEED + 1, negative: true };
        assert_eq!(CurveConfig::new(p).unwrap_err(),
            PairingError::InvalidConfig("BLS12 seed must be even"));

        let mut p = params();
        p.b_twist = B_TWIST.mul2();
        assert!(CurveConfig::new(p).is_err());

        let mut p = params();
        p.g1 = Affine::new(G1.x, G1.x);
        assert_eq!(CurveConfig::new(p).unwrap_err(),
            PairingError::InvalidConfig("G1 generator not on curve"));

        let mut p = params();
        p.family = CurveFamily::Bls12 { seed: 0, negative: false };
        assert!(CurveConfig::new(p).is_err());

        let mut p = params();
        p.g2 = Affine::INFINITY;
        assert!(CurveConfig::new(p).is_err());
    }
}
