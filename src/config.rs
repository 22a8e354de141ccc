//! Curve configurations.
//!
//! A `CurveConfig` gathers everything the pairing engine needs to know
//! about a pairing-friendly curve with embedding degree 12: family and
//! seed, twist type, curve constants, generators, subgroup order, and
//! the values derived from them (Miller loop counter, Frobenius
//! constants). Configurations are explicit immutable values, built once
//! with `CurveConfig::new()`; the shipped curves are in the `bls12_381`
//! and `bn254` modules.

use log::debug;

use crate::error::{PairingError, Result};
use crate::field::PrimeField;
use crate::point::Affine;
use crate::tower::{Fp2, FrobeniusCoeffs};

/// Type of the sextic twist E': y^2 = x^3 + b' used for G2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TwistType {
    /// Multiplicative twist: b' = b*xi.
    M,
    /// Divisive twist: b' = b/xi.
    D,
}

/// Curve family, with the seed x that parameterizes the curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveFamily {
    /// BLS12 curves: p = (x-1)^2*(x^4-x^2+1)/3 + x, r = x^4 - x^2 + 1.
    /// The seed is |x|, with the sign held separately. It must be even.
    Bls12 { seed: u64, negative: bool },

    /// BN curves: p = 36x^4 + 36x^3 + 24x^2 + 6x + 1. Only non-negative
    /// seeds are supported.
    Bn { seed: u64 },
}

impl CurveFamily {

    /// Absolute value of the seed.
    pub fn seed(self) -> u64 {
        match self {
            CurveFamily::Bls12 { seed, .. } => seed,
            CurveFamily::Bn { seed } => seed,
        }
    }

    /// Whether the seed is negative.
    pub fn is_negative(self) -> bool {
        match self {
            CurveFamily::Bls12 { negative, .. } => negative,
            CurveFamily::Bn { .. } => false,
        }
    }

    /// Miller loop counter, as signed digits (least significant first):
    /// binary digits of |x| for BLS12, NAF of 6x+2 for BN.
    pub fn loop_counter(self) -> Vec<i8> {
        match self {
            CurveFamily::Bls12 { seed, .. } => {
                let n = 64 - seed.leading_zeros() as usize;
                (0..n).map(|i| ((seed >> i) & 1) as i8).collect()
            }
            CurveFamily::Bn { seed } => {
                let mut k = 6 * (seed as i128) + 2;
                let mut d = Vec::new();
                while k > 0 {
                    let z = if (k & 1) != 0 { 2 - (k & 3) } else { 0 };
                    k -= z;
                    d.push(z as i8);
                    k >>= 1;
                }
                d
            }
        }
    }
}

/// Input parameters for `CurveConfig::new()`.
#[derive(Clone, Copy, Debug)]
pub struct CurveParams<'a, F> {
    pub name: &'static str,
    pub family: CurveFamily,
    pub twist: TwistType,
    /// Constant b of the curve equation over Fp.
    pub b: F,
    /// Constant b' of the twist equation over Fp2.
    pub b_twist: Fp2<F>,
    pub g1: Affine<F>,
    pub g2: Affine<Fp2<F>>,
    /// Subgroup order r (little-endian 64-bit limbs).
    pub order: &'a [u64],
}

/// A complete curve configuration.
#[derive(Clone, Debug)]
pub struct CurveConfig<F> {
    pub name: &'static str,
    pub family: CurveFamily,
    pub twist: TwistType,
    pub loop_counter: Vec<i8>,
    pub b: F,
    pub b_twist: Fp2<F>,
    pub g1: Affine<F>,
    pub g2: Affine<Fp2<F>>,
    pub order: Vec<u64>,
    pub frobenius: FrobeniusCoeffs<F>,
}

impl<F: PrimeField> CurveConfig<F> {

    /// Build a configuration from its parameters. Derived values (loop
    /// counter, Frobenius constants) are computed here. The generators
    /// must be on their respective curves, the twist constant must match
    /// the twist type, and BLS12 seeds must be even.
    pub fn new(params: CurveParams<F>) -> Result<Self> {
        let family = params.family;
        if family.seed() == 0 {
            return Err(PairingError::InvalidConfig("zero seed"));
        }
        if let CurveFamily::Bls12 { seed, .. } = family {
            if (seed & 1) != 0 {
                return Err(PairingError::InvalidConfig("BLS12 seed must be even"));
            }
        }
        let xi = Fp2::<F>::xi();
        let b = Fp2::from_base(params.b);
        let expected = match params.twist {
            TwistType::M => b * xi,
            TwistType::D => b * xi.invert(),
        };
        if expected != params.b_twist {
            return Err(PairingError::InvalidConfig("twist constant does not match twist type"));
        }
        if params.g1.is_infinity() || !params.g1.is_on_curve(&params.b) {
            return Err(PairingError::InvalidConfig("G1 generator not on curve"));
        }
        if params.g2.is_infinity() || !params.g2.is_on_curve(&params.b_twist) {
            return Err(PairingError::InvalidConfig("G2 generator not on twist"));
        }
        if params.order.iter().all(|&w| w == 0) {
            return Err(PairingError::InvalidConfig("zero subgroup order"));
        }

        let loop_counter = family.loop_counter();
        let frobenius = FrobeniusCoeffs::new();
        debug!("curve config {}: {:?}, {:?}-twist, loop counter length {}",
            params.name, family, params.twist, loop_counter.len());

        Ok(Self {
            name: params.name,
            family,
            twist: params.twist,
            loop_counter,
            b: params.b,
            b_twist: params.b_twist,
            g1: params.g1,
            g2: params.g2,
            order: params.order.to_vec(),
            frobenius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::CurveFamily;

    #[test]
    fn loop_counters() {
        // BLS12-381: x = -0xd201000000010000
        let f = CurveFamily::Bls12 { seed: 0xd201000000010000, negative: true };
        let d = f.loop_counter();
        assert_eq!(d.len(), 64);
        assert_eq!(d.iter().filter(|&&z| z != 0).count(), 6);
        assert_eq!(d[63], 1);
        assert_eq!(d[16], 1);
        assert!(f.is_negative());

        // BN254: NAF(6x + 2), x = 4965661367192848881
        let f = CurveFamily::Bn { seed: 4965661367192848881 };
        let d = f.loop_counter();
        assert_eq!(d.len(), 66);
        assert_eq!(d[65], 1);
        let mut v = 0i128;
        for &z in d.iter().rev() {
            v = 2 * v + (z as i128);
        }
        assert_eq!(v, 6 * 4965661367192848881i128 + 2);
        for i in 1..d.len() {
            assert!(d[i] == 0 || d[i - 1] == 0);
        }
    }
}
