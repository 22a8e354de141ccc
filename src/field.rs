//! Finite fields.
//!
//! This module defines the two base fields used by the pairing-friendly
//! curves (`Fp381` for BLS12-381, `Fp254` for BN254), as specializations
//! of the backend Montgomery field macro. It also defines the `Field`
//! trait (common to base fields and all extension fields of the tower)
//! and the `PrimeField` trait, over which the tower and the pairing
//! engine are generic.

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use crate::RngCore;
use crate::backend::w64::gfgen::{define_gfgen, define_gfgen_tests};

/// Operations shared by all field types (base fields and extensions).
///
/// Usual operators are available on values and on references. Functions
/// `equals()` and `iszero()` follow the crate-wide convention of
/// returning 0xFFFFFFFF for "true" and 0x00000000 for "false".
pub trait Field:
    Copy + Debug + PartialEq + Eq + Send + Sync + 'static
    + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
    + Neg<Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + AddAssign + SubAssign + MulAssign
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
{
    const ZERO: Self;
    const ONE: Self;

    fn square(self) -> Self;
    fn mul2(self) -> Self;
    fn mul3(self) -> Self;
    fn half(self) -> Self;
    fn mul_small(self, k: u32) -> Self;

    /// Inverse of this element; zero is mapped to zero.
    fn invert(self) -> Self;

    fn equals(self, rhs: Self) -> u32;
    fn iszero(self) -> u32;

    /// Append the canonical encoding of this element to `out`.
    fn encode_into(self, out: &mut Vec<u8>);

    /// Get a uniformly random element.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self;

    /// Invert all elements of the slice in place, with a single
    /// inversion; zeros are left unchanged.
    fn batch_invert(xx: &mut [Self]) {
        let n = xx.len();
        if n == 0 {
            return;
        }
        let mut tt = Vec::with_capacity(n);
        let mut acc = Self::ONE;
        for x in xx.iter() {
            if x.iszero() == 0 {
                acc *= x;
            }
            tt.push(acc);
        }
        let mut k = acc.invert();
        for i in (0..n).rev() {
            let x = xx[i];
            if x.iszero() != 0 {
                continue;
            }
            let prev = if i == 0 { Self::ONE } else { tt[i - 1] };
            xx[i] = k * prev;
            k *= x;
        }
    }
}

/// A prime field that can serve as base of the pairing tower.
///
/// The tower is built as Fp2 = Fp[u]/(u^2 + 1), Fp6 = Fp2[v]/(v^3 - xi),
/// Fp12 = Fp6[w]/(w^2 - v), with xi = `XI_C0` + u.
pub trait PrimeField: Field {
    /// Real part of the cubic non-residue xi.
    const XI_C0: u32;

    /// Encoded element length (bytes).
    const ENC_LEN: usize;

    /// Field modulus (little-endian 64-bit limbs).
    fn modulus() -> &'static [u64];

    fn from_u64(x: u64) -> Self;
    fn from_i64(x: i64) -> Self;

    /// Exponentiation by a public exponent (little-endian 64-bit limbs).
    fn pow_vartime(self, e: &[u64]) -> Self;

    /// Decode a canonical encoding; `None` on failure.
    fn decode(buf: &[u8]) -> Option<Self>;
}

macro_rules! impl_prime_field { ($typename:ident, $xi:expr) => {
    impl PrimeField for $typename {
        const XI_C0: u32 = $xi;
        const ENC_LEN: usize = $typename::ENC_LEN;

        fn modulus() -> &'static [u64] {
            &$typename::MODULUS
        }

        fn from_u64(x: u64) -> Self {
            $typename::from_u64(x)
        }

        fn from_i64(x: i64) -> Self {
            $typename::from_i64(x)
        }

        fn pow_vartime(self, e: &[u64]) -> Self {
            $typename::pow_vartime(self, e)
        }

        fn decode(buf: &[u8]) -> Option<Self> {
            $typename::decode(buf)
        }
    }
} }

// Base field of BLS12-381:
// p = 0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab
pub struct Fp381Params;
impl Fp381Params {
    const MODULUS: [u64; 6] = [
        0xB9FEFFFFFFFFAAAB,
        0x1EABFFFEB153FFFF,
        0x6730D2A0F6B0F624,
        0x64774B84F38512BF,
        0x4B1BA7B6434BACD7,
        0x1A0111EA397FE69A,
    ];
}
define_gfgen!(Fp381, Fp381Params, fp381mod);
define_gfgen_tests!(Fp381, tests_fp381mod);
impl_prime_field!(Fp381, 1);

// Base field of BN254 (alt_bn128):
// p = 0x30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47
pub struct Fp254Params;
impl Fp254Params {
    const MODULUS: [u64; 4] = [
        0x3C208C16D87CFD47,
        0x97816A916871CA8D,
        0xB85045B68181585D,
        0x30644E72E131A029,
    ];
}
define_gfgen!(Fp254, Fp254Params, fp254mod);
define_gfgen_tests!(Fp254, tests_fp254mod);
impl_prime_field!(Fp254, 9);

#[cfg(test)]
mod tests {
    use super::{Field, PrimeField, Fp254, Fp381};

    fn check_traits<F: PrimeField>() {
        let two = F::from_u64(2);
        assert!(two.half() == F::ONE);
        assert!(F::from_i64(-2) + two == F::ZERO);
        assert!((two * two.invert()) == F::ONE);
        let mut xx = [F::ZERO, two, F::from_u64(7), F::ZERO];
        F::batch_invert(&mut xx);
        assert!(xx[0] == F::ZERO && xx[3] == F::ZERO);
        assert!(xx[1] * two == F::ONE);
        assert!(xx[2] * F::from_u64(7) == F::ONE);

        // Fermat: 3^(p-1) = 1
        let mut e = F::modulus().to_vec();
        e[0] -= 1;
        assert!(F::from_u64(3).pow_vartime(&e) == F::ONE);

        let mut buf = Vec::new();
        F::from_u64(0x1234).encode_into(&mut buf);
        assert_eq!(buf.len(), F::ENC_LEN);
        assert_eq!(&buf[..2], &[0x34, 0x12]);
        assert!(F::decode(&buf) == Some(F::from_u64(0x1234)));
    }

    #[test]
    fn prime_field_traits() {
        check_traits::<Fp381>();
        check_traits::<Fp254>();
        assert_eq!(Fp381::ENC_LEN, 48);
        assert_eq!(Fp254::ENC_LEN, 32);
        assert_eq!(<Fp381 as PrimeField>::XI_C0, 1);
        assert_eq!(<Fp254 as PrimeField>::XI_C0, 9);
    }
}
