//! Pairing-engine is a Rust library for bilinear pairings over
//! pairing-friendly elliptic curves.
//!
//! This library implements the optimal Ate pairing on the BLS12-381 and
//! BN254 (alt_bn128) curves. The pairing maps a point of G1 (curve over
//! the base field Fp) and a point of G2 (sextic twist over Fp2) to an
//! element of the order-r subgroup of the multiplicative group of Fp12.
//! Field elements and curve points may be used in straightforward
//! expressions with normal arithmetic operators.
//!
//! The base fields are defined in `field`, from the Montgomery field macro
//! in `backend`. The extension tower (Fp2, Fp6, Fp12) is in `tower`, and
//! is generic over the base field. Curve points (affine and Jacobian
//! coordinates) are in `point`. A curve is described at runtime by a
//! `config::CurveConfig` value; the `bls12_381` and `bn254` modules
//! provide the two supported configurations and the corresponding type
//! aliases.
//!
//! The `pairing` module contains the engine itself:
//!
//!  - the standard Miller loop (projective coordinates, sparse line
//!    multiplication) and the final exponentiation (easy part, then the
//!    curve-family specific hard part with cyclotomic squarings);
//!
//!  - a multi-pairing entry point that evaluates the lines of each pair
//!    in its own worker thread, sending them through bounded channels to
//!    a consumer that accumulates all pairs in lock-step into a single
//!    Miller accumulator;
//!
//!  - a fixed-argument variant ("cubical" ladder, BLS12 curves only) that
//!    precomputes, for a G2 point, a table depending only on that point,
//!    which can then be reused against many G1 points;
//!
//!  - a fixed-argument variant with precomputed affine line coefficients,
//!    for both curve families.
//!
//! # Usage
//!
//! The library requires the standard library (the multi-pairing pipeline
//! uses threads). Curve definitions are selected with the `bls12_381` and
//! `bn254` features, both enabled by default.
//!
//! ```ignore
//! use pairing_engine::bls12_381;
//! let engine = bls12_381::engine()?;
//! let e = engine.pair(&engine.config().g1, &engine.config().g2)?;
//! ```
//!
//! # Conventions
//!
//! Pairing computations only handle public data; the implementation is
//! not constant-time. Field elements still follow the crate-wide
//! convention that Boolean results of `equals()` and `iszero()` use the
//! `u32` type, with 0xFFFFFFFF for "true" and 0x00000000 for "false";
//! `PartialEq` is also implemented for convenience.
//!
//! Functions that modify the object on which they are called tend to
//! have a name in `set_*()` (e.g. for an Fp12 element `f`, `f.set_square()`
//! squares the element in place, while `f.square()` leaves `f` unmodified
//! and returns the square as a new instance).
//!
//! The point at infinity is accepted anywhere a curve point is expected;
//! a pair containing it contributes the identity to a (multi-)pairing.
//! Mismatched input lengths are reported as errors, never as panics.
//!
//! Logging goes through the `log` facade (`debug!` for engine decisions,
//! `trace!` for per-step details); no logger is installed by the library.
//!
//! No inline assembly is used. On x86-64 architectures, the
//! `_addcarry_u64()` and `_subborrow_u64()` intrinsics are used
//! (from `core::arch::x86_64`); however, plain implementations with
//! no intrinsics are available (and used on other architectures).

#[cfg(not(feature = "std"))]
compile_error!("feature \"std\" is required");

pub use rand_core::{CryptoRng, RngCore, Error as RngError};

// Implement a binary operator trait (and the compound assignment) for a
// field type, over values and references, by forwarding to an in-place
// function `fn setter(&mut self, rhs: &Self)`. Generic parameters of the
// type (with their bounds) are provided in the leading brackets.
#[doc(hidden)]
#[macro_export]
macro_rules! forward_binop {
    (impl[$($gen:tt)*] $tr:ident, $method:ident, $trassign:ident, $assign:ident
        for $t:ty => $setter:ident) =>
    {
        impl<$($gen)*> core::ops::$tr<$t> for $t {
            type Output = $t;

            #[inline(always)]
            fn $method(self, other: $t) -> $t {
                let mut r = self;
                r.$setter(&other);
                r
            }
        }

        impl<'a, $($gen)*> core::ops::$tr<&'a $t> for $t {
            type Output = $t;

            #[inline(always)]
            fn $method(self, other: &'a $t) -> $t {
                let mut r = self;
                r.$setter(other);
                r
            }
        }

        impl<'a, $($gen)*> core::ops::$tr<$t> for &'a $t {
            type Output = $t;

            #[inline(always)]
            fn $method(self, other: $t) -> $t {
                let mut r = *self;
                r.$setter(&other);
                r
            }
        }

        impl<'a, 'b, $($gen)*> core::ops::$tr<&'a $t> for &'b $t {
            type Output = $t;

            #[inline(always)]
            fn $method(self, other: &'a $t) -> $t {
                let mut r = *self;
                r.$setter(other);
                r
            }
        }

        impl<$($gen)*> core::ops::$trassign<$t> for $t {
            #[inline(always)]
            fn $assign(&mut self, other: $t) {
                self.$setter(&other);
            }
        }

        impl<'a, $($gen)*> core::ops::$trassign<&'a $t> for $t {
            #[inline(always)]
            fn $assign(&mut self, other: &'a $t) {
                self.$setter(other);
            }
        }
    };
}

// Same as forward_binop, for negation (`fn setter(&mut self)`).
#[doc(hidden)]
#[macro_export]
macro_rules! forward_neg {
    (impl[$($gen:tt)*] for $t:ty => $setter:ident) => {
        impl<$($gen)*> core::ops::Neg for $t {
            type Output = $t;

            #[inline(always)]
            fn neg(self) -> $t {
                let mut r = self;
                r.$setter();
                r
            }
        }

        impl<'a, $($gen)*> core::ops::Neg for &'a $t {
            type Output = $t;

            #[inline(always)]
            fn neg(self) -> $t {
                let mut r = *self;
                r.$setter();
                r
            }
        }
    };
}

pub mod backend;
pub mod field;
pub mod tower;
pub mod point;
pub mod config;
pub mod error;
pub mod pairing;

#[cfg(feature = "bls12_381")]
pub mod bls12_381;

#[cfg(feature = "bn254")]
pub mod bn254;

pub use error::{PairingError, Result};
pub use pairing::{EngineOptions, PairingEngine};
