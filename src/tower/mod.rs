//! Extension field tower for pairings.
//!
//! The tower is generic over the base field `F` (see
//! `crate::field::PrimeField`):
//!
//!  - `Fp2<F>`: Fp[u]/(u^2 + 1)
//!  - `Fp6<F>`: Fp2[v]/(v^3 - xi), with xi = `F::XI_C0` + u
//!  - `Fp12<F>`: Fp6[w]/(w^2 - v)
//!
//! All three types implement `crate::field::Field` and the usual
//! operators. `Fp12` additionally provides the sparse multiplications
//! used by Miller loops, Frobenius maps (with constants held in
//! `FrobeniusCoeffs`) and cyclotomic squarings for the final
//! exponentiation.

mod fp2;
mod fp6;
mod fp12;

pub use fp2::Fp2;
pub use fp6::Fp6;
pub use fp12::{Fp12, FrobeniusCoeffs};
