//! Low-level implementations of prime fields.
//!
//! This module provides the macro that defines a prime field type for a
//! given modulus. Each structure produced by the macro is specialized for
//! a single field, whose modulus is known at compile-time; the pairing
//! base fields are instantiated in `crate::field`.
//!
//! In general, the following properties apply to prime field
//! implementations:
//!
//!  - An instance encapsulates a field element, internally in Montgomery
//!    representation over 64-bit limbs. Values are always fully reduced,
//!    so that each element has a single internal representation.
//!
//!  - The constant values `Self::ZERO` and `Self::ONE` contain the
//!    elements of value 0 and 1, respectively.
//!
//!  - Usual arithmetic operators can be used on field elements (`+`, `-`,
//!    `*`, `/`, and the compound assignments `+=`, `-=`, `*=` and `/=`).
//!    Division by zero is tolerated, and yields zero (regardless of the
//!    dividend). Operators can use both the raw types, and references
//!    thereof.
//!
//!  - Function `set_square(&mut self)` squares a field element (in place).
//!    Corresponding function `square(self) -> Self` returns the result
//!    as a new instance. Sequences of multiple squarings can be performed
//!    with `set_xsquare(&mut self, n: u32)`.
//!
//!  - Functions `set_half()`, `set_mul2()`, `set_mul3()`, `set_mul4()`
//!    and `set_mul8()` multiply their operand (in place) by 1/2, 2, 3, 4
//!    or 8, respectively; `half()`, `mul2()`... return a new instance.
//!    `set_mul_small(&mut self, k: u32)` multiplies by a small integer
//!    provided at runtime.
//!
//!  - Constant values can be defined with the const-qualified `w64le()`
//!    and `w64be()` functions, which take the value as 64-bit limbs in
//!    little-endian and big-endian order, respectively. Non-const
//!    `from_w64le()`, `from_u64()` and `from_i64()` are faster at runtime.
//!
//!  - Function `equals(self, rhs: Self) -> u32` returns 0xFFFFFFFF
//!    if `self` and `rhs` represent the same value, or 0x00000000
//!    otherwise. Function `iszero(self) -> u32` is a specialized
//!    subcase that compares `self` with zero.
//!
//!  - Inversion uses Fermat's little theorem (exponentiation by p-2). It
//!    is not constant-time with regard to the exponent bits, which are
//!    public anyway; `batch_invert()` uses Montgomery's trick to invert
//!    many elements at the cost of one inversion.
//!
//!  - Encoding is unsigned little-endian over `ENC_LEN` bytes (the
//!    minimal length for the modulus). Decoding rejects non-canonical
//!    values.

pub mod w64;
