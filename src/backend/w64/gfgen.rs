// Generic Montgomery prime field, 64-bit limbs.
//
// define_gfgen!(TypeName, ParamsName, submodule_name) defines the type
// `TypeName` for the field of integers modulo `ParamsName::MODULUS`
// (little-endian 64-bit limbs, top limb non-zero, odd modulus). All
// derived constants (limb count, bit length, Montgomery factors) are
// computed at compile-time. The type also implements `crate::field::Field`.

#[macro_export]
macro_rules! define_gfgen { ($typename:ident, $fieldparams:ident, $submod:ident) => {
    // We define a sub-module so that the 'use' clauses do not spill over
    // the caller.
    pub use $submod::$typename;
    mod $submod {

    use $crate::backend::w64::{addcarry_u64, subborrow_u64, umull_add, umull_add2, sub_small};
    use $crate::field::Field;
    use $crate::RngCore;
    use super::$fieldparams;
    use core::convert::TryFrom;

    #[derive(Clone, Copy, Debug)]
    pub struct $typename([u64; $typename::N]);

    impl $typename {
        pub(crate) const N: usize = $fieldparams::MODULUS.len();
        const BITLEN: usize = Self::mod_bitlen();
        const M0I: u64 = Self::ninv64($fieldparams::MODULUS[0]);
        const R: Self = Self::pow2mod(Self::N * 64);
        const R2: Self = Self::pow2mod(Self::N * 128);

        // Element encoded length, in bytes.
        pub const ENC_LEN: usize = (Self::BITLEN + 7) >> 3;

        // Modulus (little-endian order, 64-bit limbs).
        pub const MODULUS: [u64; Self::N] = $fieldparams::MODULUS;

        pub const ZERO: Self = Self([0u64; Self::N]);
        pub const ONE: Self = Self::R;
        pub const MINUS_ONE: Self = Self::const_neg(Self::R);

        // Create an element from its 64-bit limbs, provided in little-endian
        // order (least significant limb first). Usable in constant
        // expressions; at runtime, from_w64le() is faster.
        //
        // Note: if the value is numerically larger than the modulus, then
        // it is implicitly reduced.
        pub const fn w64le(x: [u64; Self::N]) -> Self {
            Self::const_mmul(Self(x), Self::R2)
        }

        // Create an element from its 64-bit limbs, provided in big-endian
        // order (most significant limb first). Usable in constant
        // expressions.
        pub const fn w64be(x: [u64; Self::N]) -> Self {
            let mut y = [0u64; Self::N];
            let mut i = 0;
            while i < Self::N {
                y[i] = x[Self::N - 1 - i];
                i += 1;
            }
            Self::w64le(y)
        }

        // Create an element from its 64-bit limbs, provided in little-endian
        // order (least significant limb first).
        #[inline(always)]
        pub fn from_w64le(x: [u64; Self::N]) -> Self {
            let mut r = Self(x);
            r.set_mul(&Self::R2);
            r
        }

        #[inline(always)]
        pub fn from_u64(x: u64) -> Self {
            let mut d = [0u64; Self::N];
            d[0] = x;
            Self::from_w64le(d)
        }

        #[inline(always)]
        pub fn from_i64(x: i64) -> Self {
            let r = Self::from_u64(x.unsigned_abs());
            if x < 0 { -r } else { r }
        }

        #[inline]
        fn set_add(&mut self, rhs: &Self) {
            let mut cc1 = 0;
            for i in 0..Self::N {
                (self.0[i], cc1) = addcarry_u64(self.0[i], rhs.0[i], cc1);
            }
            let mut cc2 = 0;
            for i in 0..Self::N {
                (self.0[i], cc2) = subborrow_u64(
                    self.0[i], Self::MODULUS[i], cc2);
            }
            // Add back the modulus if the subtraction borrowed and the
            // addition did not carry.
            let cc1 = (cc1 as u64).wrapping_neg();
            let cc2 = (cc2 as u64).wrapping_neg();
            let m = cc2 & !cc1;
            let mut cc3 = 0;
            for i in 0..Self::N {
                (self.0[i], cc3) = addcarry_u64(
                    self.0[i], m & Self::MODULUS[i], cc3);
            }
        }

        #[inline]
        fn set_sub(&mut self, rhs: &Self) {
            let mut cc1 = 0;
            for i in 0..Self::N {
                (self.0[i], cc1) = subborrow_u64(self.0[i], rhs.0[i], cc1);
            }
            let m = (cc1 as u64).wrapping_neg();
            let mut cc2 = 0;
            for i in 0..Self::N {
                (self.0[i], cc2) = addcarry_u64(
                    self.0[i], m & Self::MODULUS[i], cc2);
            }
        }

        // Negate this element.
        #[inline]
        pub fn set_neg(&mut self) {
            let r = *self;
            *self = Self::ZERO;
            self.set_sub(&r);
        }

        // Montgomery multiplication (CIOS): self <- self*rhs/2^(64*N).
        fn set_mul(&mut self, rhs: &Self) {
            let mut t = [0u64; Self::N];
            let mut th = 0u8;
            for i in 0..Self::N {
                let f = rhs.0[i];
                let (lo, mut cc1) = umull_add(f, self.0[0], t[0]);
                let g = lo.wrapping_mul(Self::M0I);
                let (_, mut cc2) = umull_add(g, Self::MODULUS[0], lo);
                for j in 1..Self::N {
                    let (d, hi1) = umull_add2(f, self.0[j], t[j], cc1);
                    cc1 = hi1;
                    let (d, hi2) = umull_add2(g, Self::MODULUS[j], d, cc2);
                    cc2 = hi2;
                    t[j - 1] = d;
                }
                (t[Self::N - 1], th) = addcarry_u64(cc1, cc2, th);
            }

            // Result is lower than 2*p; subtract p, and add it back if
            // that yields a negative value.
            let mut cc = 0;
            for i in 0..Self::N {
                (t[i], cc) = subborrow_u64(t[i], Self::MODULUS[i], cc);
            }
            let mm = (th as u64).wrapping_sub(cc as u64);
            let mut cc = 0;
            for i in 0..Self::N {
                (self.0[i], cc) = addcarry_u64(t[i], mm & Self::MODULUS[i], cc);
            }
        }

        #[inline(always)]
        pub fn set_square(&mut self) {
            let r = *self;
            self.set_mul(&r);
        }

        /// Compute the square of this value.
        #[inline(always)]
        pub fn square(self) -> Self {
            let mut r = self;
            r.set_square();
            r
        }

        /// Square this value n times.
        pub fn set_xsquare(&mut self, n: u32) {
            for _ in 0..n {
                self.set_square();
            }
        }

        /// Halve this value.
        #[inline]
        pub fn set_half(&mut self) {
            // If odd, add the modulus first (the sum is even), then
            // shift right by one bit, including the addition carry.
            let m = (self.0[0] & 1).wrapping_neg();
            let mut cc = 0;
            for i in 0..Self::N {
                (self.0[i], cc) = addcarry_u64(self.0[i], m & Self::MODULUS[i], cc);
            }
            for i in 0..(Self::N - 1) {
                self.0[i] = (self.0[i] >> 1) | (self.0[i + 1] << 63);
            }
            self.0[Self::N - 1] = (self.0[Self::N - 1] >> 1) | ((cc as u64) << 63);
        }

        #[inline(always)]
        pub fn half(self) -> Self {
            let mut r = self;
            r.set_half();
            r
        }

        #[inline(always)]
        pub fn set_mul2(&mut self) {
            let r = *self;
            self.set_add(&r);
        }

        #[inline(always)]
        pub fn mul2(self) -> Self {
            let mut r = self;
            r.set_mul2();
            r
        }

        #[inline(always)]
        pub fn set_mul3(&mut self) {
            let r = *self;
            self.set_add(&r);
            self.set_add(&r);
        }

        #[inline(always)]
        pub fn mul3(self) -> Self {
            let mut r = self;
            r.set_mul3();
            r
        }

        #[inline(always)]
        pub fn set_mul4(&mut self) {
            self.set_mul2();
            self.set_mul2();
        }

        #[inline(always)]
        pub fn mul4(self) -> Self {
            let mut r = self;
            r.set_mul4();
            r
        }

        #[inline(always)]
        pub fn set_mul8(&mut self) {
            self.set_mul2();
            self.set_mul2();
            self.set_mul2();
        }

        #[inline(always)]
        pub fn mul8(self) -> Self {
            let mut r = self;
            r.set_mul8();
            r
        }

        /// Multiply this value by a small integer k.
        #[inline(always)]
        pub fn set_mul_small(&mut self, k: u32) {
            self.set_mul(&Self::from_u64(k as u64));
        }

        #[inline(always)]
        pub fn mul_small(self, k: u32) -> Self {
            let mut r = self;
            r.set_mul_small(k);
            r
        }

        // Raise this value to the power e (unsigned integer, little-endian
        // 64-bit limbs). This is variable-time with regard to the exponent.
        pub fn set_pow_vartime(&mut self, e: &[u64]) {
            let x = *self;
            *self = Self::ONE;
            let mut started = false;
            for i in (0..e.len()).rev() {
                for j in (0..64).rev() {
                    if started {
                        self.set_square();
                    }
                    if ((e[i] >> j) & 1) != 0 {
                        self.set_mul(&x);
                        started = true;
                    }
                }
            }
        }

        #[inline(always)]
        pub fn pow_vartime(self, e: &[u64]) -> Self {
            let mut r = self;
            r.set_pow_vartime(e);
            r
        }

        // Inversion through Fermat's little theorem; zero is mapped to zero.
        pub fn set_invert(&mut self) {
            let mut e = Self::MODULUS;
            sub_small(&mut e, 2);
            self.set_pow_vartime(&e);
        }

        #[inline(always)]
        pub fn invert(self) -> Self {
            let mut r = self;
            r.set_invert();
            r
        }

        fn set_div(&mut self, rhs: &Self) {
            self.set_mul(&rhs.invert());
        }

        // Perform a batch inversion of some elements. All elements of the
        // slice are replaced with their respective inverses (elements of
        // value zero are kept unchanged).
        pub fn batch_invert(xx: &mut [Self]) {
            // Montgomery's trick:
            //   1/u = v*(1/(u*v))
            //   1/v = u*(1/(u*v))
            // applied over the running products; zeros are skipped.
            let n = xx.len();
            if n == 0 {
                return;
            }
            let mut tt: Vec<Self> = Vec::with_capacity(n);
            let mut acc = Self::ONE;
            for x in xx.iter() {
                if x.iszero() == 0 {
                    acc.set_mul(x);
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
                k.set_mul(&x);
            }
        }

        // Equality check: returned value is 0xFFFFFFFF on equality,
        // 0 otherwise.
        #[inline]
        pub fn equals(self, rhs: Self) -> u32 {
            // Values have a single valid internal representation, so we
            // can do a simple comparison.
            let mut r = 0;
            for i in 0..Self::N {
                r |= self.0[i] ^ rhs.0[i];
            }
            ((r | r.wrapping_neg()) >> 63).wrapping_sub(1) as u32
        }

        // Compare this value with zero: returned value is 0xFFFFFFFF if
        // this element is zero, 0 otherwise.
        #[inline]
        pub fn iszero(self) -> u32 {
            let mut r = 0;
            for i in 0..Self::N {
                r |= self.0[i];
            }
            ((r | r.wrapping_neg()) >> 63).wrapping_sub(1) as u32
        }

        // Get the integer value (in [0, p-1]) as little-endian limbs.
        pub fn to_w64le(self) -> [u64; Self::N] {
            // Montgomery multiplication by the plain integer 1 leaves the
            // Montgomery domain.
            let mut one = [0u64; Self::N];
            one[0] = 1;
            let mut x = self;
            x.set_mul(&Self(one));
            x.0
        }

        // Encode this value into bytes (unsigned little-endian encoding
        // of the value, normalized to [0..p-1], with the same size as
        // the modulus).
        pub fn encode(self) -> [u8; Self::ENC_LEN] {
            let x = self.to_w64le();
            let mut d = [0u8; Self::ENC_LEN];
            for i in 0..Self::N {
                let j = i << 3;
                let k = core::cmp::min(8, Self::ENC_LEN - j);
                d[j..(j + k)].copy_from_slice(&x[i].to_le_bytes()[..k]);
            }
            d
        }

        // Decode a value from bytes. If the provided slice length
        // matches the modulus length exactly (`Self::ENC_LEN`) and the
        // unsigned little-endian interpretation of these bytes is an
        // integer in the 0 to p-1 range, then the corresponding element
        // is returned. Otherwise, `None` is returned.
        pub fn decode(buf: &[u8]) -> Option<Self> {
            if buf.len() != Self::ENC_LEN {
                return None;
            }
            let mut d = [0u64; Self::N];
            for i in 0..Self::N {
                let j = i << 3;
                let k = core::cmp::min(8, Self::ENC_LEN - j);
                let mut tmp = [0u8; 8];
                tmp[..k].copy_from_slice(&buf[j..(j + k)]);
                d[i] = u64::from_le_bytes(tmp);
            }

            // Subtracting the modulus must yield a borrow; otherwise, this
            // is a non-canonical input.
            let mut cc = 0;
            for i in 0..Self::N {
                (_, cc) = subborrow_u64(d[i], Self::MODULUS[i], cc);
            }
            if cc == 0 {
                return None;
            }
            Some(Self::from_w64le(d))
        }

        // Get a uniformly random element (rejection sampling over the
        // modulus bit length).
        pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
            loop {
                let mut d = [0u64; Self::N];
                for i in 0..Self::N {
                    d[i] = rng.next_u64();
                }
                let bl = Self::BITLEN & 63;
                if bl != 0 {
                    d[Self::N - 1] &= (1u64 << bl) - 1;
                }
                let mut cc = 0;
                for i in 0..Self::N {
                    (_, cc) = subborrow_u64(d[i], Self::MODULUS[i], cc);
                }
                if cc != 0 {
                    return Self::from_w64le(d);
                }
            }
        }

        // ====================================================================
        // Compile-time helpers. They are only used to compute the
        // constants above; const contexts cannot use the intrinsics.

        // Return -1/x mod 2^64. It is assumed that x is odd.
        const fn ninv64(x: u64) -> u64 {
            // Newton iteration doubles the number of correct low bits;
            // 2 - x is correct on 3 bits, 5 iterations reach 96 bits.
            let mut y = 2u64.wrapping_sub(x);
            let mut i = 0;
            while i < 5 {
                y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(x)));
                i += 1;
            }
            y.wrapping_neg()
        }

        // Compute the modulus exact bit length.
        const fn mod_bitlen() -> usize {
            let top = $fieldparams::MODULUS[Self::N - 1];
            (Self::N - 1) * 64 + (64 - top.leading_zeros() as usize)
        }

        // If a >= p (or hi is set), subtract p once.
        const fn const_reduce_once(a: [u64; Self::N], hi: u64) -> [u64; Self::N] {
            let mut d = [0u64; Self::N];
            let mut cc = 0u64;
            let mut i = 0;
            while i < Self::N {
                let z = (a[i] as u128)
                    .wrapping_sub(Self::MODULUS[i] as u128)
                    .wrapping_sub(cc as u128);
                d[i] = z as u64;
                cc = ((z >> 64) as u64) & 1;
                i += 1;
            }
            if hi != 0 || cc == 0 {
                d
            } else {
                a
            }
        }

        // Compute 2^n mod p by repeated doublings.
        const fn pow2mod(n: usize) -> Self {
            let mut d = [0u64; Self::N];
            d[0] = 1;
            let mut k = 0;
            while k < n {
                let mut hi = 0u64;
                let mut i = 0;
                while i < Self::N {
                    let w = d[i];
                    d[i] = (w << 1) | hi;
                    hi = w >> 63;
                    i += 1;
                }
                d = Self::const_reduce_once(d, hi);
                k += 1;
            }
            Self(d)
        }

        // Modular negation of a non-zero value.
        const fn const_neg(a: Self) -> Self {
            let mut d = [0u64; Self::N];
            let mut cc = 0u64;
            let mut i = 0;
            while i < Self::N {
                let z = (Self::MODULUS[i] as u128)
                    .wrapping_sub(a.0[i] as u128)
                    .wrapping_sub(cc as u128);
                d[i] = z as u64;
                cc = ((z >> 64) as u64) & 1;
                i += 1;
            }
            Self(d)
        }

        // Montgomery multiplication in const contexts.
        const fn const_mmul(a: Self, b: Self) -> Self {
            let mut t = [0u64; Self::N];
            let mut th = 0u64;
            let mut i = 0;
            while i < Self::N {
                let f = b.0[i];
                let z = (f as u128) * (a.0[0] as u128) + (t[0] as u128);
                let lo = z as u64;
                let mut cc1 = (z >> 64) as u64;
                let g = lo.wrapping_mul(Self::M0I);
                let z = (g as u128) * (Self::MODULUS[0] as u128) + (lo as u128);
                let mut cc2 = (z >> 64) as u64;
                let mut j = 1;
                while j < Self::N {
                    let z = (f as u128) * (a.0[j] as u128)
                        + (t[j] as u128) + (cc1 as u128);
                    cc1 = (z >> 64) as u64;
                    let z = (g as u128) * (Self::MODULUS[j] as u128)
                        + ((z as u64) as u128) + (cc2 as u128);
                    cc2 = (z >> 64) as u64;
                    t[j - 1] = z as u64;
                    j += 1;
                }
                let z = (cc1 as u128) + (cc2 as u128) + (th as u128);
                t[Self::N - 1] = z as u64;
                th = (z >> 64) as u64;
                i += 1;
            }
            Self(Self::const_reduce_once(t, th))
        }
    }

    impl Field for $typename {
        const ZERO: Self = $typename::ZERO;
        const ONE: Self = $typename::ONE;

        #[inline(always)]
        fn square(self) -> Self {
            $typename::square(self)
        }

        #[inline(always)]
        fn mul2(self) -> Self {
            $typename::mul2(self)
        }

        #[inline(always)]
        fn mul3(self) -> Self {
            $typename::mul3(self)
        }

        #[inline(always)]
        fn half(self) -> Self {
            $typename::half(self)
        }

        #[inline(always)]
        fn mul_small(self, k: u32) -> Self {
            $typename::mul_small(self, k)
        }

        #[inline(always)]
        fn invert(self) -> Self {
            $typename::invert(self)
        }

        #[inline(always)]
        fn equals(self, rhs: Self) -> u32 {
            $typename::equals(self, rhs)
        }

        #[inline(always)]
        fn iszero(self) -> u32 {
            $typename::iszero(self)
        }

        fn encode_into(self, out: &mut Vec<u8>) {
            out.extend_from_slice(&self.encode());
        }

        fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
            $typename::random(rng)
        }

        fn batch_invert(xx: &mut [Self]) {
            $typename::batch_invert(xx)
        }
    }

    impl PartialEq for $typename {
        #[inline(always)]
        fn eq(&self, other: &Self) -> bool {
            self.equals(*other) != 0
        }
    }

    impl Eq for $typename { }

    impl TryFrom<&[u8]> for $typename {
        type Error = ();

        fn try_from(buf: &[u8]) -> Result<Self, ()> {
            Self::decode(buf).ok_or(())
        }
    }

    // ========================================================================
    // Implementations of all the traits needed to use the simple operators
    // (+, *, /...) on field element instances, with or without references.

    $crate::forward_binop!(impl[] Add, add, AddAssign, add_assign for $typename => set_add);
    $crate::forward_binop!(impl[] Sub, sub, SubAssign, sub_assign for $typename => set_sub);
    $crate::forward_binop!(impl[] Mul, mul, MulAssign, mul_assign for $typename => set_mul);
    $crate::forward_binop!(impl[] Div, div, DivAssign, div_assign for $typename => set_div);
    $crate::forward_neg!(impl[] for $typename => set_neg);

    } // sub-module

} } // End of macro: define_gfgen

pub use define_gfgen;

// ========================================================================

#[macro_export]
macro_rules! define_gfgen_tests { ($typename:ident, $submod:ident) => {

    #[cfg(test)]
    mod $submod {

    use super::$typename;
    use num_bigint::{BigInt, Sign};

    fn modulus() -> BigInt {
        let mut zpmw = [0u32; $typename::MODULUS.len() * 2];
        for i in 0..$typename::MODULUS.len() {
            zpmw[2 * i] = $typename::MODULUS[i] as u32;
            zpmw[2 * i + 1] = ($typename::MODULUS[i] >> 32) as u32;
        }
        BigInt::from_slice(Sign::Plus, &zpmw)
    }

    // Canonical encoding of an integer (assumed in [0, p-1]).
    fn enc(z: &BigInt) -> [u8; $typename::ENC_LEN] {
        let (_, bb) = z.to_bytes_le();
        let mut d = [0u8; $typename::ENC_LEN];
        d[..bb.len()].copy_from_slice(&bb);
        d
    }

    fn big(x: $typename) -> BigInt {
        BigInt::from_bytes_le(Sign::Plus, &x.encode())
    }

    // Deterministic pseudorandom element and its integer value.
    fn mkrnd(bx: u64) -> ($typename, BigInt) {
        use sha2::{Sha512, Digest};

        let mut sh = Sha512::new();
        let mut vv = [0u8; $typename::ENC_LEN];
        let mut j = 0;
        while j < $typename::ENC_LEN {
            sh.update((bx + ((j as u64) << 40)).to_le_bytes());
            let k = core::cmp::min(64, $typename::ENC_LEN - j);
            vv[j..(j + k)].copy_from_slice(&sh.finalize_reset()[..k]);
            j += 64;
        }
        let z = BigInt::from_bytes_le(Sign::Plus, &vv) % modulus();
        let x = $typename::decode(&enc(&z)).unwrap();
        (x, z)
    }

    fn check_gf_ops(a: $typename, za: &BigInt, b: $typename, zb: &BigInt, k: u32) {
        let zp = modulus();

        assert!(big(a) == *za);
        assert!(big(a + b) == (za + zb) % &zp);
        assert!(big(a - b) == ((&zp + za) - zb) % &zp);
        assert!(big(-a) == (&zp - za) % &zp);
        assert!(big(a * b) == (za * zb) % &zp);
        assert!(big(a.square()) == (za * za) % &zp);
        assert!(big(a.mul2()) == (za << 1) % &zp);
        assert!(big(a.mul3()) == (za * 3u32) % &zp);
        assert!(big(a.mul4()) == (za << 2) % &zp);
        assert!(big(a.mul8()) == (za << 3) % &zp);
        assert!(big(a.mul_small(k)) == (za * k) % &zp);
        assert!(big(a.half().mul2()) == *za);

        let c = a / b;
        if b.iszero() != 0 {
            assert!(c.iszero() == 0xFFFFFFFF);
        } else {
            assert!((c * b).equals(a) == 0xFFFFFFFF);
        }
    }

    #[test]
    fn field_ops() {
        let zp = modulus();
        let zero = BigInt::from(0u32);
        let pm1 = &zp - 1u32;
        check_gf_ops($typename::ZERO, &zero, $typename::ZERO, &zero, 0);
        check_gf_ops($typename::MINUS_ONE, &pm1, $typename::MINUS_ONE, &pm1, 0xFFFFFFFF);
        assert!($typename::ONE.equals($typename::from_u64(1)) == 0xFFFFFFFF);
        assert!($typename::from_i64(-5).equals(-$typename::from_u64(5)) == 0xFFFFFFFF);
        for i in 0..300 {
            let (a, za) = mkrnd(3 * i + 0);
            let (b, zb) = mkrnd(3 * i + 1);
            let k = mkrnd(3 * i + 2).0.encode()[0] as u32 * 0x01010101;
            check_gf_ops(a, &za, b, &zb, k);
            assert!(a.iszero() == 0);
            assert!(a.equals(b) == 0);
            assert!(a != b);
        }
    }

    #[test]
    fn encode_decode() {
        let zp = modulus();
        let (a, za) = mkrnd(77);
        let ea = a.encode();
        assert_eq!(ea.len(), $typename::ENC_LEN);
        assert!($typename::decode(&ea).unwrap() == a);
        assert_eq!(ea, enc(&za));

        // The modulus itself is not canonical.
        assert!($typename::decode(&enc(&zp)[..]).is_none());
        assert!($typename::decode(&ea[1..]).is_none());

        let w = a.to_w64le();
        assert!($typename::from_w64le(w) == a);
        let mut rev = w;
        rev.reverse();
        assert!($typename::w64be(rev) == a);
        assert!($typename::w64le(w) == a);
    }

    #[test]
    fn invert_pow() {
        assert!($typename::ZERO.invert().iszero() == 0xFFFFFFFF);
        for i in 0..20 {
            let (a, _) = mkrnd(1000 + i);
            assert!((a * a.invert()) == $typename::ONE);
            let e = [5u64];
            let a5 = a.square().square() * a;
            assert!(a.pow_vartime(&e) == a5);
        }
    }

    #[test]
    fn batch_invert() {
        let mut xx = [$typename::ZERO; 300];
        for i in 0..300 {
            xx[i] = mkrnd((10000 + i) as u64).0;
        }
        xx[120] = $typename::ZERO;
        let mut yy = xx;
        $typename::batch_invert(&mut yy[..]);
        for i in 0..300 {
            if xx[i].iszero() != 0 {
                assert!(yy[i].iszero() == 0xFFFFFFFF);
            } else {
                assert!((xx[i] * yy[i]).equals($typename::ONE) == 0xFFFFFFFF);
            }
        }
    }

    #[test]
    fn random_in_range() {
        use rand_core::SeedableRng;
        let mut rng = rand_xorshift::XorShiftRng::seed_from_u64(7);
        let zp = modulus();
        for _ in 0..50 {
            let x = $typename::random(&mut rng);
            assert!(big(x) < zp);
        }
    }

    } // end of module

} } // End of macro: define_gfgen_tests

pub use define_gfgen_tests;
