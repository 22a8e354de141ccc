use crate::field::{Field, PrimeField};
use crate::RngCore;

/// Element of Fp2 = Fp[u]/(u^2 + 1); value is c0 + c1*u.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fp2<F> {
    pub c0: F,
    pub c1: F,
}

impl<F: PrimeField> Fp2<F> {

    pub const ZERO: Self = Self { c0: F::ZERO, c1: F::ZERO };
    pub const ONE: Self = Self { c0: F::ONE, c1: F::ZERO };

    #[inline(always)]
    pub const fn new(c0: F, c1: F) -> Self {
        Self { c0, c1 }
    }

    /// Embed a base field element.
    #[inline(always)]
    pub fn from_base(x: F) -> Self {
        Self { c0: x, c1: F::ZERO }
    }

    /// The cubic non-residue xi = XI_C0 + u that defines Fp6.
    pub fn xi() -> Self {
        Self { c0: F::from_u64(F::XI_C0 as u64), c1: F::ONE }
    }

    // Multiply a base field element by XI_C0.
    #[inline(always)]
    pub(crate) fn mul_xi_c0(x: F) -> F {
        match F::XI_C0 {
            1 => x,
            9 => x.mul2().mul2().mul2() + x,
            k => x.mul_small(k),
        }
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        self.c0 += rhs.c0;
        self.c1 += rhs.c1;
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        self.c0 -= rhs.c0;
        self.c1 -= rhs.c1;
    }

    #[inline]
    pub fn set_neg(&mut self) {
        self.c0 = -self.c0;
        self.c1 = -self.c1;
    }

    // Karatsuba over u^2 = -1.
    #[inline]
    fn set_mul(&mut self, rhs: &Self) {
        let aa = self.c0 * rhs.c0;
        let bb = self.c1 * rhs.c1;
        let t = (self.c0 + self.c1) * (rhs.c0 + rhs.c1);
        self.c0 = aa - bb;
        self.c1 = t - aa - bb;
    }

    #[inline]
    pub fn set_square(&mut self) {
        let ab = self.c0 * self.c1;
        self.c0 = (self.c0 + self.c1) * (self.c0 - self.c1);
        self.c1 = ab.mul2();
    }

    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    /// Conjugate (this is also the Frobenius endomorphism x -> x^p).
    #[inline(always)]
    pub fn set_conj(&mut self) {
        self.c1 = -self.c1;
    }

    #[inline(always)]
    pub fn conj(self) -> Self {
        Self { c0: self.c0, c1: -self.c1 }
    }

    /// Multiply by the non-residue xi = c + u:
    /// (a0 + a1*u)*(c + u) = (c*a0 - a1) + (a0 + c*a1)*u
    #[inline]
    pub fn set_mul_by_nonresidue(&mut self) {
        let t0 = Self::mul_xi_c0(self.c0) - self.c1;
        let t1 = self.c0 + Self::mul_xi_c0(self.c1);
        self.c0 = t0;
        self.c1 = t1;
    }

    #[inline(always)]
    pub fn mul_by_nonresidue(self) -> Self {
        let mut r = self;
        r.set_mul_by_nonresidue();
        r
    }

    /// Multiply by a base field element.
    #[inline(always)]
    pub fn mul_by_base(self, k: F) -> Self {
        Self { c0: self.c0 * k, c1: self.c1 * k }
    }

    /// Norm (in Fp): c0^2 + c1^2.
    #[inline(always)]
    pub fn norm(self) -> F {
        self.c0.square() + self.c1.square()
    }

    /// Invert this element (zero yields zero).
    pub fn set_invert(&mut self) {
        let ni = self.norm().invert();
        self.c0 *= ni;
        self.c1 = -(self.c1 * ni);
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

    #[inline(always)]
    pub fn mul2(self) -> Self {
        Self { c0: self.c0.mul2(), c1: self.c1.mul2() }
    }

    #[inline(always)]
    pub fn mul3(self) -> Self {
        Self { c0: self.c0.mul3(), c1: self.c1.mul3() }
    }

    #[inline(always)]
    pub fn half(self) -> Self {
        Self { c0: self.c0.half(), c1: self.c1.half() }
    }

    #[inline(always)]
    pub fn mul_small(self, k: u32) -> Self {
        Self { c0: self.c0.mul_small(k), c1: self.c1.mul_small(k) }
    }

    /// Exponentiation by a public exponent (little-endian 64-bit limbs).
    pub fn pow_vartime(self, e: &[u64]) -> Self {
        let mut r = Self::ONE;
        for i in (0..e.len()).rev() {
            for j in (0..64).rev() {
                r.set_square();
                if ((e[i] >> j) & 1) != 0 {
                    r.set_mul(&self);
                }
            }
        }
        r
    }

    #[inline(always)]
    pub fn equals(self, rhs: Self) -> u32 {
        self.c0.equals(rhs.c0) & self.c1.equals(rhs.c1)
    }

    #[inline(always)]
    pub fn iszero(self) -> u32 {
        self.c0.iszero() & self.c1.iszero()
    }
}

impl<F: PrimeField> Field for Fp2<F> {
    const ZERO: Self = Fp2::<F>::ZERO;
    const ONE: Self = Fp2::<F>::ONE;

    fn square(self) -> Self { Fp2::square(self) }
    fn mul2(self) -> Self { Fp2::mul2(self) }
    fn mul3(self) -> Self { Fp2::mul3(self) }
    fn half(self) -> Self { Fp2::half(self) }
    fn mul_small(self, k: u32) -> Self { Fp2::mul_small(self, k) }
    fn invert(self) -> Self { Fp2::invert(self) }
    fn equals(self, rhs: Self) -> u32 { Fp2::equals(self, rhs) }
    fn iszero(self) -> u32 { Fp2::iszero(self) }

    fn encode_into(self, out: &mut Vec<u8>) {
        self.c0.encode_into(out);
        self.c1.encode_into(out);
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let c0 = F::random(rng);
        let c1 = F::random(rng);
        Self { c0, c1 }
    }
}

crate::forward_binop!(impl[F: PrimeField] Add, add, AddAssign, add_assign for Fp2<F> => set_add);
crate::forward_binop!(impl[F: PrimeField] Sub, sub, SubAssign, sub_assign for Fp2<F> => set_sub);
crate::forward_binop!(impl[F: PrimeField] Mul, mul, MulAssign, mul_assign for Fp2<F> => set_mul);
crate::forward_binop!(impl[F: PrimeField] Div, div, DivAssign, div_assign for Fp2<F> => set_div);
crate::forward_neg!(impl[F: PrimeField] for Fp2<F> => set_neg);

#[cfg(test)]
mod tests {
    use super::Fp2;
    use crate::field::{Field, PrimeField, Fp254, Fp381};
    use rand_core::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn check_fp2<F: PrimeField>(seed: u64) {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let u = Fp2::new(F::ZERO, F::ONE);
        assert!(u * u == -Fp2::<F>::ONE);
        for _ in 0..20 {
            let a = Fp2::<F>::random(&mut rng);
            let b = Fp2::<F>::random(&mut rng);

            // schoolbook product
            let c = Fp2::new(a.c0 * b.c0 - a.c1 * b.c1, a.c0 * b.c1 + a.c1 * b.c0);
            assert!(a * b == c);
            assert!(a.square() == a * a);
            assert!((a + b) - b == a);
            assert!(a * a.invert() == Fp2::ONE);
            assert!((a / b) * b == a);
            assert!(a.mul_by_nonresidue() == a * Fp2::xi());
            assert!(a.mul3() == a + a + a);
            assert!(a.half().mul2() == a);
            assert!(a * a.conj() == Fp2::from_base(a.norm()));

            // Frobenius is the conjugation.
            assert!(a.pow_vartime(F::modulus()) == a.conj());
        }
        assert!(Fp2::<F>::ZERO.invert().iszero() == 0xFFFFFFFF);
    }

    #[test]
    fn fp2_ops() {
        check_fp2::<Fp381>(1);
        check_fp2::<Fp254>(2);
    }
}
