use super::Fp2;
use crate::field::{Field, PrimeField};
use crate::RngCore;

/// Element of Fp6 = Fp2[v]/(v^3 - xi); value is c0 + c1*v + c2*v^2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fp6<F> {
    pub c0: Fp2<F>,
    pub c1: Fp2<F>,
    pub c2: Fp2<F>,
}

impl<F: PrimeField> Fp6<F> {

    pub const ZERO: Self = Self {
        c0: Fp2::<F>::ZERO, c1: Fp2::<F>::ZERO, c2: Fp2::<F>::ZERO,
    };
    pub const ONE: Self = Self {
        c0: Fp2::<F>::ONE, c1: Fp2::<F>::ZERO, c2: Fp2::<F>::ZERO,
    };

    #[inline(always)]
    pub const fn new(c0: Fp2<F>, c1: Fp2<F>, c2: Fp2<F>) -> Self {
        Self { c0, c1, c2 }
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        self.c0 += rhs.c0;
        self.c1 += rhs.c1;
        self.c2 += rhs.c2;
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        self.c0 -= rhs.c0;
        self.c1 -= rhs.c1;
        self.c2 -= rhs.c2;
    }

    #[inline]
    pub fn set_neg(&mut self) {
        self.c0.set_neg();
        self.c1.set_neg();
        self.c2.set_neg();
    }

    // Karatsuba-style product with 6 Fp2 multiplications.
    fn set_mul(&mut self, rhs: &Self) {
        let (a0, a1, a2) = (self.c0, self.c1, self.c2);
        let (b0, b1, b2) = (rhs.c0, rhs.c1, rhs.c2);
        let aa = a0 * b0;
        let bb = a1 * b1;
        let cc = a2 * b2;
        let t1 = ((a1 + a2) * (b1 + b2) - bb - cc).mul_by_nonresidue() + aa;
        let t2 = (a0 + a1) * (b0 + b1) - aa - bb + cc.mul_by_nonresidue();
        let t3 = (a0 + a2) * (b0 + b2) - aa + bb - cc;
        self.c0 = t1;
        self.c1 = t2;
        self.c2 = t3;
    }

    /// Square this value (Chung-Hasan SQR2).
    pub fn set_square(&mut self) {
        let (a0, a1, a2) = (self.c0, self.c1, self.c2);
        let s0 = a0.square();
        let s1 = (a0 * a1).mul2();
        let s2 = (a0 - a1 + a2).square();
        let s3 = (a1 * a2).mul2();
        let s4 = a2.square();
        self.c0 = s3.mul_by_nonresidue() + s0;
        self.c1 = s4.mul_by_nonresidue() + s1;
        self.c2 = s1 + s2 + s3 - s0 - s4;
    }

    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    /// Multiply by v: (a0 + a1*v + a2*v^2)*v = xi*a2 + a0*v + a1*v^2
    #[inline]
    pub fn mul_by_nonresidue(self) -> Self {
        Self { c0: self.c2.mul_by_nonresidue(), c1: self.c0, c2: self.c1 }
    }

    /// Multiply by the sparse element b0 + b1*v.
    pub fn mul_by_01(self, b0: &Fp2<F>, b1: &Fp2<F>) -> Self {
        let (a0, a1, a2) = (self.c0, self.c1, self.c2);
        let aa = a0 * b0;
        let bb = a1 * b1;
        let t1 = ((a1 + a2) * b1 - bb).mul_by_nonresidue() + aa;
        let t3 = (a0 + a2) * b0 - aa + bb;
        let t2 = (*b0 + b1) * (a0 + a1) - aa - bb;
        Self { c0: t1, c1: t2, c2: t3 }
    }

    /// Multiply by the sparse element b1*v.
    pub fn mul_by_1(self, b1: &Fp2<F>) -> Self {
        Self {
            c0: (self.c2 * b1).mul_by_nonresidue(),
            c1: self.c0 * b1,
            c2: self.c1 * b1,
        }
    }

    /// Multiply each coefficient by an Fp2 scalar.
    #[inline]
    pub fn mul_by_fp2(self, k: &Fp2<F>) -> Self {
        Self { c0: self.c0 * k, c1: self.c1 * k, c2: self.c2 * k }
    }

    pub fn set_invert(&mut self) {
        let (a0, a1, a2) = (self.c0, self.c1, self.c2);
        let c0 = a0.square() - (a1 * a2).mul_by_nonresidue();
        let c1 = a2.square().mul_by_nonresidue() - a0 * a1;
        let c2 = a1.square() - a0 * a2;
        let t = a0 * c0 + (a2 * c1 + a1 * c2).mul_by_nonresidue();
        let ti = t.invert();
        self.c0 = c0 * ti;
        self.c1 = c1 * ti;
        self.c2 = c2 * ti;
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
        Self { c0: self.c0.mul2(), c1: self.c1.mul2(), c2: self.c2.mul2() }
    }

    #[inline(always)]
    pub fn mul3(self) -> Self {
        Self { c0: self.c0.mul3(), c1: self.c1.mul3(), c2: self.c2.mul3() }
    }

    #[inline(always)]
    pub fn half(self) -> Self {
        Self { c0: self.c0.half(), c1: self.c1.half(), c2: self.c2.half() }
    }

    #[inline(always)]
    pub fn mul_small(self, k: u32) -> Self {
        Self {
            c0: self.c0.mul_small(k),
            c1: self.c1.mul_small(k),
            c2: self.c2.mul_small(k),
        }
    }

    #[inline(always)]
    pub fn equals(self, rhs: Self) -> u32 {
        self.c0.equals(rhs.c0) & self.c1.equals(rhs.c1) & self.c2.equals(rhs.c2)
    }

    #[inline(always)]
    pub fn iszero(self) -> u32 {
        self.c0.iszero() & self.c1.iszero() & self.c2.iszero()
    }
}

impl<F: PrimeField> Field for Fp6<F> {
    const ZERO: Self = Fp6::<F>::ZERO;
    const ONE: Self = Fp6::<F>::ONE;

    fn square(self) -> Self { Fp6::square(self) }
    fn mul2(self) -> Self { Fp6::mul2(self) }
    fn mul3(self) -> Self { Fp6::mul3(self) }
    fn half(self) -> Self { Fp6::half(self) }
    fn mul_small(self, k: u32) -> Self { Fp6::mul_small(self, k) }
    fn invert(self) -> Self { Fp6::invert(self) }
    fn equals(self, rhs: Self) -> u32 { Fp6::equals(self, rhs) }
    fn iszero(self) -> u32 { Fp6::iszero(self) }

    fn encode_into(self, out: &mut Vec<u8>) {
        self.c0.encode_into(out);
        self.c1.encode_into(out);
        self.c2.encode_into(out);
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let c0 = Fp2::random(rng);
        let c1 = Fp2::random(rng);
        let c2 = Fp2::random(rng);
        Self { c0, c1, c2 }
    }
}

crate::forward_binop!(impl[F: PrimeField] Add, add, AddAssign, add_assign for Fp6<F> => set_add);
crate::forward_binop!(impl[F: PrimeField] Sub, sub, SubAssign, sub_assign for Fp6<F> => set_sub);
crate::forward_binop!(impl[F: PrimeField] Mul, mul, MulAssign, mul_assign for Fp6<F> => set_mul);
crate::forward_binop!(impl[F: PrimeField] Div, div, DivAssign, div_assign for Fp6<F> => set_div);
crate::forward_neg!(impl[F: PrimeField] for Fp6<F> => set_neg);

#[cfg(test)]
mod tests {
    use super::{Fp2, Fp6};
    use crate::field::{Field, PrimeField, Fp254, Fp381};
    use rand_core::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn check_fp6<F: PrimeField>(seed: u64) {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let v = Fp6::new(Fp2::ZERO, Fp2::ONE, Fp2::ZERO);
        let xi = Fp6::new(Fp2::<F>::xi(), Fp2::ZERO, Fp2::ZERO);
        assert!(v * v * v == xi);
        for _ in 0..10 {
            let a = Fp6::<F>::random(&mut rng);
            let b = Fp6::<F>::random(&mut rng);
            let c = Fp6::<F>::random(&mut rng);
            let b0 = Fp2::<F>::random(&mut rng);
            let b1 = Fp2::<F>::random(&mut rng);

            assert!(a * b == b * a);
            assert!((a * b) * c == a * (b * c));
            assert!(a * (b + c) == a * b + a * c);
            assert!(a.square() == a * a);
            assert!(a * a.invert() == Fp6::ONE);
            assert!((a / b) * b == a);
            assert!(a.mul_by_nonresidue() == a * v);
            assert!(a.mul_by_01(&b0, &b1) == a * Fp6::new(b0, b1, Fp2::ZERO));
            assert!(a.mul_by_1(&b1) == a * Fp6::new(Fp2::ZERO, b1, Fp2::ZERO));
            assert!(a.mul_by_fp2(&b0) == a * Fp6::new(b0, Fp2::ZERO, Fp2::ZERO));
        }
        assert!(Fp6::<F>::ZERO.invert() == Fp6::ZERO);
    }

    #[test]
    fn fp6_ops() {
        check_fp6::<Fp381>(3);
        check_fp6::<Fp254>(4);
    }
}
