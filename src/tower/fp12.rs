use super::{Fp2, Fp6};
use crate::backend::w64::{divrem_small, sub_small};
use crate::field::{Field, PrimeField};
use crate::RngCore;

/// Element of Fp12 = Fp6[w]/(w^2 - v); value is c0 + c1*w.
///
/// In terms of powers of w over Fp2, the six coefficients
/// (c0.c0, c0.c1, c0.c2, c1.c0, c1.c1, c1.c2) are attached to
/// w^0, w^2, w^4, w^1, w^3 and w^5, respectively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fp12<F> {
    pub c0: Fp6<F>,
    pub c1: Fp6<F>,
}

/// Constants for the Frobenius endomorphisms of Fp12.
///
/// `gamma1[j]` = xi^(j*(p-1)/6), `gamma2[j]` = xi^(j*(p^2-1)/6) and
/// `gamma3[j]` = xi^(j*(p^3-1)/6), for j = 0 to 5. These are derived
/// from the base field modulus and xi only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrobeniusCoeffs<F> {
    pub gamma1: [Fp2<F>; 6],
    pub gamma2: [Fp2<F>; 6],
    pub gamma3: [Fp2<F>; 6],
}

impl<F: PrimeField> FrobeniusCoeffs<F> {

    pub fn new() -> Self {
        // e = (p - 1)/6; p = 1 mod 6 for all pairing-friendly base
        // fields with a sextic twist.
        let mut e = F::modulus().to_vec();
        sub_small(&mut e, 1);
        divrem_small(&mut e, 6);

        let mut gamma1 = [Fp2::<F>::ONE; 6];
        gamma1[1] = Fp2::xi().pow_vartime(&e);
        for j in 2..6 {
            gamma1[j] = gamma1[j - 1] * gamma1[1];
        }
        let mut gamma2 = [Fp2::<F>::ONE; 6];
        let mut gamma3 = [Fp2::<F>::ONE; 6];
        for j in 0..6 {
            gamma2[j] = gamma1[j] * gamma1[j].conj();
            gamma3[j] = gamma2[j] * gamma1[j];
        }
        Self { gamma1, gamma2, gamma3 }
    }
}

impl<F: PrimeField> Default for FrobeniusCoeffs<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PrimeField> Fp12<F> {

    pub const ZERO: Self = Self { c0: Fp6::<F>::ZERO, c1: Fp6::<F>::ZERO };
    pub const ONE: Self = Self { c0: Fp6::<F>::ONE, c1: Fp6::<F>::ZERO };

    #[inline(always)]
    pub const fn new(c0: Fp6<F>, c1: Fp6<F>) -> Self {
        Self { c0, c1 }
    }

    /// Build an element from its six Fp2 coefficients, in increasing
    /// powers of w.
    pub fn from_w_coeffs(x: [Fp2<F>; 6]) -> Self {
        Self {
            c0: Fp6::new(x[0], x[2], x[4]),
            c1: Fp6::new(x[1], x[3], x[5]),
        }
    }

    /// Get the six Fp2 coefficients, in increasing powers of w.
    pub fn to_w_coeffs(self) -> [Fp2<F>; 6] {
        [self.c0.c0, self.c1.c0, self.c0.c1, self.c1.c1, self.c0.c2, self.c1.c2]
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
        self.c0.set_neg();
        self.c1.set_neg();
    }

    fn set_mul(&mut self, rhs: &Self) {
        let aa = self.c0 * rhs.c0;
        let bb = self.c1 * rhs.c1;
        let t = (self.c0 + self.c1) * (rhs.c0 + rhs.c1);
        self.c0 = aa + bb.mul_by_nonresidue();
        self.c1 = t - aa - bb;
    }

    pub fn set_square(&mut self) {
        let ab = self.c0 * self.c1;
        let t = (self.c0 + self.c1) * (self.c0 + self.c1.mul_by_nonresidue());
        self.c0 = t - ab - ab.mul_by_nonresidue();
        self.c1 = ab.mul2();
    }

    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    /// Conjugate (x -> x^(p^6)); on the cyclotomic subgroup, this is
    /// the inverse.
    #[inline(always)]
    pub fn set_conj(&mut self) {
        self.c1.set_neg();
    }

    #[inline(always)]
    pub fn conj(self) -> Self {
        Self { c0: self.c0, c1: -self.c1 }
    }

    pub fn set_invert(&mut self) {
        let t = (self.c0.square() - self.c1.square().mul_by_nonresidue()).invert();
        self.c0 = self.c0 * t;
        self.c1 = -(self.c1 * t);
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

    /// Multiply by the sparse element c0 + c1*w^2 + c4*w^3 (line
    /// evaluation for an M-type twist).
    pub fn set_mul_by_014(&mut self, c0: &Fp2<F>, c1: &Fp2<F>, c4: &Fp2<F>) {
        let t0 = self.c0.mul_by_01(c0, c1);
        let t1 = self.c1.mul_by_1(c4);
        let s = *c1 + c4;
        self.c1 = (self.c0 + self.c1).mul_by_01(c0, &s) - t0 - t1;
        self.c0 = t0 + t1.mul_by_nonresidue();
    }

    /// Multiply by the sparse element c0 + c3*w + c4*w^3 (line
    /// evaluation for a D-type twist).
    pub fn set_mul_by_034(&mut self, c0: &Fp2<F>, c3: &Fp2<F>, c4: &Fp2<F>) {
        let t0 = self.c0.mul_by_fp2(c0);
        let t1 = self.c1.mul_by_01(c3, c4);
        let s = *c0 + c3;
        self.c1 = (self.c0 + self.c1).mul_by_01(&s, c4) - t0 - t1;
        self.c0 = t0 + t1.mul_by_nonresidue();
    }

    /// Multiply all six coefficients by the same Fp2 value.
    pub fn mul_by_fp2(self, k: &Fp2<F>) -> Self {
        Self { c0: self.c0.mul_by_fp2(k), c1: self.c1.mul_by_fp2(k) }
    }

    /// Square an element of the cyclotomic subgroup (Granger-Scott).
    /// The result is unspecified for elements outside that subgroup.
    pub fn set_cyclotomic_square(&mut self) {
        // Fp4 = Fp2[s]/(s^2 - xi) square of (a + b*s); returns
        // (a^2 + xi*b^2, 2*a*b).
        fn fp4_square<F: PrimeField>(a: Fp2<F>, b: Fp2<F>) -> (Fp2<F>, Fp2<F>) {
            let t = a * b;
            let e = (a + b) * (a + b.mul_by_nonresidue()) - t - t.mul_by_nonresidue();
            (e, t.mul2())
        }

        let z0 = self.c0.c0;
        let z4 = self.c0.c1;
        let z3 = self.c0.c2;
        let z2 = self.c1.c0;
        let z1 = self.c1.c1;
        let z5 = self.c1.c2;

        let (t0, t1) = fp4_square(z0, z1);
        let (t2, t3) = fp4_square(z2, z3);
        let (t4, t5) = fp4_square(z4, z5);

        // 3*t - 2*z = 2*(t - z) + t, and 3*t + 2*z = 2*(t + z) + t
        let z0 = (t0 - z0).mul2() + t0;
        let z1 = (t1 + z1).mul2() + t1;
        let t5 = t5.mul_by_nonresidue();
        let z2 = (t5 + z2).mul2() + t5;
        let z3 = (t4 - z3).mul2() + t4;
        let z4 = (t2 - z4).mul2() + t2;
        let z5 = (t3 + z5).mul2() + t3;

        self.c0 = Fp6::new(z0, z4, z3);
        self.c1 = Fp6::new(z2, z1, z5);
    }

    #[inline(always)]
    pub fn cyclotomic_square(self) -> Self {
        let mut r = self;
        r.set_cyclotomic_square();
        r
    }

    /// Raise an element of the cyclotomic subgroup to the power e,
    /// using cyclotomic squarings.
    pub fn cyclotomic_pow_u64(self, e: u64) -> Self {
        let mut r = Self::ONE;
        if e == 0 {
            return r;
        }
        let top = 63 - e.leading_zeros();
        for j in (0..=top).rev() {
            r.set_cyclotomic_square();
            if ((e >> j) & 1) != 0 {
                r.set_mul(&self);
            }
        }
        r
    }

    /// Generic exponentiation by a public exponent (little-endian limbs).
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

    // Apply x -> x^(p^k) for k = 1, 2 or 3.
    fn frobenius_step(self, k: usize, fc: &FrobeniusCoeffs<F>) -> Self {
        let gamma = match k {
            1 => &fc.gamma1,
            2 => &fc.gamma2,
            _ => &fc.gamma3,
        };
        let mut x = self.to_w_coeffs();
        for j in 0..6 {
            if (k & 1) != 0 {
                x[j].set_conj();
            }
            x[j] *= gamma[j];
        }
        Self::from_w_coeffs(x)
    }

    /// Raise this element to the power p^k.
    pub fn frobenius_map(self, k: usize, fc: &FrobeniusCoeffs<F>) -> Self {
        let mut r = self;
        let mut k = k % 12;
        while k > 0 {
            let s = core::cmp::min(k, 3);
            r = r.frobenius_step(s, fc);
            k -= s;
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

    /// Return true if this element is the multiplicative identity.
    #[inline(always)]
    pub fn is_one(self) -> bool {
        self.equals(Self::ONE) != 0
    }

    /// Canonical encoding: the six Fp2 coefficients in increasing powers
    /// of w, each as its two base field encodings (c0 then c1).
    pub fn encode(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 * F::ENC_LEN);
        for x in self.to_w_coeffs().iter() {
            x.encode_into(&mut out);
        }
        out
    }
}

impl<F: PrimeField> Field for Fp12<F> {
    const ZERO: Self = Fp12::<F>::ZERO;
    const ONE: Self = Fp12::<F>::ONE;

    fn square(self) -> Self { Fp12::square(self) }
    fn mul2(self) -> Self { Self { c0: self.c0.mul2(), c1: self.c1.mul2() } }
    fn mul3(self) -> Self { Self { c0: self.c0.mul3(), c1: self.c1.mul3() } }
    fn half(self) -> Self { Self { c0: self.c0.half(), c1: self.c1.half() } }

    fn mul_small(self, k: u32) -> Self {
        Self { c0: self.c0.mul_small(k), c1: self.c1.mul_small(k) }
    }

    fn invert(self) -> Self { Fp12::invert(self) }
    fn equals(self, rhs: Self) -> u32 { Fp12::equals(self, rhs) }
    fn iszero(self) -> u32 { Fp12::iszero(self) }

    fn encode_into(self, out: &mut Vec<u8>) {
        for x in self.to_w_coeffs().iter() {
            x.encode_into(out);
        }
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let c0 = Fp6::random(rng);
        let c1 = Fp6::random(rng);
        Self { c0, c1 }
    }
}

crate::forward_binop!(impl[F: PrimeField] Add, add, AddAssign, add_assign for Fp12<F> => set_add);
crate::forward_binop!(impl[F: PrimeField] Sub, sub, SubAssign, sub_assign for Fp12<F> => set_sub);
crate::forward_binop!(impl[F: PrimeField] Mul, mul, MulAssign, mul_assign for Fp12<F> => set_mul);
crate::forward_binop!(impl[F: PrimeField] Div, div, DivAssign, div_assign for Fp12<F> => set_div);
crate::forward_neg!(impl[F: PrimeField] for Fp12<F> => set_neg);

#[cfg(test)]
mod tests {
    use super::{Fp12, FrobeniusCoeffs};
    use crate::tower::{Fp2, Fp6};
    use crate::field::{Field, PrimeField, Fp254, Fp381};
    use rand_core::SeedableRng;
    use rand_xorshift::XorShiftRng;

    // Map a random element into the cyclotomic subgroup
    // (easy part of the final exponentiation).
    fn to_cyclotomic<F: PrimeField>(f: Fp12<F>, fc: &FrobeniusCoeffs<F>) -> Fp12<F> {
        let t = f.conj() * f.invert();
        t.frobenius_map(2, fc) * t
    }

    fn check_fp12<F: PrimeField>(seed: u64) {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let fc = FrobeniusCoeffs::<F>::new();

        // w^2 = v
        let mut w = [Fp2::<F>::ZERO; 6];
        w[1] = Fp2::ONE;
        let w = Fp12::from_w_coeffs(w);
        let v = Fp12::new(Fp6::new(Fp2::ZERO, Fp2::ONE, Fp2::ZERO), Fp6::ZERO);
        assert!(w.square() == v);

        // gamma1[1]^6 = xi^(p-1)
        let mut e = F::modulus().to_vec();
        e[0] -= 1;
        assert!(fc.gamma1[1].square().square() * fc.gamma1[2] == Fp2::xi().pow_vartime(&e));
        assert!(fc.gamma2[3].c1.iszero() != 0);

        for _ in 0..5 {
            let a = Fp12::<F>::random(&mut rng);
            let b = Fp12::<F>::random(&mut rng);
            let c0 = Fp2::<F>::random(&mut rng);
            let c1 = Fp2::<F>::random(&mut rng);
            let c4 = Fp2::<F>::random(&mut rng);

            assert!(a * b == b * a);
            assert!(a.square() == a * a);
            assert!(a * a.invert() == Fp12::ONE);
            assert!((a / b) * b == a);

            let mut s = [Fp2::ZERO; 6];
            s[0] = c0;
            s[2] = c1;
            s[3] = c4;
            let mut x = a;
            x.set_mul_by_014(&c0, &c1, &c4);
            assert!(x == a * Fp12::from_w_coeffs(s));

            let mut s = [Fp2::ZERO; 6];
            s[0] = c0;
            s[1] = c1;
            s[3] = c4;
            let mut x = a;
            x.set_mul_by_034(&c0, &c1, &c4);
            assert!(x == a * Fp12::from_w_coeffs(s));

            let f1 = a.frobenius_map(1, &fc);
            assert!(f1 == a.pow_vartime(F::modulus()));
            assert!(f1.frobenius_map(1, &fc) == a.frobenius_map(2, &fc));
            assert!(a.frobenius_map(1, &fc).frobenius_map(2, &fc) == a.frobenius_map(3, &fc));
            assert!(a.frobenius_map(6, &fc) == a.conj());
            assert!(a.frobenius_map(12, &fc) == a);

            let k = Fp12::new(Fp6::new(c0, Fp2::ZERO, Fp2::ZERO), Fp6::ZERO);
            assert!(a.mul_by_fp2(&c0) == a * k);

            let m = to_cyclotomic(a, &fc);
            assert!(m.cyclotomic_square() == m.square());
            assert!(m * m.conj() == Fp12::ONE);
            assert!(m.cyclotomic_pow_u64(11) == m.pow_vartime(&[11]));
            assert!(m.cyclotomic_pow_u64(0) == Fp12::ONE);
        }

        let enc = Fp12::<F>::ONE.encode();
        assert_eq!(enc.len(), 12 * F::ENC_LEN);
        assert_eq!(enc[0], 1);
        assert!(enc[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn fp12_ops() {
        check_fp12::<Fp381>(5);
        check_fp12::<Fp254>(6);
    }
}
