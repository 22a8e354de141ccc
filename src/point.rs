//! Short Weierstrass points (curve equation y^2 = x^3 + b).
//!
//! The same generic types serve for G1 (coordinates in the base field)
//! and for G2 (coordinates in Fp2, on the sextic twist). The curve
//! constant b is not part of the types; it is provided by the curve
//! configuration where needed (on-curve checks only, since the group
//! law for a = 0 does not depend on b).
//!
//! `Affine` is the external representation; the point at infinity is
//! encoded as (0, 0), which is never on the curve since b != 0.
//! `Jacobian` coordinates (X:Y:Z) represent the affine point
//! (X/Z^2, Y/Z^3), with Z = 0 for the point at infinity.

#![allow(non_snake_case)]

use crate::field::Field;

/// A point in affine coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Affine<K> {
    pub x: K,
    pub y: K,
}

/// A point in Jacobian coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Jacobian<K> {
    pub(crate) X: K,
    pub(crate) Y: K,
    pub(crate) Z: K,
}

impl<K: Field> Affine<K> {

    /// The point at infinity.
    pub const INFINITY: Self = Self { x: K::ZERO, y: K::ZERO };

    #[inline(always)]
    pub const fn new(x: K, y: K) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn is_infinity(self) -> bool {
        (self.x.iszero() & self.y.iszero()) != 0
    }

    /// Check whether this point is on the curve y^2 = x^3 + b. The point
    /// at infinity is reported as being on the curve.
    pub fn is_on_curve(self, b: &K) -> bool {
        if self.is_infinity() {
            return true;
        }
        self.y.square() == self.x.square() * self.x + b
    }

    pub fn set_neg(&mut self) {
        self.y = -self.y;
    }

    #[inline(always)]
    pub fn neg(self) -> Self {
        Self { x: self.x, y: -self.y }
    }

    /// Multiply this point by an integer (little-endian 64-bit limbs).
    /// This is a plain double-and-add, variable-time.
    pub fn mul_vartime(self, n: &[u64]) -> Self {
        Jacobian::from_affine(&self).mul_vartime(n).to_affine()
    }

    /// Check that this point is in the subgroup of order `order` (the
    /// point at infinity is).
    pub fn is_in_subgroup(self, order: &[u64]) -> bool {
        Jacobian::from_affine(&self).mul_vartime(order).is_infinity()
    }

    /// Get a random multiple of the provided point (normally a subgroup
    /// generator), using a 256-bit random multiplier.
    pub fn random_multiple<R: crate::RngCore + ?Sized>(gen: &Self, rng: &mut R) -> Self {
        let mut n = [0u64; 4];
        for i in 0..4 {
            n[i] = rng.next_u64();
        }
        gen.mul_vartime(&n)
    }
}

impl<K: Field> Jacobian<K> {

    /// The point at infinity.
    pub const INFINITY: Self = Self { X: K::ONE, Y: K::ONE, Z: K::ZERO };

    /// Lift an affine point.
    #[inline]
    pub fn from_affine(P: &Affine<K>) -> Self {
        if P.is_infinity() {
            Self::INFINITY
        } else {
            Self { X: P.x, Y: P.y, Z: K::ONE }
        }
    }

    #[inline(always)]
    pub fn is_infinity(self) -> bool {
        self.Z.iszero() != 0
    }

    /// Convert to affine coordinates (one inversion).
    pub fn to_affine(self) -> Affine<K> {
        if self.is_infinity() {
            return Affine::INFINITY;
        }
        let zi = self.Z.invert();
        let zi2 = zi.square();
        Affine { x: self.X * zi2, y: self.Y * zi2 * zi }
    }

    /// Convert many points to affine coordinates, with a single shared
    /// inversion.
    pub fn batch_to_affine(pp: &[Self]) -> Vec<Affine<K>> {
        let mut zz: Vec<K> = pp.iter().map(|P| P.Z).collect();
        K::batch_invert(&mut zz);
        pp.iter().zip(zz.iter()).map(|(P, zi)| {
            if P.is_infinity() {
                Affine::INFINITY
            } else {
                let zi2 = zi.square();
                Affine { x: P.X * zi2, y: P.Y * zi2 * zi }
            }
        }).collect()
    }

    /// Double this point (in place).
    pub fn set_double(&mut self) {
        // Formulas: dbl-2009-l (a = 0)
        // https://hyperelliptic.org/EFD/g1p/auto-shortw-jacobian-0.html
        // Infinity (Z = 0) maps to Z3 = 0.
        let (X1, Y1, Z1) = (&self.X, &self.Y, &self.Z);
        let A = X1.square();
        let B = Y1.square();
        let C = B.square();
        let D = ((*X1 + B).square() - A - C).mul2();
        let E = A.mul3();
        let F = E.square();
        let X3 = F - D.mul2();
        let Y3 = E * (D - X3) - C.mul2().mul2().mul2();
        let Z3 = (*Y1 * Z1).mul2();
        self.X = X3;
        self.Y = Y3;
        self.Z = Z3;
    }

    #[inline(always)]
    pub fn double(self) -> Self {
        let mut r = self;
        r.set_double();
        r
    }

    /// Add another Jacobian point to this one (in place). Doubling and
    /// opposite points are handled.
    pub fn set_add(&mut self, rhs: &Self) {
        if rhs.is_infinity() {
            return;
        }
        if self.is_infinity() {
            *self = *rhs;
            return;
        }

        // Formulas: add-2007-bl
        let (X1, Y1, Z1) = (&self.X, &self.Y, &self.Z);
        let (X2, Y2, Z2) = (&rhs.X, &rhs.Y, &rhs.Z);
        let Z1Z1 = Z1.square();
        let Z2Z2 = Z2.square();
        let U1 = *X1 * Z2Z2;
        let U2 = *X2 * Z1Z1;
        let S1 = *Y1 * Z2 * Z2Z2;
        let S2 = *Y2 * Z1 * Z1Z1;
        let H = U2 - U1;
        let r = S2 - S1;
        if H.iszero() != 0 {
            if r.iszero() != 0 {
                self.set_double();
            } else {
                *self = Self::INFINITY;
            }
            return;
        }
        let I = H.mul2().square();
        let J = H * I;
        let r = r.mul2();
        let V = U1 * I;
        let X3 = r.square() - J - V.mul2();
        let Y3 = r * (V - X3) - (S1 * J).mul2();
        let Z3 = ((*Z1 + Z2).square() - Z1Z1 - Z2Z2) * H;
        self.X = X3;
        self.Y = Y3;
        self.Z = Z3;
    }

    /// Add an affine point to this one (in place).
    pub fn set_add_mixed(&mut self, rhs: &Affine<K>) {
        if rhs.is_infinity() {
            return;
        }
        if self.is_infinity() {
            *self = Self::from_affine(rhs);
            return;
        }

        // Formulas: madd-2007-bl
        let (X1, Y1, Z1) = (&self.X, &self.Y, &self.Z);
        let Z1Z1 = Z1.square();
        let U2 = rhs.x * Z1Z1;
        let S2 = rhs.y * Z1 * Z1Z1;
        let H = U2 - X1;
        let r = S2 - Y1;
        if H.iszero() != 0 {
            if r.iszero() != 0 {
                self.set_double();
            } else {
                *self = Self::INFINITY;
            }
            return;
        }
        let HH = H.square();
        let I = HH.mul2().mul2();
        let J = H * I;
        let r = r.mul2();
        let V = *X1 * I;
        let X3 = r.square() - J - V.mul2();
        let Y3 = r * (V - X3) - (*Y1 * J).mul2();
        let Z3 = (*Z1 + H).square() - Z1Z1 - HH;
        self.X = X3;
        self.Y = Y3;
        self.Z = Z3;
    }

    #[inline(always)]
    pub fn add_mixed(self, rhs: &Affine<K>) -> Self {
        let mut r = self;
        r.set_add_mixed(rhs);
        r
    }

    #[inline(always)]
    pub fn set_neg(&mut self) {
        self.Y = -self.Y;
    }

    fn set_sub(&mut self, rhs: &Self) {
        let mut t = *rhs;
        t.set_neg();
        self.set_add(&t);
    }

    /// Multiply this point by an integer (little-endian 64-bit limbs).
    pub fn mul_vartime(self, n: &[u64]) -> Self {
        let mut r = Self::INFINITY;
        for i in (0..n.len()).rev() {
            for j in (0..64).rev() {
                r.set_double();
                if ((n[i] >> j) & 1) != 0 {
                    r.set_add(&self);
                }
            }
        }
        r
    }

    /// Compare two points (projective equality).
    pub fn equals(self, rhs: Self) -> bool {
        match (self.is_infinity(), rhs.is_infinity()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }
        let Z1Z1 = self.Z.square();
        let Z2Z2 = rhs.Z.square();
        self.X * Z2Z2 == rhs.X * Z1Z1
            && self.Y * Z2Z2 * rhs.Z == rhs.Y * Z1Z1 * self.Z
    }
}

impl<K: Field> PartialEq for Jacobian<K> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(*other)
    }
}

impl<K: Field> Eq for Jacobian<K> { }

crate::forward_binop!(impl[K: Field] Add, add, AddAssign, add_assign for Jacobian<K> => set_add);
crate::forward_binop!(impl[K: Field] Sub, sub, SubAssign, sub_assign for Jacobian<K> => set_sub);
crate::forward_neg!(impl[K: Field] for Jacobian<K> => set_neg);

#[cfg(all(test, feature = "bls12_381", feature = "bn254"))]
mod tests {
    use super::{Affine, Jacobian};
    use crate::config::CurveConfig;
    use crate::field::{Field, PrimeField};
    use crate::{bls12_381, bn254};
    use rand_core::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn check_group<K: Field>(g: Affine<K>, b: &K, order: &[u64], seed: u64) {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        assert!(g.is_on_curve(b));
        assert!(g.is_in_subgroup(order));
        assert!(!g.is_infinity());
        assert!(Affine::<K>::INFINITY.is_infinity());

        let G = Jacobian::from_affine(&g);
        assert!(G.to_affine() == g);

        // Doubling, addition and mixed addition agree.
        let G2 = G.double();
        assert!(G + G == G2);
        assert!(G.add_mixed(&g) == G2);
        let G3 = G2 + G;
        assert!(G3 == G.mul_vartime(&[3]));
        assert!(G3.to_affine() == g.mul_vartime(&[3]));
        assert!(G3.to_affine().is_on_curve(b));

        // Identity and opposite points.
        let O = Jacobian::<K>::INFINITY;
        assert!(O.double().is_infinity());
        assert!(G + O == G);
        assert!(O + G == G);
        assert!((G - G).is_infinity());
        assert!(G.add_mixed(&g.neg()).is_infinity());
        assert!(O.add_mixed(&g) == G);
        assert!(G.add_mixed(&Affine::INFINITY) == G);
        assert!(O.to_affine().is_infinity());
        assert!(G != O);

        // Batch conversion, including the point at infinity.
        let mut pp = Vec::new();
        for _ in 0..5 {
            pp.push(Jacobian::from_affine(&Affine::random_multiple(&g, &mut rng)));
        }
        pp.push(O);
        pp.push(G3);
        let aa = Jacobian::batch_to_affine(&pp);
        for (P, a) in pp.iter().zip(aa.iter()) {
            assert!(P.to_affine() == *a);
            assert!(a.is_on_curve(b));
        }
        assert!(aa[5].is_infinity());
    }

    fn check_curve<F: PrimeField>(cfg: &CurveConfig<F>, seed: u64) {
        check_group(cfg.g1, &cfg.b, &cfg.order, seed);
        check_group(cfg.g2, &cfg.b_twist, &cfg.order, seed + 1);
    }

    #[test]
    fn curve_points() {
        check_curve(&bls12_381::config().unwrap(), 10);
        check_curve(&bn254::config().unwrap(), 20);
    }
}
