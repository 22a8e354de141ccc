// Fixed-argument Miller loop with the cubical (x-only) ladder.
//
// For a fixed G2 point Q, an x-only Montgomery-style ladder over the
// loop counter is run once, keeping the registers R = [k]Q and
// S = [k+1]Q as projective (X:Z) pairs. Only the register needed by the
// evaluation at each position is stored, normalized to Z = 1.
//
// Evaluation against a G1 point P runs the same ladder on the point
// T = Q + P' (P' being P embedded in Fp12 through the twist), with
// differential additions against the stored states. Each step is a
// differential addition with a known difference (P' or Q - P'), whose
// x-coordinate inverse is computed once. The final Z coordinate of T is
// the (squared) Miller value.
//
// Formulas, for y^2 = x^3 + b:
//
//   cDBL(X:Z)      = (X*(X^3 - 8b*Z^3) : Z*(4X^3 + 4b*Z^3))
//   cDIFF(P, Q, iX): with t4 = XP*XQ, t5 = ZP*ZQ,
//                    t6 = XP*ZQ + ZP*XQ, t7 = XP*ZQ - ZP*XQ,
//                    X = (t4^2 - 4b*t5*t6)*iX, Z = t7^2
//
// where iX is the inverse of the affine x-coordinate of P - Q.
//
// Only BLS12 curves with an M-twist are supported.

#![allow(non_snake_case)]

use log::trace;

use crate::config::{CurveConfig, CurveFamily, TwistType};
use crate::error::{PairingError, Result};
use crate::field::{Field, PrimeField};
use crate::point::Affine;
use crate::tower::{Fp12, Fp2, Fp6};

/// An x-only projective point (X:Z), with affine x = X/Z.
#[derive(Clone, Copy, Debug)]
pub struct CubicalPoint<K> {
    pub(crate) X: K,
    pub(crate) Z: K,
}

impl<K: Field> CubicalPoint<K> {

    /// Point with affine x-coordinate `x`.
    #[inline(always)]
    pub fn from_x(x: K) -> Self {
        Self { X: x, Z: K::ONE }
    }

    /// Affine x-coordinate (one inversion).
    pub fn x(self) -> K {
        self.X * self.Z.invert()
    }

    /// Double this point; `b` is the curve constant.
    pub fn double(self, b: &K) -> Self {
        let X3 = self.X.square() * self.X;
        let Z3 = self.Z.square() * self.Z;
        let bZ3 = Z3 * b;
        let b4Z3 = bZ3.mul_small(4);
        Self {
            X: self.X * (X3 - b4Z3.mul2()),
            Z: self.Z * (X3.mul_small(4) + b4Z3),
        }
    }

    /// Differential addition: x(P + Q) from P, Q and `ix` = 1/x(P - Q).
    /// `b4` is four times the curve constant.
    pub fn diff_add(P: &Self, Q: &Self, ix: &K, b4: &K) -> Self {
        let t1 = P.X + P.Z;
        let t2 = P.X - P.Z;
        let t3 = Q.X + Q.Z;
        let t4 = P.X * Q.X;
        let t5 = P.Z * Q.Z;
        let t6 = t1 * t3 - t4 - t5;
        let t7 = t2 * t3 - t4 + t5;
        Self {
            X: (t4.square() - *b4 * t5 * t6) * ix,
            Z: t7.square(),
        }
    }
}

impl<F: PrimeField> CubicalPoint<Fp12<F>> {

    // Differential addition with an affine ladder state (a : 1), a in
    // Fp2. Both argument orders give the same result (t7 only changes
    // sign), so this serves for zero and non-zero digits alike; only
    // the inverse of the difference changes.
    #[inline]
    fn ladder_step(&mut self, a: &Fp2<F>, ix: &Fp12<F>, b4: &Fp2<F>) {
        let t4 = self.X.mul_by_fp2(a);
        let t56 = self.X * self.Z + self.Z.square().mul_by_fp2(a);
        let t7 = self.X - self.Z.mul_by_fp2(a);
        self.X = (t4.square() - t56.mul_by_fp2(b4)) * ix;
        self.Z = t7.square();
    }
}

/// Ladder register stored at a given position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    /// R = [k]Q, used for a zero digit.
    R,
    /// S = [k+1]Q, used for a non-zero digit.
    S,
}

/// A normalized ladder state.
#[derive(Clone, Copy, Debug)]
pub struct LadderState<F> {
    pub x: Fp2<F>,
    pub register: Register,
}

/// Coefficients for two consecutive zero-digit steps.
///
/// This only groups the two ladder abscissas in the table layout; the
/// Miller loop still runs two single ladder steps for a window, so it
/// costs the same as the ungrouped path.
#[derive(Clone, Copy, Debug)]
pub struct TwoBitWindow<F> {
    pub a0: Fp2<F>,
    pub a1: Fp2<F>,
}

/// Precomputed data for a fixed G2 point, for the cubical Miller loop.
/// The table is immutable and can be shared between threads.
#[derive(Clone, Debug)]
pub struct FixedQTable<F> {
    q: Affine<Fp2<F>>,
    q_x: Fp12<F>,
    q_y: Fp12<F>,
    ladder: Vec<LadderState<F>>,
    windows: Vec<Option<TwoBitWindow<F>>>,
    b_twist: Fp2<F>,
    b4: Fp2<F>,
}

impl<F: PrimeField> FixedQTable<F> {

    /// The G2 point this table was computed for.
    pub fn q(&self) -> &Affine<Fp2<F>> {
        &self.q
    }

    /// Constant b' of the twist equation.
    pub fn b_twist(&self) -> &Fp2<F> {
        &self.b_twist
    }

    /// Ladder states, in evaluation order.
    pub fn ladder(&self) -> &[LadderState<F>] {
        &self.ladder
    }

    /// Number of two-bit windows.
    pub fn window_count(&self) -> usize {
        self.windows.iter().filter(|w| w.is_some()).count()
    }
}

/// Report whether a configuration supports the cubical loop.
pub(crate) fn check_supported<F>(cfg: &CurveConfig<F>) -> Result<()> {
    match (cfg.family, cfg.twist) {
        (CurveFamily::Bls12 { .. }, TwistType::M) => Ok(()),
        (CurveFamily::Bls12 { .. }, TwistType::D) =>
            Err(PairingError::CubicalUnsupported("D-type twist")),
        (CurveFamily::Bn { .. }, _) =>
            Err(PairingError::CubicalUnsupported("BN family")),
    }
}

/// Build the table for Q; `None` for the point at infinity.
pub(crate) fn precompute<F: PrimeField>(cfg: &CurveConfig<F>, q: &Affine<Fp2<F>>)
    -> Result<Option<FixedQTable<F>>>
{
    check_supported(cfg)?;
    if q.is_infinity() {
        return Ok(None);
    }

    let digits = &cfg.loop_counter;
    let len = digits.len();
    let n = len - 1;
    let b = cfg.b_twist;
    let b4 = b.mul_small(4);
    let ixq = q.x.invert();

    let mut R = CubicalPoint::from_x(q.x);
    let mut S = R.double(&b);
    let mut states: Vec<(CubicalPoint<Fp2<F>>, Register)> = Vec::with_capacity(n);
    let pick = |R: &CubicalPoint<Fp2<F>>, S: &CubicalPoint<Fp2<F>>, d: i8| {
        if d == 0 { (*R, Register::R) } else { (*S, Register::S) }
    };
    states.push(pick(&R, &S, digits[len - 2]));
    for idx in 1..n {
        let i = len - 1 - idx;
        let U = CubicalPoint::diff_add(&S, &R, &ixq, &b4);
        if digits[i] == 0 {
            R = R.double(&b);
            S = U;
        } else {
            S = S.double(&b);
            R = U;
        }
        states.push(pick(&R, &S, digits[i - 1]));
    }

    // Normalize to Z = 1.
    let mut zz: Vec<Fp2<F>> = states.iter().map(|(P, _)| P.Z).collect();
    Fp2::batch_invert(&mut zz);
    let ladder: Vec<LadderState<F>> = states.iter().zip(zz.iter())
        .map(|((P, register), zi)| LadderState { x: P.X * zi, register: *register })
        .collect();

    let mut windows = vec![None; n];
    for idx in 0..n.saturating_sub(1) {
        let i = len - 2 - idx;
        if digits[i] == 0 && digits[i - 1] == 0 {
            windows[idx] = Some(TwoBitWindow { a0: ladder[idx].x, a1: ladder[idx + 1].x });
        }
    }

    let table = FixedQTable {
        q: *q,
        q_x: embed_fp2(&q.x),
        q_y: embed_fp2(&q.y),
        ladder,
        windows,
        b_twist: b,
        b4,
    };
    trace!("cubical table: {} ladder states, {} two-bit windows",
        table.ladder.len(), table.window_count());
    Ok(Some(table))
}

#[inline]
fn embed_fp2<F: PrimeField>(a: &Fp2<F>) -> Fp12<F> {
    Fp12::new(Fp6::new(*a, Fp2::ZERO, Fp2::ZERO), Fp6::ZERO)
}

/// Cubical Miller value for (P, Q), before conjugation and final
/// exponentiation. The point at infinity yields 1.
pub(crate) fn miller_loop<F: PrimeField>(table: &FixedQTable<F>, p: &Affine<F>) -> Fp12<F> {
    if p.is_infinity() {
        return Fp12::ONE;
    }

    // P' = (xP*v, yP*v*w), through the M-twist.
    let xp = Fp2::from_base(p.x);
    let yp = Fp2::from_base(p.y);
    let xP = Fp12::new(Fp6::new(Fp2::ZERO, xp, Fp2::ZERO), Fp6::ZERO);
    let yP = Fp12::new(Fp6::ZERO, Fp6::new(Fp2::ZERO, yp, Fp2::ZERO));

    // T = Q + P', and x(Q - P'); the inverse of x(P') - x(Q) serves
    // for both slopes.
    let ixd = (xP - table.q_x).invert();
    let xs = table.q_x + xP;
    let lambda = ixd * (yP - table.q_y);
    let mut T = CubicalPoint::from_x(lambda.square() - xs);
    let lambda = -(ixd * (yP + table.q_y));
    let xqmp = lambda.square() - xs;

    // 1/x(P') and 1/x(Q - P'), with a single inversion.
    let ip = (xP * xqmp).invert();
    let ix_p = xqmp * ip;
    let ix_qmp = xP * ip;

    let n = table.ladder.len();
    let mut idx = 0;
    while idx < n {
        if let Some(w) = &table.windows[idx] {
            T.ladder_step(&w.a0, &ix_p, &table.b4);
            T.ladder_step(&w.a1, &ix_p, &table.b4);
            idx += 2;
            continue;
        }
        let st = &table.ladder[idx];
        let ix = match st.register {
            Register::R => &ix_p,
            Register::S => &ix_qmp,
        };
        T.ladder_step(&st.x, ix, &table.b4);
        idx += 1;
    }
    T.Z
}

#[cfg(all(test, feature = "bls12_381", feature = "bn254"))]
mod tests {
    use super::{check_supported, miller_loop, precompute, CubicalPoint, Register};
    use crate::error::PairingError;
    use crate::point::{Affine, Jacobian};
    use crate::tower::{Fp12, Fp2, Fp6};
    use crate::{bls12_381, bn254};

    #[test]
    fn x_only_arithmetic() {
        let cfg = bls12_381::config().unwrap();
        let q = cfg.g2;
        let b = cfg.b_twist;
        let b4 = b.mul_small(4);
        let Q = Jacobian::from_affine(&q);

        let D = CubicalPoint::from_x(q.x).double(&b);
        assert!(D.x() == Q.double().to_affine().x);

        // x(5Q) from 3Q, 2Q and x(Q).
        let P3 = CubicalPoint::from_x(Q.mul_vartime(&[3]).to_affine().x);
        let P2 = CubicalPoint::from_x(Q.mul_vartime(&[2]).to_affine().x);
        let ix = q.x.invert();
        let P5 = CubicalPoint::diff_add(&P3, &P2, &ix, &b4);
        assert!(P5.x() == Q.mul_vartime(&[5]).to_affine().x);
        let P5 = CubicalPoint::diff_add(&P2, &P3, &ix, &b4);
        assert!(P5.x() == Q.mul_vartime(&[5]).to_affine().x);
    }

    #[test]
    fn sparse_step_matches_generic() {
        let cfg = bls12_381::config().unwrap();
        let b4 = cfg.b_twist.mul_small(4);
        let a = cfg.g2.x;
        let e = |x: Fp2<_>| Fp12::new(Fp6::new(x, Fp2::ZERO, Fp2::ZERO), Fp6::ZERO);
        let mut T = CubicalPoint {
            X: Fp12::new(Fp6::new(cfg.g2.y, a, cfg.g2.y), Fp6::new(a, a.square(), cfg.g2.y)),
            Z: Fp12::new(Fp6::new(a, cfg.g2.y, a), Fp6::ONE),
        };
        let ix = T.X.square();
        let r = CubicalPoint::diff_add(&T, &CubicalPoint::from_x(e(a)), &ix, &e(b4));
        T.ladder_step(&a, &ix, &b4);
        assert!(r.X == T.X);
        assert!(r.Z == T.Z);
    }

    #[test]
    fn table_layout() {
        let cfg = bls12_381::config().unwrap();
        let t = precompute(&cfg, &cfg.g2).unwrap().unwrap();
        let n = cfg.loop_counter.len() - 1;
        assert_eq!(t.ladder().len(), n);
        let len = cfg.loop_counter.len();
        for (idx, st) in t.ladder().iter().enumerate() {
            let d = cfg.loop_counter[len - 2 - idx];
            assert_eq!(st.register == Register::R, d == 0);
        }
        // |x| = 0xd201000000010000: runs of 2, 8, 31 and 16 zeros.
        assert_eq!(t.window_count(), 53);
        for (idx, w) in t.windows.iter().enumerate() {
            if let Some(w) = w {
                assert!(w.a0 == t.ladder()[idx].x && w.a1 == t.ladder()[idx + 1].x);
                assert_eq!(t.ladder()[idx].register, Register::R);
                assert_eq!(t.ladder()[idx + 1].register, Register::R);
            }
        }

        // The second digit from the top is 1: the first state is S = 2Q.
        let q2 = cfg.g2.mul_vartime(&[2]);
        assert_eq!(t.ladder()[0].register, Register::S);
        assert!(t.ladder()[0].x == q2.x);

        assert!(precompute(&cfg, &Affine::INFINITY).unwrap().is_none());
        assert!(miller_loop(&t, &Affine::INFINITY).is_one());
    }

    #[test]
    fn unsupported_curves() {
        let cfg = bn254::config().unwrap();
        assert_eq!(check_supported(&cfg),
            Err(PairingError::CubicalUnsupported("BN family")));
        assert!(precompute(&cfg, &cfg.g2).is_err());
    }
}
