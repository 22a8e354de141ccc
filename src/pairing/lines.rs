// Line functions for the standard Miller loop.
//
// The twist point T is kept in homogeneous projective coordinates
// (x = X/Z, y = Y/Z) on E'(Fp2). Each doubling or addition step updates
// T and returns the three line coefficients on the twist; they are then
// scaled by the G1 point coordinates, giving the three non-zero Fp2
// coefficients of a sparse Fp12 element:
//
//   M-twist: mul_by_014(r0, r1*xP, r2*yP)
//   D-twist: mul_by_034(r0*yP, r1*xP, r2)
//
// (with (r0, r1, r2) already ordered per twist type, see below).

#![allow(non_snake_case)]

use crate::config::{CurveConfig, CurveFamily, TwistType};
use crate::field::PrimeField;
use crate::point::Affine;
use crate::tower::{Fp12, Fp2};

/// A line evaluated at a G1 point: the three non-zero coefficients of a
/// sparse Fp12 element, in the order of `mul_by_014` (M-twist) or
/// `mul_by_034` (D-twist).
#[derive(Clone, Copy, Debug)]
pub(crate) struct Line<F> {
    pub(crate) c0: Fp2<F>,
    pub(crate) c1: Fp2<F>,
    pub(crate) c2: Fp2<F>,
}

impl<F: PrimeField> Line<F> {

    // Scale raw twist coefficients by the G1 point coordinates.
    #[inline]
    fn scale(r: [Fp2<F>; 3], p: &Affine<F>, twist: TwistType) -> Self {
        match twist {
            TwistType::M => Self {
                c0: r[0],
                c1: r[1].mul_by_base(p.x),
                c2: r[2].mul_by_base(p.y),
            },
            TwistType::D => Self {
                c0: r[0].mul_by_base(p.y),
                c1: r[1].mul_by_base(p.x),
                c2: r[2],
            },
        }
    }

    /// Multiply this line into the accumulator.
    #[inline]
    pub(crate) fn mul_into(&self, f: &mut Fp12<F>, twist: TwistType) {
        match twist {
            TwistType::M => f.set_mul_by_014(&self.c0, &self.c1, &self.c2),
            TwistType::D => f.set_mul_by_034(&self.c0, &self.c1, &self.c2),
        }
    }
}

/// The lines produced by one pair for one step of the Miller loop: the
/// doubling line and the optional addition line (for the final BN step,
/// the two Frobenius closing lines).
#[derive(Clone, Copy, Debug)]
pub(crate) struct StepLines<F> {
    pub(crate) first: Line<F>,
    pub(crate) second: Option<Line<F>>,
}

impl<F: PrimeField> StepLines<F> {

    #[inline]
    pub(crate) fn mul_into(&self, f: &mut Fp12<F>, twist: TwistType) {
        self.first.mul_into(f, twist);
        if let Some(l) = &self.second {
            l.mul_into(f, twist);
        }
    }
}

/// Number of steps in a Miller loop for the given configuration:
/// (squaring steps, total steps). Steps beyond the squaring steps are
/// the closing steps of the BN family, applied without squaring.
pub(crate) fn step_counts<F>(cfg: &CurveConfig<F>) -> (usize, usize) {
    let n = cfg.loop_counter.len().saturating_sub(1);
    match cfg.family {
        CurveFamily::Bls12 { .. } => (n, n),
        CurveFamily::Bn { .. } => (n, n + 1),
    }
}

/// The images pi(Q) and -pi^2(Q) of a twist point, for the BN closing
/// steps.
pub(crate) fn frobenius_twist_points<F: PrimeField>(cfg: &CurveConfig<F>, q: &Affine<Fp2<F>>)
    -> (Affine<Fp2<F>>, Affine<Fp2<F>>)
{
    let fc = &cfg.frobenius;
    let q1 = Affine::new(q.x.conj() * fc.gamma1[2], q.y.conj() * fc.gamma1[3]);
    let q2 = Affine::new(q.x * fc.gamma2[2], -(q.y * fc.gamma2[3]));
    (q1, q2)
}

// Twist point in homogeneous projective coordinates.
#[derive(Clone, Copy, Debug)]
struct G2Projective<F> {
    X: Fp2<F>,
    Y: Fp2<F>,
    Z: Fp2<F>,
}

impl<F: PrimeField> G2Projective<F> {

    fn from_affine(q: &Affine<Fp2<F>>) -> Self {
        Self { X: q.x, Y: q.y, Z: Fp2::ONE }
    }

    // T <- 2T; returns the tangent line coefficients.
    fn doubling_step(&mut self, b_twist: &Fp2<F>, twist: TwistType) -> [Fp2<F>; 3] {
        // Costello-Lange-Naehrig 2010, with b' folded in.
        let (X, Y, Z) = (self.X, self.Y, self.Z);
        let A = (X * Y).half();
        let B = Y.square();
        let C = Z.square();
        let E = *b_twist * C.mul3();
        let E3 = E.mul3();
        let G = (B + E3).half();
        let H = (Y + Z).square() - (B + C);
        let I = E - B;
        let J = X.square();
        self.X = A * (B - E3);
        self.Y = G.square() - E.square().mul3();
        self.Z = B * H;
        match twist {
            TwistType::M => [I, J.mul3(), -H],
            TwistType::D => [-H, J.mul3(), I],
        }
    }

    // T <- T + Q (Q affine); returns the line coefficients.
    fn addition_step(&mut self, q: &Affine<Fp2<F>>, twist: TwistType) -> [Fp2<F>; 3] {
        let (X, Y, Z) = (self.X, self.Y, self.Z);
        let O = Y - q.y * Z;
        let L = X - q.x * Z;
        let J = q.x * O - L * q.y;
        let C = O.square();
        let D = L.square();
        let E = L * D;
        let ZC = Z * C;
        let G = X * D;
        let H = E + ZC - G.mul2();
        self.X = L * H;
        self.Y = O * (G - H) - Y * E;
        self.Z = E * Z;
        match twist {
            TwistType::M => [J, -O, L],
            TwistType::D => [L, -O, J],
        }
    }
}

/// Produces, step by step, the evaluated lines of the Miller loop for
/// one pair (P, Q). Neither point may be the point at infinity.
pub(crate) struct LineGenerator<'a, F> {
    cfg: &'a CurveConfig<F>,
    p: Affine<F>,
    q: Affine<Fp2<F>>,
    t: G2Projective<F>,
    pos: usize,
    loop_steps: usize,
    total: usize,
}

impl<'a, F: PrimeField> LineGenerator<'a, F> {

    pub(crate) fn new(cfg: &'a CurveConfig<F>, p: &Affine<F>, q: &Affine<Fp2<F>>) -> Self {
        let (loop_steps, total) = step_counts(cfg);
        Self {
            cfg,
            p: *p,
            q: *q,
            t: G2Projective::from_affine(q),
            pos: 0,
            loop_steps,
            total,
        }
    }
}

impl<'a, F: PrimeField> Iterator for LineGenerator<'a, F> {
    type Item = StepLines<F>;

    fn next(&mut self) -> Option<StepLines<F>> {
        if self.pos >= self.total {
            return None;
        }
        let cfg = self.cfg;
        let twist = cfg.twist;
        let step = if self.pos < self.loop_steps {
            let i = cfg.loop_counter.len() - 2 - self.pos;
            let r = self.t.doubling_step(&cfg.b_twist, twist);
            let first = Line::scale(r, &self.p, twist);
            let second = match cfg.loop_counter[i] {
                1 => Some(self.t.addition_step(&self.q, twist)),
                -1 => Some(self.t.addition_step(&self.q.neg(), twist)),
                _ => None,
            };
            StepLines {
                first,
                second: second.map(|r| Line::scale(r, &self.p, twist)),
            }
        } else {
            let (q1, q2) = frobenius_twist_points(cfg, &self.q);
            let r1 = self.t.addition_step(&q1, twist);
            let r2 = self.t.addition_step(&q2, twist);
            StepLines {
                first: Line::scale(r1, &self.p, twist),
                second: Some(Line::scale(r2, &self.p, twist)),
            }
        };
        self.pos += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.total - self.pos;
        (n, Some(n))
    }
}

#[cfg(all(test, feature = "bls12_381", feature = "bn254"))]
mod tests {
    use super::{step_counts, G2Projective, LineGenerator};
    use crate::config::TwistType;
    use crate::point::{Affine, Jacobian};
    use crate::{bls12_381, bn254};

    #[test]
    fn projective_steps_track_point() {
        let cfg = bls12_381::config().unwrap();
        let q = cfg.g2;
        let mut t = G2Projective::from_affine(&q);
        t.doubling_step(&cfg.b_twist, TwistType::M);
        t.addition_step(&q, TwistType::M);
        let zi = t.Z.invert();
        let a = Affine::new(t.X * zi, t.Y * zi);
        let e = Jacobian::from_affine(&q).mul_vartime(&[3]).to_affine();
        assert!(a == e);
    }

    #[test]
    fn generator_lengths() {
        let cfg = bls12_381::config().unwrap();
        let n = LineGenerator::new(&cfg, &cfg.g1, &cfg.g2).count();
        assert_eq!(step_counts(&cfg), (63, 63));
        assert_eq!(n, 63);

        let cfg = bn254::config().unwrap();
        let g = LineGenerator::new(&cfg, &cfg.g1, &cfg.g2);
        assert_eq!(g.size_hint(), (66, Some(66)));
        let steps: Vec<_> = g.collect();
        assert_eq!(steps.len(), 66);
        assert!(steps[65].second.is_some());
        let adds = steps[..65].iter().filter(|s| s.second.is_some()).count();
        let nz = cfg.loop_counter[..65].iter().filter(|&&d| d != 0).count();
        assert_eq!(adds, nz);
    }
}
