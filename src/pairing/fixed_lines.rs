// Fixed-argument Miller loop with precomputed affine lines.
//
// For a fixed G2 point Q, the Miller loop is run once over the twist in
// affine coordinates, and each line is recorded as (lambda, c) with
// lambda the slope and c = lambda*xT - yT, so that the line evaluated at
// P is (up to a factor in a proper subfield) yP - lambda*xP + c. Dividing
// by yP gives a line whose constant coefficient is 1:
//
//   1 + lambda*(-xP/yP) + c*(1/yP)
//
// The 1/yP and -xP/yP values are computed once per G1 point, with a
// single inversion for all points of a multi-pairing; the factor 1/yP
// is in Fp and vanishes in the final exponentiation.

use log::trace;

use super::lines::{frobenius_twist_points, step_counts, Line, StepLines};
use crate::config::{CurveConfig, TwistType};
use crate::field::{Field, PrimeField};
use crate::point::Affine;
use crate::tower::Fp2;

/// An affine line: slope and constant term.
#[derive(Clone, Copy, Debug)]
pub struct AffineLine<F> {
    pub lambda: Fp2<F>,
    pub c: Fp2<F>,
}

/// Lines of one Miller loop step: doubling line, then optional addition
/// line (for BN, the last step holds the two closing lines).
#[derive(Clone, Copy, Debug)]
pub struct LineStep<F> {
    pub first: AffineLine<F>,
    pub second: Option<AffineLine<F>>,
}

/// Precomputed lines for a fixed G2 point. A table for the point at
/// infinity is empty; pairs using it are skipped.
#[derive(Clone, Debug)]
pub struct LineTable<F> {
    steps: Vec<LineStep<F>>,
}

impl<F: PrimeField> LineTable<F> {

    /// Return true if this table was computed for the point at infinity.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[LineStep<F>] {
        &self.steps
    }
}

// T <- 2T, returning the tangent line.
fn affine_double<F: PrimeField>(t: &mut Affine<Fp2<F>>) -> AffineLine<F> {
    let lambda = t.x.square().mul3() * t.y.mul2().invert();
    let x3 = lambda.square() - t.x.mul2();
    let y3 = lambda * (t.x - x3) - t.y;
    let c = lambda * t.x - t.y;
    t.x = x3;
    t.y = y3;
    AffineLine { lambda, c }
}

// T <- T + Q (T != +/-Q), returning the line through T and Q.
fn affine_add<F: PrimeField>(t: &mut Affine<Fp2<F>>, q: &Affine<Fp2<F>>) -> AffineLine<F> {
    let lambda = (q.y - t.y) * (q.x - t.x).invert();
    let x3 = lambda.square() - t.x - q.x;
    let y3 = lambda * (t.x - x3) - t.y;
    let c = lambda * t.x - t.y;
    t.x = x3;
    t.y = y3;
    AffineLine { lambda, c }
}

/// Run the Miller loop on Q and record all lines. Q must be in G2.
pub(crate) fn precompute<F: PrimeField>(cfg: &CurveConfig<F>, q: &Affine<Fp2<F>>)
    -> LineTable<F>
{
    if q.is_infinity() {
        return LineTable { steps: Vec::new() };
    }
    let (loop_steps, total) = step_counts(cfg);
    let digits = &cfg.loop_counter;
    let nq = q.neg();
    let mut t = *q;
    let mut steps = Vec::with_capacity(total);
    for pos in 0..loop_steps {
        let i = digits.len() - 2 - pos;
        let first = affine_double(&mut t);
        let second = match digits[i] {
            1 => Some(affine_add(&mut t, q)),
            -1 => Some(affine_add(&mut t, &nq)),
            _ => None,
        };
        steps.push(LineStep { first, second });
    }
    if total > loop_steps {
        let (q1, q2) = frobenius_twist_points(cfg, q);
        let first = affine_add(&mut t, &q1);
        let second = Some(affine_add(&mut t, &q2));
        steps.push(LineStep { first, second });
    }
    trace!("line table: {} steps", steps.len());
    LineTable { steps }
}

/// The (1/yP, -xP/yP) values for a batch of G1 points (none of them at
/// infinity), with a single inversion.
pub(crate) fn point_factors<F: PrimeField>(pp: &[Affine<F>]) -> Vec<(F, F)> {
    let mut yy: Vec<F> = pp.iter().map(|p| p.y).collect();
    F::batch_invert(&mut yy);
    pp.iter().zip(yy.iter()).map(|(p, yi)| (*yi, -(p.x * yi))).collect()
}

/// Replays a line table against one G1 point.
pub(crate) struct TableReplay<'a, F> {
    steps: core::slice::Iter<'a, LineStep<F>>,
    yi: F,
    xny: F,
    twist: TwistType,
}

impl<'a, F: PrimeField> TableReplay<'a, F> {

    pub(crate) fn new(table: &'a LineTable<F>, factors: (F, F), twist: TwistType) -> Self {
        Self { steps: table.steps.iter(), yi: factors.0, xny: factors.1, twist }
    }

    fn line(&self, l: &AffineLine<F>) -> Line<F> {
        let a = l.c.mul_by_base(self.yi);
        let b = l.lambda.mul_by_base(self.xny);
        match self.twist {
            TwistType::M => Line { c0: a, c1: b, c2: Fp2::ONE },
            TwistType::D => Line { c0: Fp2::ONE, c1: b, c2: a },
        }
    }
}

impl<'a, F: PrimeField> Iterator for TableReplay<'a, F> {
    type Item = StepLines<F>;

    fn next(&mut self) -> Option<StepLines<F>> {
        let s = self.steps.next()?;
        Some(StepLines {
            first: self.line(&s.first),
            second: s.second.as_ref().map(|l| self.line(l)),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}
