//! The pairing engine.
//!
//! A `PairingEngine` wraps a curve configuration and implements the
//! optimal Ate pairing e: G1 x G2 -> GT over it, where GT is the order-r
//! subgroup of Fp12*. The pairing is computed as a Miller loop followed
//! by a final exponentiation; both steps are exposed separately, so
//! that products of pairings (`multi_pair()`, `pairing_check()`) pay
//! for a single final exponentiation.
//!
//! Three Miller loop strategies are available:
//!
//!  - The standard loop (`miller_loop()`), on projective twist points
//!    with sparse line multiplications. When enough pairs are provided
//!    (see `EngineOptions::parallel_threshold`), the lines of each pair
//!    are computed in a dedicated worker thread and streamed through a
//!    bounded channel to the calling thread, which accumulates all pairs
//!    in lock-step. The result is identical to the sequential loop.
//!
//!  - The cubical loop for a fixed G2 point (`precompute_fixed_q()`,
//!    `pair_fixed_q()`), for BLS12 curves with an M-twist. Its output is
//!    the square of the pairing, i.e. `pair_fixed_q(P, t)` is equal to
//!    `pair(P, Q)^2`.
//!
//!  - Precomputed affine lines for a fixed G2 point
//!    (`precompute_lines()`, `pair_lines()`), for all supported curves.
//!
//! The point at infinity is accepted everywhere; it contributes the
//! identity to any pairing product. Input slices of different lengths
//! yield `PairingError::LengthMismatch`; empty inputs yield
//! `PairingError::EmptyInput`.
//!
//! ```ignore
//! let engine = PairingEngine::new(bls12_381::config()?);
//! let g1 = engine.config().g1;
//! let g2 = engine.config().g2;
//! assert!(engine.pairing_check(&[g1, g1.neg()], &[g2, g2])?);
//! ```

use log::{debug, trace};

use crate::config::CurveConfig;
use crate::error::{PairingError, Result};
use crate::field::PrimeField;
use crate::point::Affine;
use crate::tower::{Fp12, Fp2};

mod cubical;
mod final_exp;
mod fixed_lines;
mod lines;
mod miller;
mod pool;

pub use cubical::{CubicalPoint, FixedQTable, LadderState, Register, TwoBitWindow};
pub use fixed_lines::{AffineLine, LineStep, LineTable};

use fixed_lines::TableReplay;
use pool::LinePool;

/// Runtime tuning of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// Minimum number of non-trivial pairs for the worker pipeline to be
    /// used; smaller inputs are processed in the calling thread.
    pub parallel_threshold: usize,

    /// Capacity (in chunks) of each worker channel. A zero capacity
    /// makes every send a rendezvous with the consumer.
    pub channel_capacity: usize,

    /// Number of Miller loop steps per chunk (at least 1).
    pub chunk_steps: usize,

    /// Maximum number of idle chunk buffers kept for reuse (at least 1).
    pub pool_capacity: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: 2,
            channel_capacity: 4,
            chunk_steps: 8,
            pool_capacity: 64,
        }
    }
}

/// A pairing engine for a given curve.
pub struct PairingEngine<F> {
    config: CurveConfig<F>,
    options: EngineOptions,
    pool: LinePool<F>,
}

impl<F: PrimeField> PairingEngine<F> {

    /// Create an engine with the default options.
    pub fn new(config: CurveConfig<F>) -> Self {
        Self::with_options(config, EngineOptions::default())
    }

    /// Create an engine with explicit options. `chunk_steps` and
    /// `pool_capacity` are raised to 1 if zero.
    pub fn with_options(config: CurveConfig<F>, options: EngineOptions) -> Self {
        let options = EngineOptions {
            chunk_steps: options.chunk_steps.max(1),
            pool_capacity: options.pool_capacity.max(1),
            ..options
        };
        debug!("pairing engine for {}: {:?}", config.name, options);
        let pool = LinePool::new(options.pool_capacity);
        Self { config, options, pool }
    }

    /// The curve configuration.
    pub fn config(&self) -> &CurveConfig<F> {
        &self.config
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Compute e(P, Q). If either point is the point at infinity, then
    /// the result is 1.
    pub fn pair(&self, p: &Affine<F>, q: &Affine<Fp2<F>>) -> Result<Fp12<F>> {
        if p.is_infinity() || q.is_infinity() {
            return Ok(Fp12::ONE);
        }
        let f = miller::sequential(&self.config, &[(*p, *q)])?;
        Ok(self.final_exponentiation(&f))
    }

    /// Compute the product of e(P_i, Q_i).
    pub fn multi_pair(&self, pp: &[Affine<F>], qq: &[Affine<Fp2<F>>]) -> Result<Fp12<F>> {
        let f = self.miller_loop(pp, qq)?;
        Ok(self.final_exponentiation(&f))
    }

    /// Check whether the product of e(P_i, Q_i) is 1.
    pub fn pairing_check(&self, pp: &[Affine<F>], qq: &[Affine<Fp2<F>>]) -> Result<bool> {
        Ok(self.multi_pair(pp, qq)?.is_one())
    }

    /// Compute the product of the Miller values of all pairs (P_i, Q_i),
    /// without final exponentiation. Pairs containing the point at
    /// infinity are skipped.
    pub fn miller_loop(&self, pp: &[Affine<F>], qq: &[Affine<Fp2<F>>]) -> Result<Fp12<F>> {
        check_lengths(pp.len(), qq.len())?;
        let pairs: Vec<(Affine<F>, Affine<Fp2<F>>)> = pp.iter().zip(qq.iter())
            .filter(|(p, q)| !p.is_infinity() && !q.is_infinity())
            .map(|(p, q)| (*p, *q))
            .collect();
        trace!("miller loop: {} pairs, {} skipped", pairs.len(), pp.len() - pairs.len());
        if pairs.is_empty() {
            return Ok(Fp12::ONE);
        }
        let opts = &self.options;
        if pairs.len() >= opts.parallel_threshold {
            debug!("miller loop: worker pipeline for {} pairs", pairs.len());
            miller::pipelined(&self.config, &self.pool,
                opts.channel_capacity, opts.chunk_steps, &pairs)
        } else {
            debug!("miller loop: sequential for {} pairs", pairs.len());
            miller::sequential(&self.config, &pairs)
        }
    }

    /// Apply the final exponentiation to a Miller value.
    pub fn final_exponentiation(&self, m: &Fp12<F>) -> Fp12<F> {
        final_exp::final_exponentiation(&self.config, m)
    }

    /// Precompute the cubical ladder table for Q. Returned value is
    /// `None` if Q is the point at infinity. This requires a BLS12 curve
    /// with an M-twist (`CubicalUnsupported` otherwise).
    pub fn precompute_fixed_q(&self, q: &Affine<Fp2<F>>) -> Result<Option<FixedQTable<F>>> {
        cubical::precompute(&self.config, q)
    }

    /// Cubical Miller value for (P, Q), with Q given by its table,
    /// before the sign adjustment and the final exponentiation.
    pub fn miller_loop_fixed_q(&self, p: &Affine<F>, table: &FixedQTable<F>) -> Fp12<F> {
        cubical::miller_loop(table, p)
    }

    /// Compute e(P, Q)^2, with Q given by its table.
    pub fn pair_fixed_q(&self, p: &Affine<F>, table: &FixedQTable<F>) -> Fp12<F> {
        self.finish_cubical(cubical::miller_loop(table, p))
    }

    /// Compute the product of e(P_i, Q)^2, with Q given by its table. An
    /// empty input yields 1.
    pub fn pair_fixed_q_multi(&self, pp: &[Affine<F>], table: &FixedQTable<F>) -> Fp12<F> {
        let mut f = Fp12::ONE;
        for p in pp.iter().filter(|p| !p.is_infinity()) {
            f *= cubical::miller_loop(table, p);
        }
        self.finish_cubical(f)
    }

    /// Compute the product of e(P_i, Q_i)^2 with the cubical loop (one
    /// table per non-trivial pair).
    pub fn pair_cubical(&self, pp: &[Affine<F>], qq: &[Affine<Fp2<F>>]) -> Result<Fp12<F>> {
        cubical::check_supported(&self.config)?;
        check_lengths(pp.len(), qq.len())?;
        let mut f = Fp12::ONE;
        for (p, q) in pp.iter().zip(qq.iter()) {
            if p.is_infinity() {
                continue;
            }
            if let Some(t) = cubical::precompute(&self.config, q)? {
                f *= cubical::miller_loop(&t, p);
            }
        }
        Ok(self.finish_cubical(f))
    }

    /// Check whether the product of e(P_i, Q_i) is 1, with the cubical
    /// loop.
    pub fn pairing_check_cubical(&self, pp: &[Affine<F>], qq: &[Affine<Fp2<F>>])
        -> Result<bool>
    {
        Ok(self.pair_cubical(pp, qq)?.is_one())
    }

    fn finish_cubical(&self, f: Fp12<F>) -> Fp12<F> {
        let f = if self.config.family.is_negative() { f.conj() } else { f };
        self.final_exponentiation(&f)
    }

    /// Precompute the affine lines of the Miller loop for Q. Q must be in
    /// G2; the table for the point at infinity is empty.
    pub fn precompute_lines(&self, q: &Affine<Fp2<F>>) -> LineTable<F> {
        fixed_lines::precompute(&self.config, q)
    }

    /// Compute the product of the Miller values of all pairs (P_i, Q_i),
    /// with Q_i given by its line table. Tables must have been computed
    /// by an engine for the same curve.
    pub fn miller_loop_lines(&self, pp: &[Affine<F>], tables: &[&LineTable<F>])
        -> Result<Fp12<F>>
    {
        check_lengths(pp.len(), tables.len())?;
        let (_, total) = lines::step_counts(&self.config);
        let mut points = Vec::with_capacity(pp.len());
        let mut used = Vec::with_capacity(pp.len());
        for (p, t) in pp.iter().zip(tables.iter()) {
            if p.is_infinity() || t.is_empty() {
                continue;
            }
            if t.len() != total {
                return Err(PairingError::InvalidConfig("line table computed for another curve"));
            }
            points.push(*p);
            used.push(*t);
        }
        trace!("line tables: {} pairs, {} skipped", used.len(), pp.len() - used.len());
        let factors = fixed_lines::point_factors(&points);
        let mut sources: Vec<TableReplay<F>> = used.iter().zip(factors.into_iter())
            .map(|(t, f)| TableReplay::new(t, f, self.config.twist))
            .collect();
        miller::accumulate(&self.config, &mut sources)
    }

    /// Compute the product of e(P_i, Q_i), with Q_i given by its line
    /// table.
    pub fn pair_lines(&self, pp: &[Affine<F>], tables: &[&LineTable<F>]) -> Result<Fp12<F>> {
        let f = self.miller_loop_lines(pp, tables)?;
        Ok(self.final_exponentiation(&f))
    }

    pub fn pairing_check_lines(&self, pp: &[Affine<F>], tables: &[&LineTable<F>])
        -> Result<bool>
    {
        Ok(self.pair_lines(pp, tables)?.is_one())
    }
}

fn check_lengths(g1: usize, g2: usize) -> Result<()> {
    if g1 != g2 {
        return Err(PairingError::LengthMismatch { g1, g2 });
    }
    if g1 == 0 {
        return Err(PairingError::EmptyInput);
    }
    Ok(())
}

#[cfg(all(test, feature = "bls12_381", feature = "bn254"))]
mod tests {
    use super::{EngineOptions, PairingEngine};
    use crate::error::PairingError;
    use crate::field::PrimeField;
    use crate::point::Affine;
    use crate::tower::Fp12;
    use crate::{bls12_381, bn254};
    use rand_core::{RngCore, SeedableRng};
    use rand_xorshift::XorShiftRng;

    fn check_engine<F: PrimeField>(engine: &PairingEngine<F>, seed: u64) {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let cfg = engine.config();
        let (g1, g2) = (cfg.g1, cfg.g2);
        let e = engine.pair(&g1, &g2).unwrap();
        assert!(!e.is_one());
        assert!(e.pow_vartime(&cfg.order).is_one());

        // Bilinearity.
        let a = [rng.next_u64() >> 1];
        let b = [rng.next_u64() >> 1];
        let ab = (a[0] as u128) * (b[0] as u128);
        let ab = [ab as u64, (ab >> 64) as u64];
        let e2 = engine.pair(&g1.mul_vartime(&a), &g2.mul_vartime(&b)).unwrap();
        assert!(e2 == e.pow_vartime(&ab));

        // Identity.
        assert!(engine.pair(&Affine::INFINITY, &g2).unwrap().is_one());
        assert!(engine.pair(&g1, &Affine::INFINITY).unwrap().is_one());

        // Multi-pairing: sequential and pipelined give the same Miller
        // value; infinity pairs are skipped.
        let pp = [g1, Affine::random_multiple(&g1, &mut rng), Affine::INFINITY,
            Affine::random_multiple(&g1, &mut rng)];
        let qq = [Affine::random_multiple(&g2, &mut rng), g2,
            Affine::random_multiple(&g2, &mut rng), Affine::INFINITY];
        let seq = PairingEngine::with_options(cfg.clone(),
            EngineOptions { parallel_threshold: usize::MAX, ..Default::default() });
        let m1 = engine.miller_loop(&pp, &qq).unwrap();
        let m2 = seq.miller_loop(&pp, &qq).unwrap();
        assert!(m1 == m2);
        let mut prod = Fp12::ONE;
        for (p, q) in pp.iter().zip(qq.iter()) {
            prod *= engine.pair(p, q).unwrap();
        }
        assert!(engine.multi_pair(&pp, &qq).unwrap() == prod);
        assert!(engine.multi_pair(&[Affine::INFINITY], &[g2]).unwrap().is_one());

        // Pairing check: e(P, Q)*e(-P, Q) = 1.
        let p = pp[1];
        let q = qq[0];
        assert!(engine.pairing_check(&[p, p.neg()], &[q, q]).unwrap());
        assert!(!engine.pairing_check(&[p, p], &[q, q]).unwrap());

        // Errors.
        assert_eq!(engine.miller_loop(&pp[..2], &qq[..3]),
            Err(PairingError::LengthMismatch { g1: 2, g2: 3 }));
        assert_eq!(engine.multi_pair(&[], &[]), Err(PairingError::EmptyInput));

        // Affine line tables.
        let t1 = engine.precompute_lines(&qq[0]);
        let t2 = engine.precompute_lines(&g2);
        let t0 = engine.precompute_lines(&Affine::INFINITY);
        assert!(t0.is_empty());
        let v = engine.pair_lines(&[pp[0], pp[1], pp[3]], &[&t1, &t2, &t0]).unwrap();
        assert!(v == engine.pair(&pp[0], &qq[0]).unwrap() * engine.pair(&pp[1], &g2).unwrap());
        assert!(engine.pairing_check_lines(&[p, p.neg()], &[&t2, &t2]).unwrap());
        assert_eq!(engine.pair_lines(&[p], &[&t1, &t2]),
            Err(PairingError::LengthMismatch { g1: 1, g2: 2 }));
    }

    #[test]
    fn bls12_381_engine() {
        let _ = env_logger::builder().is_test(true).try_init();
        let engine = bls12_381::engine().unwrap();
        check_engine(&engine, 5);

        // Cubical loop: squared pairing.
        let cfg = engine.config();
        let mut rng = XorShiftRng::seed_from_u64(6);
        let q = Affine::random_multiple(&cfg.g2, &mut rng);
        let t = engine.precompute_fixed_q(&q).unwrap().unwrap();
        let p1 = Affine::random_multiple(&cfg.g1, &mut rng);
        let p2 = Affine::random_multiple(&cfg.g1, &mut rng);
        let e1 = engine.pair_fixed_q(&p1, &t);
        assert!(e1 == engine.pair(&p1, &q).unwrap().square());
        let e2 = engine.pair_fixed_q(&p2, &t);
        assert!(engine.pair_fixed_q_multi(&[p1, Affine::INFINITY, p2], &t) == e1 * e2);
        assert!(engine.pair_fixed_q_multi(&[], &t).is_one());
        assert!(engine.pair_fixed_q(&Affine::INFINITY, &t).is_one());
        assert!(engine.precompute_fixed_q(&Affine::INFINITY).unwrap().is_none());

        let v = engine.pair_cubical(&[p1, p2], &[q, cfg.g2]).unwrap();
        assert!(v == (engine.pair(&p1, &q).unwrap() * engine.pair(&p2, &cfg.g2).unwrap()).square());
        assert!(engine.pairing_check_cubical(&[p1, p1.neg()], &[q, q]).unwrap());
        assert_eq!(engine.pair_cubical(&[p1], &[]),
            Err(PairingError::LengthMismatch { g1: 1, g2: 0 }));
    }

    #[test]
    fn bn254_engine() {
        let engine = bn254::engine().unwrap();
        check_engine(&engine, 7);
        let cfg = engine.config();
        assert_eq!(engine.precompute_fixed_q(&cfg.g2).unwrap_err(),
            PairingError::CubicalUnsupported("BN family"));
        assert!(engine.pair_cubical(&[cfg.g1], &[cfg.g2]).is_err());
    }

    #[test]
    fn options() {
        let cfg = bn254::config().unwrap();
        let engine = PairingEngine::with_options(cfg, EngineOptions {
            parallel_threshold: 0,
            channel_capacity: 0,
            chunk_steps: 0,
            pool_capacity: 0,
        });
        assert_eq!(engine.options().chunk_steps, 1);
        assert_eq!(engine.options().pool_capacity, 1);
        assert_eq!(EngineOptions::default().chunk_steps, 8);

        // A single pair through the pipeline.
        let g1 = engine.config().g1;
        let g2 = engine.config().g2;
        assert!(engine.multi_pair(&[g1], &[g2]).unwrap() == engine.pair(&g1, &g2).unwrap());
    }
}
