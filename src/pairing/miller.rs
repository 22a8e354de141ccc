// Multi-Miller loop accumulation.
//
// All strategies share the same accumulator: each pair is represented
// by a source of evaluated lines (one `StepLines` per loop step), and
// the accumulator squares once per step, then multiplies in the lines
// of every pair, in pair order. The sources differ only in where the
// lines come from:
//
//  - computed on the fly in the calling thread (`LineGenerator`);
//  - computed by one worker thread per pair, and received in chunks
//    through a bounded channel (`ChannelSource`);
//  - replayed from a precomputed line table (`TableReplay`).
//
// Since the accumulation order is identical, all strategies yield the
// same value, bit for bit.

use crossbeam::channel::{self, Receiver, Sender};
use crossbeam::thread;
use log::trace;

use super::lines::{step_counts, LineGenerator, StepLines};
use super::pool::LinePool;
use crate::config::CurveConfig;
use crate::error::{PairingError, Result};
use crate::field::PrimeField;
use crate::point::Affine;
use crate::tower::{Fp12, Fp2};

/// Accumulate the lines from all sources into a Miller value. Each
/// source must produce exactly one step per loop position; a source
/// that ends early is reported as a dead worker.
pub(crate) fn accumulate<F, I>(cfg: &CurveConfig<F>, sources: &mut [I]) -> Result<Fp12<F>>
    where F: PrimeField, I: Iterator<Item = StepLines<F>>
{
    let (loop_steps, total) = step_counts(cfg);
    let twist = cfg.twist;
    let mut f = Fp12::ONE;
    for _ in 0..loop_steps {
        f.set_square();
        for src in sources.iter_mut() {
            let step = src.next().ok_or(PairingError::WorkerPanicked)?;
            step.mul_into(&mut f, twist);
        }
    }
    if cfg.family.is_negative() {
        f.set_conj();
    }
    for _ in loop_steps..total {
        for src in sources.iter_mut() {
            let step = src.next().ok_or(PairingError::WorkerPanicked)?;
            step.mul_into(&mut f, twist);
        }
    }
    Ok(f)
}

/// Miller loop over non-trivial pairs, computed in the calling thread.
pub(crate) fn sequential<F: PrimeField>(cfg: &CurveConfig<F>,
    pairs: &[(Affine<F>, Affine<Fp2<F>>)]) -> Result<Fp12<F>>
{
    let mut sources: Vec<LineGenerator<F>> = pairs.iter()
        .map(|(p, q)| LineGenerator::new(cfg, p, q))
        .collect();
    accumulate(cfg, &mut sources)
}

/// Miller loop over non-trivial pairs, with one worker thread per pair.
pub(crate) fn pipelined<F: PrimeField>(cfg: &CurveConfig<F>, pool: &LinePool<F>,
    channel_capacity: usize, chunk_steps: usize,
    pairs: &[(Affine<F>, Affine<Fp2<F>>)]) -> Result<Fp12<F>>
{
    trace!("pipeline: {} workers, chunks of {} steps, channel capacity {}",
        pairs.len(), chunk_steps, channel_capacity);
    let r = thread::scope(|s| {
        let mut sources = Vec::with_capacity(pairs.len());
        for (p, q) in pairs.iter() {
            let (tx, rx) = channel::bounded(channel_capacity);
            s.spawn(move |_| worker(cfg, pool, chunk_steps, p, q, tx));
            sources.push(ChannelSource::new(rx, pool));
        }
        accumulate(cfg, &mut sources)
    });
    match r {
        Ok(r) => r,
        Err(_) => Err(PairingError::WorkerPanicked),
    }
}

// Compute the lines of one pair and send them in chunks. The worker
// stops early if the consumer has gone away.
fn worker<F: PrimeField>(cfg: &CurveConfig<F>, pool: &LinePool<F>, chunk_steps: usize,
    p: &Affine<F>, q: &Affine<Fp2<F>>, tx: Sender<Vec<StepLines<F>>>)
{
    let mut chunks = 0usize;
    let mut buf = pool.take(chunk_steps);
    for step in LineGenerator::new(cfg, p, q) {
        buf.push(step);
        if buf.len() >= chunk_steps {
            if let Err(e) = tx.send(buf) {
                pool.give(e.into_inner());
                trace!("worker: consumer gone after {} chunks", chunks);
                return;
            }
            chunks += 1;
            buf = pool.take(chunk_steps);
        }
    }
    if buf.is_empty() {
        pool.give(buf);
    } else if let Err(e) = tx.send(buf) {
        pool.give(e.into_inner());
    } else {
        chunks += 1;
    }
    trace!("worker: sent {} chunks", chunks);
}

/// Receiving end of a worker channel, as a source of line steps.
/// Drained chunk buffers go back to the pool.
struct ChannelSource<'p, F> {
    rx: Receiver<Vec<StepLines<F>>>,
    pool: &'p LinePool<F>,
    chunk: Vec<StepLines<F>>,
    pos: usize,
}

impl<'p, F> ChannelSource<'p, F> {

    fn new(rx: Receiver<Vec<StepLines<F>>>, pool: &'p LinePool<F>) -> Self {
        Self { rx, pool, chunk: Vec::new(), pos: 0 }
    }
}

impl<'p, F: Copy> Iterator for ChannelSource<'p, F> {
    type Item = StepLines<F>;

    fn next(&mut self) -> Option<StepLines<F>> {
        while self.pos >= self.chunk.len() {
            // A disconnected channel with no pending chunk means the
            // worker ended (or died) before sending all steps.
            let next = self.rx.recv().ok()?;
            let old = core::mem::replace(&mut self.chunk, next);
            self.pool.give(old);
            self.pos = 0;
        }
        let step = self.chunk[self.pos];
        self.pos += 1;
        Some(step)
    }
}

impl<'p, F> Drop for ChannelSource<'p, F> {
    fn drop(&mut self) {
        self.pool.give(core::mem::take(&mut self.chunk));
    }
}
