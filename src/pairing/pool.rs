// Pool of chunk buffers for the multi-pairing pipeline.
//
// Workers take a buffer, fill it with `chunk_steps` steps of lines and
// send it to the consumer; the consumer gives it back as soon as it has
// been drained. The pool holds at most `capacity` idle buffers, extra
// buffers are dropped.

use crossbeam::queue::ArrayQueue;
use log::trace;

use super::lines::StepLines;

pub(crate) struct LinePool<F> {
    queue: ArrayQueue<Vec<StepLines<F>>>,
}

impl<F> LinePool<F> {

    pub(crate) fn new(capacity: usize) -> Self {
        Self { queue: ArrayQueue::new(capacity.max(1)) }
    }

    /// Get an empty buffer, reusing an idle one when available.
    pub(crate) fn take(&self, chunk_steps: usize) -> Vec<StepLines<F>> {
        match self.queue.pop() {
            Some(mut buf) => {
                buf.clear();
                buf
            }
            None => Vec::with_capacity(chunk_steps),
        }
    }

    /// Return a buffer to the pool.
    pub(crate) fn give(&self, buf: Vec<StepLines<F>>) {
        if buf.capacity() == 0 {
            return;
        }
        if self.queue.push(buf).is_err() {
            trace!("line pool full ({} buffers), dropping buffer", self.queue.capacity());
        }
    }

    /// Number of idle buffers.
    pub(crate) fn idle(&self) -> usize {
        self.queue.len()
    }
}
