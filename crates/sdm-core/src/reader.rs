//! Parallel vote aggregation and the iterative convergence read loop.

use parking_lot::Mutex;
use sdm_bitvec::BitVector;
use tracing::{debug, trace};

/// Partitions the hard-location table across worker tasks and accumulates
/// per-location counter contributions into a shared vote vector.
///
/// The table is split into contiguous disjoint ranges, one per worker, with
/// the last range absorbing any remainder. Each worker scans its range
/// lock-free into a local buffer and merges into the shared accumulator
/// under a mutex only once, so the critical section is
/// O(workers × address_size) rather than O(num_locations × address_size).
#[derive(Debug, Clone)]
pub struct VoteAggregator {
    worker_count: usize,
}

impl VoteAggregator {
    /// Create an aggregator with the given worker count (minimum 1).
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count: worker_count.max(1),
        }
    }

    /// Configured worker count.
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Tally votes for a single probe over the given table state.
    ///
    /// Every location whose address lies strictly within `radius` of the
    /// probe contributes its counter row element-wise. An empty table
    /// yields an all-zero tally. The result is identical to a sequential
    /// full scan for any worker count.
    pub fn tally(
        &self,
        addresses: &[BitVector],
        counters: &[Vec<i32>],
        probe: &BitVector,
        radius: u32,
    ) -> Vec<i64> {
        let width = probe.len();
        let num_locations = addresses.len();
        let votes = Mutex::new(vec![0i64; width]);

        if num_locations == 0 {
            return votes.into_inner();
        }

        let workers = self.worker_count.min(num_locations);
        let per_worker = num_locations / workers;

        rayon::scope(|scope| {
            for worker in 0..workers {
                let start = worker * per_worker;
                let end = if worker == workers - 1 {
                    num_locations
                } else {
                    start + per_worker
                };
                let votes = &votes;

                scope.spawn(move |_| {
                    let mut local = vec![0i64; width];
                    for i in start..end {
                        let Ok(distance) = probe.distance(&addresses[i]) else {
                            continue;
                        };
                        if distance < radius {
                            for (acc, &counter) in local.iter_mut().zip(&counters[i]) {
                                *acc += i64::from(counter);
                            }
                        }
                    }
                    // The only critical section: merge the local buffer.
                    let mut shared = votes.lock();
                    for (total, partial) in shared.iter_mut().zip(&local) {
                        *total += *partial;
                    }
                });
            }
        });

        votes.into_inner()
    }
}

/// Drives the iterative read: re-probes with each round's majority vote
/// until the output stabilizes or the iteration budget runs out.
///
/// Iterations are strictly sequential; only the tally within a round is
/// parallel. The tally is supplied as a callback so lock scope (and any
/// future deadline plumbing) stays at this boundary instead of inside the
/// aggregation algorithm.
#[derive(Debug, Clone, Copy)]
pub struct ConvergenceReader {
    max_iterations: usize,
}

impl ConvergenceReader {
    /// Create a reader with the given iteration budget.
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Run up to the budgeted number of voting rounds from `probe`.
    ///
    /// A budget of zero returns the all-unset vector without calling the
    /// tally at all. The last computed output is returned even when the
    /// budget is exhausted before convergence.
    pub fn run<F>(&self, probe: &BitVector, mut tally: F) -> BitVector
    where
        F: FnMut(&BitVector) -> Vec<i64>,
    {
        let width = probe.len();
        let mut retrieved = BitVector::zeros(width);
        let mut previous = BitVector::zeros(width);
        let mut probe = probe.clone();

        for iteration in 0..self.max_iterations {
            let votes = tally(&probe);
            retrieved = sign_threshold(width, &votes);
            trace!(iteration, retrieved = %retrieved, "vote round complete");

            if retrieved == previous {
                debug!(iteration, "read converged");
                break;
            }
            previous = retrieved.clone();
            probe = retrieved.clone();
        }

        retrieved
    }
}

/// Map vote totals to bits: strictly positive is set, ties resolve to unset.
fn sign_threshold(width: usize, votes: &[i64]) -> BitVector {
    let mut out = BitVector::zeros(width);
    for (j, &vote) in votes.iter().enumerate().take(width) {
        if vote > 0 {
            out.set(j, true);
        }
    }
    out
}
