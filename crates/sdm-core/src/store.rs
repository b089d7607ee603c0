//! The memory store: hard-location table, counter matrix, clear and stats.

use crate::{ConvergenceReader, HistoryLog, MemoryConfig, MemoryError, VoteAggregator};
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sdm_bitvec::BitVector;
use serde::Serialize;
use tracing::{debug, info};

/// Point-in-time snapshot of store diagnostics.
///
/// Holds copies, never aliases of live state, so a caller can inspect a
/// snapshot while the store continues to mutate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub total_locations: usize,
    pub history: Vec<String>,
}

/// Sparse distributed memory over a fixed table of random hard locations.
///
/// Writes perturb the signed per-bit counters of every location within the
/// activation radius of the target address; reads reconstruct the stored
/// pattern by iterative majority voting over the same neighborhoods. The
/// address table is owned exclusively by the store and regenerated only by
/// [`clear`](MemoryStore::clear).
///
/// The table and counters share one reader/writer lock: writes and clears
/// take the exclusive side, each read iteration's scan takes the shared
/// side. The history ring carries its own lock.
pub struct MemoryStore {
    config: MemoryConfig,
    radius: u32,
    table: RwLock<TableState>,
    history: HistoryLog,
    aggregator: VoteAggregator,
}

struct TableState {
    addresses: Vec<BitVector>,
    counters: Vec<Vec<i32>>,
    rng: StdRng,
}

impl TableState {
    fn generate(address_size: usize, num_locations: usize, mut rng: StdRng) -> Self {
        let addresses = (0..num_locations)
            .map(|_| BitVector::random(address_size, &mut rng))
            .collect();
        Self {
            addresses,
            counters: vec![vec![0i32; address_size]; num_locations],
            rng,
        }
    }

    fn regenerate(&mut self, address_size: usize) {
        for address in self.addresses.iter_mut() {
            *address = BitVector::random(address_size, &mut self.rng);
        }
        for row in self.counters.iter_mut() {
            row.fill(0);
        }
    }
}

impl MemoryStore {
    /// Create a store with an entropy-seeded address table.
    pub fn new(config: MemoryConfig) -> Result<Self, MemoryError> {
        Self::build(config, StdRng::from_entropy())
    }

    /// Create a store with a deterministic address table.
    ///
    /// The same seed, geometry and write sequence reproduce identical read
    /// results across runs.
    pub fn with_seed(config: MemoryConfig, seed: u64) -> Result<Self, MemoryError> {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: MemoryConfig, rng: StdRng) -> Result<Self, MemoryError> {
        if config.address_size == 0 {
            return Err(MemoryError::InvalidConfig(
                "address size must be positive".into(),
            ));
        }
        if config.num_locations == 0 {
            return Err(MemoryError::InvalidConfig(
                "location count must be positive".into(),
            ));
        }
        if config.history_capacity == 0 {
            return Err(MemoryError::InvalidConfig(
                "history capacity must be positive".into(),
            ));
        }

        let table = TableState::generate(config.address_size, config.num_locations, rng);
        info!(
            address_size = config.address_size,
            num_locations = config.num_locations,
            "memory store initialized"
        );

        Ok(Self {
            radius: (config.address_size / 2) as u32,
            table: RwLock::new(table),
            history: HistoryLog::new(config.history_capacity),
            aggregator: VoteAggregator::new(config.read_workers),
            config,
        })
    }

    /// Store `data` at `address`.
    ///
    /// Every location within the activation radius of `address` has its
    /// counters incremented where `data` is set and decremented where it is
    /// unset, in one sequential scan under the exclusive lock. The address
    /// is then appended to the history ring. Both vectors must be exactly
    /// `address_size` bits; anything else is a caller contract violation
    /// reported as [`MemoryError::WidthMismatch`].
    pub fn write(&self, address: &BitVector, data: &BitVector) -> Result<(), MemoryError> {
        self.check_width(address)?;
        self.check_width(data)?;
        debug!(address = %address, "writing pattern");

        let mut guard = self.table.write();
        let state = &mut *guard;
        let mut activated = 0usize;
        for (location_address, row) in state.addresses.iter().zip(state.counters.iter_mut()) {
            let Ok(distance) = address.distance(location_address) else {
                continue;
            };
            if distance < self.radius {
                activated += 1;
                for (j, counter) in row.iter_mut().enumerate() {
                    if data.get(j) {
                        *counter += 1;
                    } else {
                        *counter -= 1;
                    }
                }
            }
        }
        drop(guard);

        self.history.record(address.to_bit_string());
        debug!(activated, "write complete");
        Ok(())
    }

    /// Read with the configured default iteration budget.
    pub fn read(&self, address: &BitVector) -> Result<BitVector, MemoryError> {
        self.read_with_iterations(address, self.config.default_iterations)
    }

    /// Read with an explicit iteration budget.
    ///
    /// Each round tallies votes over the table under the shared lock, maps
    /// vote sign to bits (ties unset) and re-probes with the output until
    /// it matches the previous round or the budget runs out. A budget of
    /// zero returns the all-unset vector without consulting the table.
    pub fn read_with_iterations(
        &self,
        address: &BitVector,
        iterations: usize,
    ) -> Result<BitVector, MemoryError> {
        self.check_width(address)?;

        let reader = ConvergenceReader::new(iterations);
        Ok(reader.run(address, |probe| {
            // Shared lock for the scan phase only; released between rounds
            // so writes can interleave.
            let state = self.table.read();
            self.aggregator
                .tally(&state.addresses, &state.counters, probe, self.radius)
        }))
    }

    /// Regenerate every hard-location address, zero every counter and reset
    /// the history ring.
    ///
    /// Atomic from the caller's perspective: no pre-clear state is visible
    /// to a write or read that starts after this returns.
    pub fn clear(&self) {
        let mut state = self.table.write();
        state.regenerate(self.config.address_size);
        drop(state);

        self.history.reset();
        info!("memory cleared");
    }

    /// Fixed bit width of addresses and data.
    pub fn address_size(&self) -> usize {
        self.config.address_size
    }

    /// Fixed number of hard locations.
    pub fn num_locations(&self) -> usize {
        self.config.num_locations
    }

    /// Derived activation radius (`address_size / 2`, exclusive bound).
    pub fn activation_radius(&self) -> u32 {
        self.radius
    }

    /// Snapshot of location count and written-address history.
    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            total_locations: self.config.num_locations,
            history: self.history.snapshot(),
        }
    }

    /// Snapshot of the written-address history ring.
    pub fn history(&self) -> Vec<String> {
        self.history.snapshot()
    }

    fn check_width(&self, vector: &BitVector) -> Result<(), MemoryError> {
        if vector.len() != self.config.address_size {
            return Err(MemoryError::WidthMismatch {
                expected: self.config.address_size,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}
