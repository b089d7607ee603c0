//! Memory store configuration.

/// Default number of worker tasks per read iteration.
pub const DEFAULT_READ_WORKERS: usize = 10;

/// Default convergence iteration budget for [`crate::MemoryStore::read`].
pub const DEFAULT_READ_ITERATIONS: usize = 10;

/// Default number of written addresses retained for diagnostics.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Configuration for a [`crate::MemoryStore`].
///
/// `address_size` and `num_locations` are fixed for the lifetime of the
/// store; the activation radius is derived as `address_size / 2` and is not
/// configurable.
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Bit width of every address and every stored datum.
    pub address_size: usize,
    /// Number of hard storage locations.
    pub num_locations: usize,
    /// Worker tasks spawned per read iteration.
    pub read_workers: usize,
    /// Iteration budget used by the convenience read entry point.
    pub default_iterations: usize,
    /// Capacity of the written-address history ring.
    pub history_capacity: usize,
}

impl MemoryConfig {
    /// Create a configuration with the given geometry and default tunables.
    pub fn new(address_size: usize, num_locations: usize) -> Self {
        Self {
            address_size,
            num_locations,
            read_workers: DEFAULT_READ_WORKERS,
            default_iterations: DEFAULT_READ_ITERATIONS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    /// Override the per-read worker count.
    pub fn with_read_workers(mut self, read_workers: usize) -> Self {
        self.read_workers = read_workers;
        self
    }

    /// Override the default iteration budget.
    pub fn with_default_iterations(mut self, default_iterations: usize) -> Self {
        self.default_iterations = default_iterations;
        self
    }

    /// Override the history ring capacity.
    pub fn with_history_capacity(mut self, history_capacity: usize) -> Self {
        self.history_capacity = history_capacity;
        self
    }
}
