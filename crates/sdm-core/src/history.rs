//! Bounded ring of recently written addresses.

use parking_lot::RwLock;

/// Fixed-capacity ring buffer of written-address bit patterns.
///
/// The write cursor advances modulo capacity and the oldest entry is
/// overwritten once the ring is full. Snapshots copy the whole buffer, so
/// a caller sees placeholder empty slots until `capacity` writes have
/// occurred. Reads take a shared lock; stats/history reads are far more
/// frequent than writes.
#[derive(Debug)]
pub struct HistoryLog {
    inner: RwLock<Ring>,
}

#[derive(Debug)]
struct Ring {
    slots: Vec<String>,
    cursor: usize,
}

impl HistoryLog {
    /// Create an empty ring with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Ring {
                slots: vec![String::new(); capacity],
                cursor: 0,
            }),
        }
    }

    /// Record an entry, overwriting the oldest slot once full. O(1).
    pub fn record(&self, entry: String) {
        let mut ring = self.inner.write();
        let cursor = ring.cursor;
        ring.slots[cursor] = entry;
        ring.cursor = (cursor + 1) % ring.slots.len();
    }

    /// Point-in-time copy of the whole buffer, filled and empty slots alike.
    pub fn snapshot(&self) -> Vec<String> {
        self.inner.read().slots.clone()
    }

    /// Reset the cursor to the start and blank every slot.
    pub fn reset(&self) {
        let mut ring = self.inner.write();
        for slot in ring.slots.iter_mut() {
            slot.clear();
        }
        ring.cursor = 0;
    }

    /// Fixed capacity of the ring.
    pub fn capacity(&self) -> usize {
        self.inner.read().slots.len()
    }
}
