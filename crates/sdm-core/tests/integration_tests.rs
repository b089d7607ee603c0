//! Integration tests for the memory engine.
//!
//! These tests verify end-to-end store behavior: deterministic construction
//! from a seed, write-then-read recall, clear semantics, iteration budgets,
//! partitioned vote aggregation and the history ring bound.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sdm_bitvec::BitVector;
use sdm_core::{MemoryConfig, MemoryStore, VoteAggregator};

// ============================================================================
// Helper functions
// ============================================================================

/// Parse a bit-string literal, panicking on malformed test input.
fn bits(s: &str) -> BitVector {
    BitVector::from_bit_str(s).unwrap_or_else(|e| panic!("bad test vector {s:?}: {e}"))
}

/// Build a deterministic store with the given geometry.
fn seeded_store(address_size: usize, num_locations: usize, seed: u64) -> MemoryStore {
    MemoryStore::with_seed(MemoryConfig::new(address_size, num_locations), seed)
        .expect("valid geometry")
}

/// Encode `value` as a `width`-bit pattern (bit 0 is the lowest value bit).
fn pattern(value: usize, width: usize) -> BitVector {
    let mut v = BitVector::zeros(width);
    for j in 0..width {
        v.set(j, (value >> j) & 1 == 1);
    }
    v
}

// ============================================================================
// Determinism and recall
// ============================================================================

#[test]
fn test_fixed_seed_reproduces_read_results() {
    let address = bits("1100110011001100");
    let data = bits("1111000011110000");

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let store = seeded_store(16, 300, 9);
        store.write(&address, &data).unwrap();
        outputs.push(store.read(&address).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn test_single_iteration_recall_is_exact() {
    let store = seeded_store(8, 200, 42);
    let address = bits("10101010");
    let data = bits("11110000");

    store.write(&address, &data).unwrap();
    // One write, one round: every activated location votes unanimously.
    let recalled = store.read_with_iterations(&address, 1).unwrap();
    assert_eq!(recalled, data);
}

#[test]
fn test_converged_recall_stays_near_written_data() {
    let store = seeded_store(8, 200, 42);
    let address = bits("10101010");
    let data = bits("11110000");

    store.write(&address, &data).unwrap();
    let recalled = store.read(&address).unwrap();
    assert!(
        recalled.distance(&data).unwrap() <= 1,
        "recalled {recalled} too far from {data}"
    );
}

#[test]
fn test_repeated_writes_reinforce_pattern() {
    let store = seeded_store(16, 400, 7);
    let address = bits("1010101010101010");
    let data = bits("1111111100000000");

    for _ in 0..5 {
        store.write(&address, &data).unwrap();
    }
    let recalled = store.read(&address).unwrap();
    assert!(recalled.distance(&data).unwrap() <= 1);
}

// ============================================================================
// Clear
// ============================================================================

#[test]
fn test_clear_resets_history_and_counters() {
    let store = seeded_store(8, 100, 5);
    let address = bits("11001100");

    store.write(&address, &address).unwrap();
    store.clear();

    let history = store.history();
    assert_eq!(history.len(), 1000);
    assert!(history.iter().all(String::is_empty));

    // No spurious activation survives: all counters are zero again, so any
    // probe settles on the all-unset vector.
    let recalled = store.read(&address).unwrap();
    assert_eq!(recalled, BitVector::zeros(8));
}

#[test]
fn test_clear_then_write_behaves_like_fresh_store() {
    let store = seeded_store(8, 200, 11);
    let noise = bits("01010101");
    let address = bits("10101010");
    let data = bits("00001111");

    store.write(&noise, &noise).unwrap();
    store.clear();
    store.write(&address, &data).unwrap();

    assert_eq!(store.read_with_iterations(&address, 1).unwrap(), data);
    assert_eq!(store.history()[0], "10101010");
}

// ============================================================================
// Iteration budget boundaries
// ============================================================================

#[test]
fn test_zero_iterations_returns_all_unset() {
    let store = seeded_store(8, 200, 3);
    let address = bits("11111111");
    store.write(&address, &address).unwrap();

    let out = store.read_with_iterations(&address, 0).unwrap();
    assert_eq!(out, BitVector::zeros(8));
}

#[test]
fn test_read_before_any_write_is_all_unset() {
    let store = seeded_store(12, 150, 21);
    let probe = pattern(0b101101, 12);
    assert_eq!(store.read(&probe).unwrap(), BitVector::zeros(12));
}

// ============================================================================
// Partitioned vote aggregation
// ============================================================================

/// Sequential full-scan reference for the aggregator.
fn sequential_tally(
    addresses: &[BitVector],
    counters: &[Vec<i32>],
    probe: &BitVector,
    radius: u32,
) -> Vec<i64> {
    let mut votes = vec![0i64; probe.len()];
    for (address, row) in addresses.iter().zip(counters) {
        if probe.distance(address).unwrap() < radius {
            for (total, &counter) in votes.iter_mut().zip(row) {
                *total += i64::from(counter);
            }
        }
    }
    votes
}

#[test]
fn test_any_partitioning_matches_sequential_scan() {
    let width = 32;
    let num_locations = 157;
    let mut rng = StdRng::seed_from_u64(17);

    let addresses: Vec<BitVector> = (0..num_locations)
        .map(|_| BitVector::random(width, &mut rng))
        .collect();
    let counters: Vec<Vec<i32>> = (0..num_locations)
        .map(|_| (0..width).map(|_| rng.gen_range(-20..=20)).collect())
        .collect();
    let probe = BitVector::random(width, &mut rng);
    let radius = (width / 2) as u32;

    let expected = sequential_tally(&addresses, &counters, &probe, radius);
    for workers in [1, 2, 3, 10, 64, num_locations, num_locations * 2] {
        let tallied = VoteAggregator::new(workers).tally(&addresses, &counters, &probe, radius);
        assert_eq!(tallied, expected, "worker count {workers} diverged");
    }
}

#[test]
fn test_worker_count_does_not_change_read_results() {
    let address = bits("1001100110011001");
    let data = bits("0110011001100110");

    let mut outputs = Vec::new();
    for workers in [1, 4, 10, 300] {
        let config = MemoryConfig::new(16, 300).with_read_workers(workers);
        let store = MemoryStore::with_seed(config, 13).unwrap();
        store.write(&address, &data).unwrap();
        outputs.push(store.read(&address).unwrap());
    }
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
}

// ============================================================================
// History ring
// ============================================================================

#[test]
fn test_history_retains_only_last_capacity_writes() {
    let capacity = 16;
    let config = MemoryConfig::new(8, 50).with_history_capacity(capacity);
    let store = MemoryStore::with_seed(config, 29).unwrap();

    let total_writes = capacity + 50;
    for n in 0..total_writes {
        let address = pattern(n, 8);
        store.write(&address, &address).unwrap();
    }

    let history = store.history();
    assert_eq!(history.len(), capacity);

    // Only the last `capacity` writes survive, each in its cursor slot.
    for n in (total_writes - capacity)..total_writes {
        let expected = pattern(n, 8).to_bit_string();
        assert_eq!(history[n % capacity], expected);
    }
    let oldest_evicted = pattern(total_writes - capacity - 1, 8).to_bit_string();
    assert!(!history.contains(&oldest_evicted));
}

#[test]
fn test_history_snapshot_includes_unfilled_slots() {
    let config = MemoryConfig::new(8, 50).with_history_capacity(8);
    let store = MemoryStore::with_seed(config, 31).unwrap();

    store.write(&bits("00000001"), &bits("00000001")).unwrap();
    store.write(&bits("00000010"), &bits("00000010")).unwrap();

    let history = store.history();
    assert_eq!(history.len(), 8);
    assert_eq!(&history[..2], &["00000001", "00000010"]);
    assert!(history[2..].iter().all(String::is_empty));
}

// ============================================================================
// Stats
// ============================================================================

#[test]
fn test_stats_reports_geometry_and_history() {
    let store = seeded_store(8, 123, 37);
    let address = bits("11100111");
    store.write(&address, &address).unwrap();

    let stats = store.stats();
    assert_eq!(stats.total_locations, 123);
    assert_eq!(stats.history[0], "11100111");

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["totalLocations"], 123);
    assert_eq!(json["history"][0], "11100111");
}
