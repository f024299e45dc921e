// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! End-to-end integration tests for membench.
//!
//! These run a real (small) benchmark through the full measure → aggregate
//! → persist → reload → compare pipeline.

use membench_core::{
    aggregate, compare, load_result_rows, write_comparison, Harness, HostInfo, MemoryHarness,
    ReadStrategy, ResultStore,
};
use tempfile::TempDir;

#[test]
fn test_measure_aggregate_persist_reload_compare() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = ResultStore::new(dir.path());
    let harness = MemoryHarness::new(ReadStrategy::Full);
    let host = HostInfo::collect();

    // Small sizes so the test stays fast and always allocates.
    let sizes_mib = [1u64, 2, 4];
    for &size_mib in &sizes_mib {
        let record = aggregate(size_mib, 2, &harness).expect("small allocation must succeed");
        assert_eq!(record.size_mib, size_mib);
        assert!(record.mean_write_seconds >= 0.0);
        assert!(record.mean_read_seconds >= 0.0);
        assert!(record.write_bandwidth > 0.0);
        store.append(&record, &host, false).expect("persist failed");
    }

    // Reload what we just wrote and compare the set against itself.
    let rows = load_result_rows(store.csv_path()).expect("reload failed");
    assert_eq!(rows.len(), sizes_mib.len());

    let records = compare(&rows, &rows);
    assert_eq!(records.len(), sizes_mib.len());
    for record in &records {
        assert_eq!(record.write_time.delta, 0.0);
        assert_eq!(record.read_time.delta, 0.0);
    }

    // Persist the comparison as well.
    let comparison_path = dir.path().join("comparison.csv");
    write_comparison(&comparison_path, &records).expect("comparison write failed");
    assert!(comparison_path.exists());

    // Text log got one block per size.
    let log = std::fs::read_to_string(store.text_path()).expect("text log missing");
    assert_eq!(log.matches("Test size:").count(), sizes_mib.len());
}

#[test]
fn test_full_read_time_scales_with_size() {
    let harness = MemoryHarness::new(ReadStrategy::Full);

    // 128x the work dwarfs scheduler noise; best-of-three on the small
    // size guards against a one-off stall.
    let small = (0..3)
        .map(|_| harness.measure(1 << 20).timing.expect("1 MiB must allocate").read)
        .min()
        .unwrap();
    let large = harness
        .measure(128 << 20)
        .timing
        .expect("128 MiB must allocate")
        .read;

    assert!(
        large > small,
        "full read of 128 MiB ({:?}) not slower than 1 MiB ({:?})",
        large,
        small
    );
}

#[test]
fn test_sampled_strategy_end_to_end() {
    let harness = MemoryHarness::new(ReadStrategy::Sampled);
    let record = aggregate(4, 1, &harness).expect("small allocation must succeed");
    assert!(record.mean_read_seconds >= 0.0);
}
