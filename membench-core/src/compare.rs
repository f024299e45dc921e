// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! Result comparison: align two independently collected result sets by test
//! size and compute per-metric deltas.
//!
//! Inputs may be raw per-trial logs or already-aggregated records; rows are
//! grouped by size and averaged before the join so the join key is unique on
//! both sides. Bandwidth is re-derived from the post-aggregation means,
//! never read from upstream bandwidth columns, so the output is internally
//! consistent regardless of how the inputs were produced.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::bandwidth_gib_s;

/// One input row for comparison.
///
/// Malformed source rows are dropped by the storage loader before they
/// reach this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Test size in MiB (the join key).
    pub size_mib: u64,
    /// Write time in seconds (per-trial or already averaged).
    pub write_seconds: f64,
    /// Read time in seconds (per-trial or already averaged).
    pub read_seconds: f64,
}

/// A/B values and deltas for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    /// Value from set A (the baseline).
    pub a: f64,
    /// Value from set B.
    pub b: f64,
    /// `b - a`.
    pub delta: f64,
    /// `delta / a * 100`; `None` when the baseline is zero or not finite
    /// (an infinite baseline bandwidth comes from a zero mean time). The
    /// sentinel is preserved through serialization (empty CSV field), never
    /// silently turned into an infinity or NaN.
    pub percent: Option<f64>,
}

impl MetricDelta {
    fn between(a: f64, b: f64) -> Self {
        let delta = b - a;
        let percent = if a == 0.0 || !a.is_finite() {
            None
        } else {
            let percent = delta / a * 100.0;
            percent.is_finite().then_some(percent)
        };
        Self {
            a,
            b,
            delta,
            percent,
        }
    }
}

/// One comparison row: four metrics for a size present in both sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// Test size in MiB.
    pub size_mib: u64,
    /// Mean write time in seconds.
    pub write_time: MetricDelta,
    /// Mean read time in seconds.
    pub read_time: MetricDelta,
    /// Write bandwidth in GiB/s, re-derived from the mean times.
    pub write_bandwidth: MetricDelta,
    /// Read bandwidth in GiB/s, re-derived from the mean times.
    pub read_bandwidth: MetricDelta,
}

/// Per-size mean times after pre-aggregation.
#[derive(Debug, Clone, Copy)]
struct MeanTimes {
    write_seconds: f64,
    read_seconds: f64,
}

/// Group rows by size and reduce each group to arithmetic mean times.
/// The BTreeMap keeps sizes in ascending order for the join.
fn pre_aggregate(rows: &[ResultRow]) -> BTreeMap<u64, MeanTimes> {
    let mut sums: BTreeMap<u64, (f64, f64, u64)> = BTreeMap::new();
    for row in rows {
        let entry = sums.entry(row.size_mib).or_insert((0.0, 0.0, 0));
        entry.0 += row.write_seconds;
        entry.1 += row.read_seconds;
        entry.2 += 1;
    }

    sums.into_iter()
        .map(|(size, (write_sum, read_sum, count))| {
            let n = count as f64;
            (
                size,
                MeanTimes {
                    write_seconds: write_sum / n,
                    read_seconds: read_sum / n,
                },
            )
        })
        .collect()
}

/// Inner-join two result sets on test size and compute deltas (B relative
/// to baseline A). Sizes present in only one set are dropped silently.
/// Output is ordered ascending by size.
pub fn compare(set_a: &[ResultRow], set_b: &[ResultRow]) -> Vec<ComparisonRecord> {
    let means_a = pre_aggregate(set_a);
    let means_b = pre_aggregate(set_b);

    let records: Vec<ComparisonRecord> = means_a
        .iter()
        .filter_map(|(&size_mib, a)| {
            let b = means_b.get(&size_mib)?;
            Some(ComparisonRecord {
                size_mib,
                write_time: MetricDelta::between(a.write_seconds, b.write_seconds),
                read_time: MetricDelta::between(a.read_seconds, b.read_seconds),
                write_bandwidth: MetricDelta::between(
                    bandwidth_gib_s(size_mib, a.write_seconds),
                    bandwidth_gib_s(size_mib, b.write_seconds),
                ),
                read_bandwidth: MetricDelta::between(
                    bandwidth_gib_s(size_mib, a.read_seconds),
                    bandwidth_gib_s(size_mib, b.read_seconds),
                ),
            })
        })
        .collect();

    debug!(
        sizes_a = means_a.len(),
        sizes_b = means_b.len(),
        joined = records.len(),
        "comparison complete"
    );
    records
}
