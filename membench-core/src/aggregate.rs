// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! Run aggregation: reduce repeated trials for one size to mean timings
//! and derived bandwidth.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::harness::Harness;
use crate::types::MIB;

/// The reduction of one or more trials sharing the same test size.
///
/// Immutable once built; handed as-is to the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    /// Test size in MiB (the record key).
    pub size_mib: u64,
    /// Arithmetic mean write time over succeeded trials, in seconds.
    pub mean_write_seconds: f64,
    /// Arithmetic mean read time over succeeded trials, in seconds.
    pub mean_read_seconds: f64,
    /// Derived write bandwidth in GiB/s.
    pub write_bandwidth: f64,
    /// Derived read bandwidth in GiB/s.
    pub read_bandwidth: f64,
}

/// Bandwidth in GiB/s for a size in MiB and a mean duration in seconds.
///
/// A zero duration means the pass was immeasurably fast; the result is an
/// explicit `f64::INFINITY` rather than a division error.
pub fn bandwidth_gib_s(size_mib: u64, mean_seconds: f64) -> f64 {
    let size_gib = size_mib as f64 / 1024.0;
    if mean_seconds == 0.0 {
        f64::INFINITY
    } else {
        size_gib / mean_seconds
    }
}

/// Run `run_count` trials of `size_mib` MiB and reduce them to one record.
///
/// Trials run strictly sequentially. The first allocation failure abandons
/// the remaining trials for this size; the record is built from whichever
/// trials succeeded before it. Returns `None` when no trial succeeded, so
/// an out-of-memory size is skipped rather than recorded as zero.
pub fn aggregate(size_mib: u64, run_count: u64, harness: &impl Harness) -> Option<AggregateRecord> {
    debug_assert!(run_count >= 1);

    // A size whose byte count overflows u64 can never be satisfied by any
    // allocator; skip it like any other failed allocation.
    let Some(size_bytes) = size_mib.checked_mul(MIB) else {
        warn!(size_mib, "size in bytes overflows u64, skipping size");
        return None;
    };
    let mut write_times: Vec<Duration> = Vec::with_capacity(run_count as usize);
    let mut read_times: Vec<Duration> = Vec::with_capacity(run_count as usize);

    for run in 0..run_count {
        let trial = harness.measure(size_bytes);
        match trial.timing {
            Some(timing) => {
                write_times.push(timing.write);
                read_times.push(timing.read);
            }
            None => {
                warn!(size_mib, run, "trial allocation failed, abandoning size");
                break;
            }
        }
    }

    if write_times.is_empty() {
        return None;
    }

    let mean_write_seconds = mean_seconds(&write_times);
    let mean_read_seconds = mean_seconds(&read_times);
    debug!(
        size_mib,
        trials = write_times.len(),
        mean_write_seconds,
        mean_read_seconds,
        "aggregated size"
    );

    Some(AggregateRecord {
        size_mib,
        mean_write_seconds,
        mean_read_seconds,
        write_bandwidth: bandwidth_gib_s(size_mib, mean_write_seconds),
        read_bandwidth: bandwidth_gib_s(size_mib, mean_read_seconds),
    })
}

fn mean_seconds(samples: &[Duration]) -> f64 {
    let sum: f64 = samples.iter().map(Duration::as_secs_f64).sum();
    sum / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{TrialResult, TrialTiming};
    use std::cell::RefCell;

    /// Harness that replays a fixed script of trial outcomes.
    struct ScriptedHarness {
        script: RefCell<Vec<Option<TrialTiming>>>,
        calls: RefCell<u64>,
    }

    impl ScriptedHarness {
        fn new(script: Vec<Option<TrialTiming>>) -> Self {
            let mut script = script;
            script.reverse();
            Self {
                script: RefCell::new(script),
                calls: RefCell::new(0),
            }
        }

        fn calls(&self) -> u64 {
            *self.calls.borrow()
        }
    }

    impl Harness for ScriptedHarness {
        fn measure(&self, size_bytes: u64) -> TrialResult {
            *self.calls.borrow_mut() += 1;
            TrialResult {
                size_bytes,
                timing: self.script.borrow_mut().pop().flatten(),
            }
        }
    }

    fn timing(write_s: f64, read_s: f64) -> Option<TrialTiming> {
        Some(TrialTiming {
            write: Duration::from_secs_f64(write_s),
            read: Duration::from_secs_f64(read_s),
        })
    }

    #[test]
    fn test_mean_is_arithmetic_mean() {
        let harness =
            ScriptedHarness::new(vec![timing(1.0, 0.5), timing(3.0, 1.5), timing(2.0, 1.0)]);
        let record = aggregate(1024, 3, &harness).unwrap();

        assert_eq!(record.size_mib, 1024);
        assert!((record.mean_write_seconds - 2.0).abs() < 1e-12);
        assert!((record.mean_read_seconds - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_trial_failure_suppresses_record() {
        let harness = ScriptedHarness::new(vec![None, timing(1.0, 1.0), timing(1.0, 1.0)]);
        assert!(aggregate(8192, 3, &harness).is_none());
        // Remaining trials are abandoned, not retried.
        assert_eq!(harness.calls(), 1);
    }

    #[test]
    fn test_failure_keeps_successful_prefix() {
        let harness = ScriptedHarness::new(vec![timing(1.0, 2.0), timing(3.0, 4.0), None]);
        let record = aggregate(2048, 3, &harness).unwrap();

        assert!((record.mean_write_seconds - 2.0).abs() < 1e-12);
        assert!((record.mean_read_seconds - 3.0).abs() < 1e-12);
        assert_eq!(harness.calls(), 3);
    }

    #[test]
    fn test_bandwidth_derivation() {
        // 1024 MiB is one GiB; 0.5 s means 2 GiB/s.
        assert!((bandwidth_gib_s(1024, 0.5) - 2.0).abs() < 1e-12);
        assert!((bandwidth_gib_s(512, 1.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_duration_bandwidth_is_infinite() {
        assert!(bandwidth_gib_s(1024, 0.0).is_infinite());

        let harness = ScriptedHarness::new(vec![timing(0.0, 0.0)]);
        let record = aggregate(1024, 1, &harness).unwrap();
        assert!(record.write_bandwidth.is_infinite());
        assert!(record.read_bandwidth.is_infinite());
    }

    #[test]
    fn test_overflowing_size_is_skipped_without_trials() {
        // 2^50 MiB does not fit in u64 bytes; the size must be skipped
        // before any trial runs, not wrapped to a bogus buffer size.
        let harness = ScriptedHarness::new(vec![timing(1.0, 1.0)]);
        assert!(aggregate(1u64 << 50, 3, &harness).is_none());
        assert!(aggregate(u64::MAX, 1, &harness).is_none());
        assert_eq!(harness.calls(), 0);
    }

    #[test]
    fn test_single_run() {
        let harness = ScriptedHarness::new(vec![timing(0.25, 0.125)]);
        let record = aggregate(256, 1, &harness).unwrap();
        assert!((record.mean_write_seconds - 0.25).abs() < 1e-12);
        assert_eq!(harness.calls(), 1);
    }
}
