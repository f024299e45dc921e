// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! Timed buffer harness: one allocate/write/read measurement cycle.
//!
//! The harness allocates a buffer of `f64` elements, times a full sequential
//! write pass, times a read pass (full or strided per [`ReadStrategy`]), and
//! releases the buffer before returning so the next trial's allocation
//! decision reflects true available headroom.

use std::hint::black_box;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::types::{ReadStrategy, ELEMENT_BYTES};

/// Constant written to every element during the write pass.
const FILL_VALUE: f64 = 1.2345;

/// Elapsed wall-clock times for one successful trial.
///
/// Allocation is all-or-nothing per trial: a trial either produces both
/// timings or neither.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialTiming {
    /// Elapsed time for the full sequential write pass.
    pub write: Duration,
    /// Elapsed time for the read pass.
    pub read: Duration,
}

/// One measurement from a single allocate/write/read cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResult {
    /// Requested buffer size in bytes.
    pub size_bytes: u64,
    /// Timings, present only when allocation succeeded.
    pub timing: Option<TrialTiming>,
}

impl TrialResult {
    /// Whether the trial's allocation succeeded.
    pub fn succeeded(&self) -> bool {
        self.timing.is_some()
    }
}

/// A source of trial measurements.
///
/// The aggregator is written against this trait so that failure handling
/// can be exercised with scripted harnesses in tests.
pub trait Harness {
    /// Run one allocate/write/read cycle for a buffer of `size_bytes`.
    fn measure(&self, size_bytes: u64) -> TrialResult;
}

/// The real in-memory harness.
#[derive(Debug, Clone, Copy)]
pub struct MemoryHarness {
    strategy: ReadStrategy,
}

impl MemoryHarness {
    /// Create a harness with the given read strategy.
    pub fn new(strategy: ReadStrategy) -> Self {
        Self { strategy }
    }

    /// The configured read strategy.
    pub fn strategy(&self) -> ReadStrategy {
        self.strategy
    }
}

impl Default for MemoryHarness {
    fn default() -> Self {
        Self::new(ReadStrategy::Full)
    }
}

impl Harness for MemoryHarness {
    fn measure(&self, size_bytes: u64) -> TrialResult {
        let element_count = (size_bytes / ELEMENT_BYTES) as usize;

        // Fallible allocation: insufficient memory is an expected outcome,
        // not an error. The zero-fill also commits the pages so the timed
        // write pass measures memory traffic rather than first-touch faults.
        let mut buffer: Vec<f64> = Vec::new();
        if buffer.try_reserve_exact(element_count).is_err() {
            debug!(size_bytes, element_count, "buffer allocation failed");
            return TrialResult {
                size_bytes,
                timing: None,
            };
        }
        buffer.resize(element_count, 0.0);

        // Write pass: every element, sequential.
        let start = Instant::now();
        buffer.fill(FILL_VALUE);
        let write = start.elapsed();

        // Read pass: accumulate into a scalar so the loads cannot be elided.
        let stride = self.strategy.stride(element_count);
        let start = Instant::now();
        let mut total = 0.0f64;
        let mut i = 0;
        while i < element_count {
            total += buffer[i];
            i += stride;
        }
        let read = start.elapsed();

        // Force observable use of the accumulated value.
        let total = black_box(total);
        trace!(size_bytes, stride, checksum = total, "read pass complete");

        // Buffer dropped here, before the next trial allocates.
        TrialResult {
            size_bytes,
            timing: Some(TrialTiming { write, read }),
        }
    }
}
