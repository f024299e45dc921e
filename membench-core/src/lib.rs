// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! Membench Core Library
//!
//! Measurement, aggregation, and comparison engine for sustained memory
//! read/write throughput. Provides the timed buffer harness, run
//! aggregation with derived bandwidth, result-set comparison, host
//! identification, and result persistence.
//!
//! Execution is strictly sequential by design: concurrent trials would
//! share cache and memory-bus contention and invalidate the measurement.

pub mod aggregate;
pub mod compare;
pub mod error;
pub mod harness;
pub mod hostinfo;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use aggregate::{aggregate, bandwidth_gib_s, AggregateRecord};
pub use compare::{compare, ComparisonRecord, MetricDelta, ResultRow};
pub use error::{MemBenchError, MemBenchResult, StorageError};
pub use harness::{Harness, MemoryHarness, TrialResult, TrialTiming};
pub use hostinfo::HostInfo;
pub use storage::{load_result_rows, write_comparison, ResultStore};
pub use types::{format_size, ReadStrategy};
