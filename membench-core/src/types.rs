// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! Shared types and unit helpers.
//!
//! Sizes are carried in binary mebibytes (MiB) at the record level; the
//! harness operates on raw byte counts. Bandwidth is always GiB/s with
//! 1 GiB = 1024 MiB.

use serde::{Deserialize, Serialize};

/// Bytes per mebibyte.
pub const MIB: u64 = 1024 * 1024;

/// Width of one buffer element (`f64`).
pub const ELEMENT_BYTES: u64 = 8;

/// How the read pass walks the buffer.
///
/// `Sampled` exists only for comparability with legacy result logs: its
/// read time is nearly constant regardless of buffer size, so sampled
/// results must never be compared against `Full` results as if they were
/// commensurate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadStrategy {
    /// Touch every element; read time scales with buffer size.
    #[default]
    Full,
    /// Touch ~100,000 elements at a fixed stride (legacy mode).
    Sampled,
}

impl ReadStrategy {
    /// Target sample count for the `Sampled` strategy.
    pub const TARGET_SAMPLES: usize = 100_000;

    /// Stride between touched elements for a buffer of `element_count`
    /// elements. `Full` always walks with stride 1.
    pub fn stride(self, element_count: usize) -> usize {
        match self {
            ReadStrategy::Full => 1,
            ReadStrategy::Sampled => (element_count / Self::TARGET_SAMPLES).max(1),
        }
    }
}

impl std::fmt::Display for ReadStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadStrategy::Full => write!(f, "full"),
            ReadStrategy::Sampled => write!(f, "sampled"),
        }
    }
}

/// Human-friendly label for a test size given in MiB.
///
/// Sizes below 1024 MiB render as "512 MB", larger ones as "2.0 GB"
/// (matching the labels used in existing result logs).
pub fn format_size(size_mib: u64) -> String {
    if size_mib < 1024 {
        format!("{} MB", size_mib)
    } else {
        format!("{:.1} GB", size_mib as f64 / 1024.0)
    }
}
