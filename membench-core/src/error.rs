// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! Custom error types for membench.
//!
//! All errors are explicit enum variants - no `Box<dyn Error>` in the
//! library. Allocation failure during a trial is deliberately NOT an error:
//! it is an expected outcome encoded in `TrialResult`, and a failed size
//! must never abort measurement of the remaining sizes.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the membench core.
#[derive(Debug, Error)]
pub enum MemBenchError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid run count: {run_count} (must be >= 1)")]
    InvalidRunCount { run_count: u64 },
}

/// Persistence errors for the text log and CSV result files.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Result file {path} has no usable rows")]
    EmptyResultSet { path: PathBuf },
}

/// Result type alias using MemBenchError.
pub type MemBenchResult<T> = Result<T, MemBenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::EmptyResultSet {
            path: PathBuf::from("results.csv"),
        };
        assert!(err.to_string().contains("results.csv"));
    }

    #[test]
    fn test_error_chain() {
        let storage_err = StorageError::EmptyResultSet {
            path: PathBuf::from("a.csv"),
        };
        let top: MemBenchError = storage_err.into();
        assert!(matches!(top, MemBenchError::Storage(_)));
    }
}
