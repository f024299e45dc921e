// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! `membench run` command - run the benchmark across a set of sizes.

use std::cell::Cell;
use std::path::Path;

use anyhow::ensure;
use membench_core::{
    aggregate, Harness, HostInfo, MemBenchError, MemoryHarness, ReadStrategy, ResultStore,
    TrialResult,
};

use crate::report::Reporter;

/// Harness decorator that narrates each trial as it completes. Keeps all
/// progress output in the presentation layer; the core stays silent.
struct NarratedHarness<'a> {
    inner: MemoryHarness,
    reporter: &'a Reporter,
    size_mib: u64,
    runs: u64,
    completed: Cell<u64>,
}

impl Harness for NarratedHarness<'_> {
    fn measure(&self, size_bytes: u64) -> TrialResult {
        let run = self.completed.get() + 1;
        self.completed.set(run);
        self.reporter.run_started(run, self.runs);

        let trial = self.inner.measure(size_bytes);
        match &trial.timing {
            Some(timing) => self.reporter.trial_finished(timing),
            None => self.reporter.allocation_failed(self.size_mib),
        }
        trial
    }
}

pub fn execute(
    sizes: &[u64],
    runs: u64,
    strategy: ReadStrategy,
    csv_only: bool,
    quiet: bool,
    output_dir: &Path,
) -> anyhow::Result<()> {
    if runs < 1 {
        return Err(MemBenchError::InvalidRunCount { run_count: runs }.into());
    }
    ensure!(!sizes.is_empty(), "at least one test size is required");
    ensure!(
        sizes.iter().all(|&size| size > 0),
        "test sizes must be positive"
    );

    let reporter = Reporter::new(quiet);
    let host = HostInfo::collect();
    let store = ResultStore::new(output_dir);

    reporter.banner();
    reporter.system_info(&host);
    reporter.table_header(runs);

    for &size_mib in sizes {
        reporter.testing(size_mib);

        let harness = NarratedHarness {
            inner: MemoryHarness::new(strategy),
            reporter: &reporter,
            size_mib,
            runs,
            completed: Cell::new(0),
        };

        // An out-of-memory size is skipped; later sizes still run.
        let Some(record) = aggregate(size_mib, runs, &harness) else {
            continue;
        };

        reporter.size_result(&record, &host);
        store.append(&record, &host, csv_only)?;
        tracing::debug!(size_mib, "record persisted");
    }

    let mut files = vec![store.csv_path().display().to_string()];
    if !csv_only {
        files.insert(0, store.text_path().display().to_string());
    }
    reporter.saved(&files);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_small_sizes_end_to_end() {
        let dir = TempDir::new().unwrap();
        execute(&[1, 2], 2, ReadStrategy::Full, false, true, dir.path()).unwrap();

        assert!(dir.path().join(membench_core::storage::RESULTS_CSV_FILE).exists());
        assert!(dir.path().join(membench_core::storage::RESULTS_TEXT_FILE).exists());
    }

    #[test]
    fn test_zero_runs_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(execute(&[1], 0, ReadStrategy::Full, true, true, dir.path()).is_err());
    }

    #[test]
    fn test_zero_size_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(execute(&[0], 1, ReadStrategy::Full, true, true, dir.path()).is_err());
    }
}
