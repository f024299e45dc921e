// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! `membench compare` command - compare two result files.

use std::path::Path;

use membench_core::{compare, format_size, load_result_rows, write_comparison, MetricDelta};

pub fn execute(baseline: &Path, candidate: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    tracing::debug!(baseline = %baseline.display(), candidate = %candidate.display(), "loading result sets");
    let set_a = load_result_rows(baseline)?;
    let set_b = load_result_rows(candidate)?;
    let records = compare(&set_a, &set_b);

    if records.is_empty() {
        println!(
            "No common test sizes between {} and {}",
            baseline.display(),
            candidate.display()
        );
        return Ok(());
    }

    println!(
        "Comparison of {} (B) against baseline {} (A), {} common size(s)",
        candidate.display(),
        baseline.display(),
        records.len()
    );
    println!();
    println!(
        "{:<10}{:<28}{:<28}{:<28}{:<28}",
        "Size", "Write Time (s)", "Read Time (s)", "Write BW (GiB/s)", "Read BW (GiB/s)"
    );
    println!("{}", "-".repeat(122));

    for record in &records {
        println!(
            "{:<10}{:<28}{:<28}{:<28}{:<28}",
            format_size(record.size_mib),
            format_metric(&record.write_time),
            format_metric(&record.read_time),
            format_metric(&record.write_bandwidth),
            format_metric(&record.read_bandwidth)
        );
    }

    if let Some(path) = output {
        write_comparison(path, &records)?;
        println!();
        println!("Comparison saved to {}", path.display());
    }

    Ok(())
}

/// "0.500 -> 0.250 (-50.0%)"; an undefined percentage renders as "n/a".
fn format_metric(metric: &MetricDelta) -> String {
    let percent = match metric.percent {
        Some(percent) => format!("{:+.1}%", percent),
        None => "n/a".to_string(),
    };
    format!("{:.3} -> {:.3} ({})", metric.a, metric.b, percent)
}
