// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! Progress narration and result tables for the terminal.
//!
//! Presentation only: nothing in here computes statistics. `--quiet`
//! switches to plain uncolored output for CI logs.

use crossterm::style::Stylize;
use membench_core::{format_size, AggregateRecord, HostInfo, TrialTiming};

/// Console reporter for benchmark progress.
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn banner(&self) {
        if self.quiet {
            println!("\nMemory Benchmark Results");
        } else {
            println!("{}", "\n📊 Memory Benchmark Results".magenta().bold());
        }
        println!("{}", "=".repeat(40));
    }

    pub fn system_info(&self, host: &HostInfo) {
        let line = format!(
            "System Info: CPU: {} | Machine: {} | OS: {}",
            host.cpu_label, host.machine_arch, host.os_label
        );
        if self.quiet {
            println!("{}", line);
        } else {
            println!("{}", line.yellow());
        }
    }

    pub fn table_header(&self, runs: u64) {
        let runs_info = if runs > 1 {
            format!(" (average of {} runs)", runs)
        } else {
            String::new()
        };
        println!(
            "{:<10}{:<14}{:<14}{:<16}{:<16}{:<12}{:<12}{}",
            "Size",
            "Write (s)",
            "Read (s)",
            "Write (GiB/s)",
            "Read (GiB/s)",
            "Total RAM",
            "Available",
            runs_info
        );
        println!("{}", "-".repeat(94 + runs_info.len()));
    }

    pub fn testing(&self, size_mib: u64) {
        println!();
        let msg = format!("Testing {}...", format_size(size_mib));
        if self.quiet {
            println!("{}", msg);
        } else {
            println!("{}", format!("🧪 {}", msg).blue());
        }
    }

    pub fn run_started(&self, run: u64, runs: u64) {
        if runs > 1 && !self.quiet {
            println!("  Run {} of {}", run, runs);
        }
    }

    pub fn trial_finished(&self, timing: &TrialTiming) {
        let msg = format!(
            "  write {:.3} s, read {:.3} s",
            timing.write.as_secs_f64(),
            timing.read.as_secs_f64()
        );
        if self.quiet {
            println!("{}", msg);
        } else {
            println!("{}", msg.green());
        }
    }

    pub fn allocation_failed(&self, size_mib: u64) {
        let msg = format!("Skipping {} (not enough memory)", format_size(size_mib));
        if self.quiet {
            println!("{}", msg);
        } else {
            println!("{}", format!("⏭️  {}", msg).red());
        }
    }

    pub fn size_result(&self, record: &AggregateRecord, host: &HostInfo) {
        let mut line = format!(
            "{:<10}{:<14.3}{:<14.3}{:<16.2}{:<16.2}{:<12.2}{:<12.2}",
            format_size(record.size_mib),
            record.mean_write_seconds,
            record.mean_read_seconds,
            record.write_bandwidth,
            record.read_bandwidth,
            host.total_ram_gib,
            host.available_ram_gib
        );
        if !self.quiet {
            line.push_str(" 📝");
        }
        println!("{}", line);
    }

    pub fn saved(&self, files: &[String]) {
        println!();
        let msg = format!("Results saved to {}", files.join(" and "));
        if self.quiet {
            println!("{}", msg);
        } else {
            println!("{}", format!("✅ {}", msg).magenta().bold());
        }
    }
}
