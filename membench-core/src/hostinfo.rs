// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! Host identification: CPU, architecture, OS, and RAM headroom.
//!
//! All platform-specific probing lives inside `sysinfo`; the core never
//! branches on platform identity. The collected fields are pass-through
//! annotations on persisted records and are not interpreted anywhere else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sysinfo::System;

/// Host annotations captured once per benchmark invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostInfo {
    /// CPU brand string, e.g. "AMD Ryzen 9 5950X 16-Core Processor".
    pub cpu_label: String,
    /// Machine architecture, e.g. "x86_64".
    pub machine_arch: String,
    /// OS name and version, e.g. "Ubuntu 24.04".
    pub os_label: String,
    /// Total physical RAM in GiB.
    pub total_ram_gib: f64,
    /// RAM available at collection time in GiB.
    pub available_ram_gib: f64,
    /// Collection timestamp (UTC).
    pub timestamp: DateTime<Utc>,
}

impl HostInfo {
    /// Probe the current host.
    pub fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_memory();

        let cpu_label = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| format!("{} processor", std::env::consts::ARCH));

        let os_name = System::name().unwrap_or_else(|| "Unknown".to_string());
        let os_version = System::os_version().unwrap_or_else(|| "Unknown".to_string());

        const GIB: f64 = (1024u64 * 1024 * 1024) as f64;
        Self {
            cpu_label,
            machine_arch: std::env::consts::ARCH.to_string(),
            os_label: format!("{} {}", os_name, os_version),
            total_ram_gib: sys.total_memory() as f64 / GIB,
            available_ram_gib: sys.available_memory() as f64 / GIB,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_populates_fields() {
        let info = HostInfo::collect();
        assert!(!info.cpu_label.is_empty());
        assert!(!info.machine_arch.is_empty());
        assert!(!info.os_label.is_empty());
        assert!(info.total_ram_gib > 0.0);
        assert!(info.available_ram_gib <= info.total_ram_gib);
    }
}
