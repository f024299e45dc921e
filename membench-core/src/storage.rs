// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! Result persistence: append-only text log, CSV result file, comparison
//! CSV, and a lenient CSV loader for the comparator.
//!
//! The core hands this module complete records; nothing here recomputes
//! statistics. The loader tolerates foreign result files (different column
//! order, missing header, extra columns) because comparison inputs may come
//! from older versions of the tool or hand-edited logs.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Serialize;
use tracing::{debug, warn};

use crate::aggregate::AggregateRecord;
use crate::compare::{ComparisonRecord, MetricDelta, ResultRow};
use crate::error::StorageError;
use crate::hostinfo::HostInfo;
use crate::types::format_size;

/// Default append-only text log file name.
pub const RESULTS_TEXT_FILE: &str = "memory_benchmark_results.txt";
/// Default CSV results file name.
pub const RESULTS_CSV_FILE: &str = "memory_benchmark_results.csv";
/// Default comparison output file name.
pub const COMPARISON_CSV_FILE: &str = "memory_benchmark_comparison.csv";

/// One persisted CSV row: the aggregate record plus host annotations.
/// Write-only: reading back goes through the lenient loader, which must
/// also accept foreign files.
#[derive(Debug, Serialize)]
struct CsvRow {
    #[serde(rename = "Test Size (MB)")]
    size_mib: u64,
    #[serde(rename = "Write Time (s)")]
    write_seconds: f64,
    #[serde(rename = "Read Time (s)")]
    read_seconds: f64,
    #[serde(rename = "Write Bandwidth (GiB/s)")]
    write_bandwidth: f64,
    #[serde(rename = "Read Bandwidth (GiB/s)")]
    read_bandwidth: f64,
    #[serde(rename = "RAM Total (GB)")]
    ram_total_gib: f64,
    #[serde(rename = "RAM Available (GB)")]
    ram_available_gib: f64,
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "CPU")]
    cpu: String,
    #[serde(rename = "Machine")]
    machine: String,
    #[serde(rename = "OS")]
    os: String,
}

/// Writer for the benchmark result files.
pub struct ResultStore {
    csv_path: PathBuf,
    text_path: PathBuf,
}

impl ResultStore {
    /// Store using the default file names inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            csv_path: dir.join(RESULTS_CSV_FILE),
            text_path: dir.join(RESULTS_TEXT_FILE),
        }
    }

    /// Store with explicit file paths.
    pub fn with_paths(csv_path: impl Into<PathBuf>, text_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            text_path: text_path.into(),
        }
    }

    /// Path of the CSV results file.
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Path of the text log file.
    pub fn text_path(&self) -> &Path {
        &self.text_path
    }

    /// Append one aggregate record to the CSV file (and, unless `csv_only`,
    /// to the text log). The CSV header is written only when the file does
    /// not exist yet, so repeated runs accumulate rows in one file.
    pub fn append(
        &self,
        record: &AggregateRecord,
        host: &HostInfo,
        csv_only: bool,
    ) -> Result<(), StorageError> {
        self.append_csv(record, host)?;
        if !csv_only {
            self.append_text(record, host)?;
        }
        Ok(())
    }

    fn append_csv(&self, record: &AggregateRecord, host: &HostInfo) -> Result<(), StorageError> {
        let write_header = !self.csv_path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.csv_path)
            .map_err(|source| StorageError::Io {
                path: self.csv_path.clone(),
                source,
            })?;

        let mut writer = WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);

        let row = CsvRow {
            size_mib: record.size_mib,
            write_seconds: record.mean_write_seconds,
            read_seconds: record.mean_read_seconds,
            write_bandwidth: record.write_bandwidth,
            read_bandwidth: record.read_bandwidth,
            ram_total_gib: host.total_ram_gib,
            ram_available_gib: host.available_ram_gib,
            timestamp: host.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            cpu: host.cpu_label.clone(),
            machine: host.machine_arch.clone(),
            os: host.os_label.clone(),
        };

        writer.serialize(row).map_err(|source| StorageError::Csv {
            path: self.csv_path.clone(),
            source,
        })?;
        writer.flush().map_err(|source| StorageError::Io {
            path: self.csv_path.clone(),
            source,
        })?;

        debug!(path = %self.csv_path.display(), size_mib = record.size_mib, "appended CSV row");
        Ok(())
    }

    fn append_text(&self, record: &AggregateRecord, host: &HostInfo) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.text_path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.text_path)
            .map_err(io_err)?;

        let block = format!(
            "Test size: {}\n\
             Write time: {:.3} seconds\n\
             Read time: {:.3} seconds\n\
             Write bandwidth: {:.2} GiB/s\n\
             Read bandwidth: {:.2} GiB/s\n\
             RAM total: {:.2} GB\n\
             RAM available: {:.2} GB\n\
             Timestamp: {}\n\
             CPU: {}\n\
             Machine: {}\n\
             OS: {}\n\
             {}\n",
            format_size(record.size_mib),
            record.mean_write_seconds,
            record.mean_read_seconds,
            record.write_bandwidth,
            record.read_bandwidth,
            host.total_ram_gib,
            host.available_ram_gib,
            host.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            host.cpu_label,
            host.machine_arch,
            host.os_label,
            "-".repeat(40),
        );

        file.write_all(block.as_bytes()).map_err(io_err)
    }
}

/// Column indices for size / write time / read time.
type Columns = (usize, usize, usize);

/// Recognize a header row by column names. Returns `None` when the record
/// does not look like a header (e.g. the file starts with data).
fn detect_columns(header: &StringRecord) -> Option<Columns> {
    let mut size = None;
    let mut write = None;
    let mut read = None;

    for (idx, field) in header.iter().enumerate() {
        let name = field.to_ascii_lowercase();
        let is_bandwidth = name.contains("bandwidth") || name.contains("bw");
        if name.contains("size") && size.is_none() {
            size = Some(idx);
        } else if name.contains("write") && !is_bandwidth && write.is_none() {
            write = Some(idx);
        } else if name.contains("read") && !is_bandwidth && read.is_none() {
            read = Some(idx);
        }
    }

    Some((size?, write?, read?))
}

/// Parse one data row; `None` means the row is malformed and gets dropped.
fn parse_row(record: &StringRecord, columns: Columns) -> Option<ResultRow> {
    let (size_idx, write_idx, read_idx) = columns;

    let size: f64 = record.get(size_idx)?.trim().parse().ok()?;
    if !size.is_finite() || size < 0.0 {
        return None;
    }
    let write_seconds: f64 = record.get(write_idx)?.trim().parse().ok()?;
    let read_seconds: f64 = record.get(read_idx)?.trim().parse().ok()?;

    Some(ResultRow {
        size_mib: size.round() as u64,
        write_seconds,
        read_seconds,
    })
}

/// Load comparison input rows from a CSV result file.
///
/// Accepts raw per-trial logs as well as aggregated result files: column
/// positions are resolved from the header when one is present, otherwise
/// the first three columns are taken as size / write time / read time.
/// Rows that fail numeric parsing are dropped with a warning; only a file
/// with no usable rows at all is an error.
pub fn load_result_rows(path: impl AsRef<Path>) -> Result<Vec<ResultRow>, StorageError> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| StorageError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = Vec::new();
    let mut columns: Columns = (0, 1, 2);
    let mut dropped = 0usize;

    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| StorageError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        if idx == 0 {
            if let Some(detected) = detect_columns(&record) {
                columns = detected;
                continue;
            }
        }

        match parse_row(&record, columns) {
            Some(row) => rows.push(row),
            None => {
                dropped += 1;
                warn!(path = %path.display(), row = idx + 1, "dropping malformed result row");
            }
        }
    }

    if rows.is_empty() {
        return Err(StorageError::EmptyResultSet {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), loaded = rows.len(), dropped, "loaded result rows");
    Ok(rows)
}

/// Write comparison records to a CSV file: the size key plus four metrics,
/// each as {A, B, Delta, Delta %}. An undefined percentage (zero baseline)
/// is written as an empty field, never as an infinity.
pub fn write_comparison(
    path: impl AsRef<Path>,
    records: &[ComparisonRecord],
) -> Result<(), StorageError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    let mut header = vec!["Test Size (MB)".to_string()];
    for metric in [
        "Write Time (s)",
        "Read Time (s)",
        "Write Bandwidth (GiB/s)",
        "Read Bandwidth (GiB/s)",
    ] {
        header.push(format!("{} A", metric));
        header.push(format!("{} B", metric));
        header.push(format!("{} Delta", metric));
        header.push(format!("{} Delta %", metric));
    }

    let csv_err = |source| StorageError::Csv {
        path: path.to_path_buf(),
        source,
    };

    writer.write_record(&header).map_err(csv_err)?;
    for record in records {
        let mut fields = vec![record.size_mib.to_string()];
        for metric in [
            &record.write_time,
            &record.read_time,
            &record.write_bandwidth,
            &record.read_bandwidth,
        ] {
            push_metric(&mut fields, metric);
        }
        writer.write_record(&fields).map_err(csv_err)?;
    }

    writer.flush().map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn push_metric(fields: &mut Vec<String>, metric: &MetricDelta) {
    fields.push(numeric_field(metric.a));
    fields.push(numeric_field(metric.b));
    fields.push(numeric_field(metric.delta));
    fields.push(match metric.percent {
        Some(percent) => numeric_field(percent),
        None => String::new(),
    });
}

/// Infinity is a legitimate explicit sentinel (immeasurably fast pass);
/// NaN is not computable and becomes an empty field instead.
fn numeric_field(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}
