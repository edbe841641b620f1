use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{info, warn};

use crate::model::MeasurementRecord;
use crate::util::sha256_hex;

pub(super) const REQUIRED_COLUMNS: [&str; 9] = [
    "size",
    "chunks_count",
    "ef_search",
    "indexing_time_min",
    "throughput_chunks_per_min",
    "ram_max_gb",
    "qdrant_disk_gb",
    "p95_latency_ms",
    "recall_at_10",
];

#[derive(Debug, Deserialize)]
struct CsvRow {
    size: String,
    chunks_count: u64,
    ef_search: u32,
    indexing_time_min: f64,
    throughput_chunks_per_min: f64,
    ram_max_gb: f64,
    qdrant_disk_gb: f64,
    p95_latency_ms: f64,
    recall_at_10: f64,
}

#[derive(Debug, Clone)]
pub(super) struct RowIssue {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub(super) struct LoadedSource {
    pub path: PathBuf,
    pub origin: String,
    pub sha256: String,
    pub records: Vec<MeasurementRecord>,
    pub skipped_rows: Vec<RowIssue>,
}

#[derive(Debug, Clone)]
pub(super) struct FailedSource {
    pub path: PathBuf,
    pub origin: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub(super) struct LoadReport {
    pub loaded: Vec<LoadedSource>,
    pub failed: Vec<FailedSource>,
}

impl LoadReport {
    pub fn source_count(&self) -> usize {
        self.loaded.len() + self.failed.len()
    }
}

/// Resolves the input pattern to regular files, sorted by path.
pub(super) fn discover_sources(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries =
        glob::glob(pattern).with_context(|| format!("invalid input pattern: {pattern}"))?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(err) => {
                warn!(path = %err.path().display(), error = %err, "skipping unreadable match");
            }
        }
    }
    paths.sort();

    Ok(paths)
}

pub(super) fn load_sources(paths: &[PathBuf]) -> LoadReport {
    let mut report = LoadReport::default();

    for path in paths {
        let origin = origin_for(path);
        match load_source(path, &origin) {
            Ok(source) => {
                info!(
                    path = %path.display(),
                    rows = source.records.len(),
                    skipped_rows = source.skipped_rows.len(),
                    "loaded benchmark source"
                );
                report.loaded.push(source);
            }
            Err(err) => {
                let reason = format!("{err:#}");
                warn!(path = %path.display(), error = %reason, "failed to load benchmark source");
                report.failed.push(FailedSource {
                    path: path.clone(),
                    origin,
                    reason,
                });
            }
        }
    }

    report
}

pub(super) fn origin_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub(super) fn load_source(path: &Path, origin: &str) -> Result<LoadedSource> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let (records, skipped_rows) = parse_measurements(&raw, origin)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    for issue in &skipped_rows {
        warn!(
            origin = %origin,
            line = issue.line,
            reason = %issue.reason,
            "skipping invalid benchmark row"
        );
    }

    Ok(LoadedSource {
        path: path.to_path_buf(),
        origin: origin.to_string(),
        sha256: sha256_hex(&raw),
        records,
        skipped_rows,
    })
}

pub(super) fn parse_measurements(
    raw: &[u8],
    origin: &str,
) -> Result<(Vec<MeasurementRecord>, Vec<RowIssue>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw);

    let headers = reader.headers().context("failed to read header row")?.clone();
    let missing = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .copied()
        .collect::<Vec<&str>>();
    if !missing.is_empty() {
        bail!("missing required column(s): {}", missing.join(", "));
    }

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(err) if err.is_io_error() => {
                return Err(err).context("i/o error while reading rows");
            }
            Err(err) => {
                skipped.push(RowIssue {
                    line: err.position().map(|pos| pos.line()).unwrap_or_default(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let line = row.position().map(|pos| pos.line()).unwrap_or_default();
        let parsed = row
            .deserialize::<CsvRow>(Some(&headers))
            .map_err(anyhow::Error::from)
            .and_then(|csv_row| validate_row(csv_row, origin));
        match parsed {
            Ok(record) => records.push(record),
            Err(err) => skipped.push(RowIssue {
                line,
                reason: err.to_string(),
            }),
        }
    }

    Ok((records, skipped))
}

fn validate_row(row: CsvRow, origin: &str) -> Result<MeasurementRecord> {
    if row.size.is_empty() {
        bail!("size label is empty");
    }
    if row.ef_search == 0 {
        bail!("ef_search must be positive");
    }

    let metrics = [
        ("indexing_time_min", row.indexing_time_min),
        ("throughput_chunks_per_min", row.throughput_chunks_per_min),
        ("ram_max_gb", row.ram_max_gb),
        ("qdrant_disk_gb", row.qdrant_disk_gb),
        ("p95_latency_ms", row.p95_latency_ms),
        ("recall_at_10", row.recall_at_10),
    ];
    for (name, value) in metrics {
        if !value.is_finite() || value < 0.0 {
            bail!("{name} must be a finite non-negative number, got {value}");
        }
    }
    if row.recall_at_10 > 1.0 {
        bail!("recall_at_10 must be within [0, 1], got {}", row.recall_at_10);
    }

    Ok(MeasurementRecord {
        size_category: row.size,
        chunk_count: row.chunks_count,
        search_breadth: row.ef_search,
        indexing_time_minutes: row.indexing_time_min,
        throughput_per_minute: row.throughput_chunks_per_min,
        ram_peak_gb: row.ram_max_gb,
        disk_usage_gb: row.qdrant_disk_gb,
        p95_latency_ms: row.p95_latency_ms,
        recall_at_10: row.recall_at_10,
        origin: origin.to_string(),
    })
}
