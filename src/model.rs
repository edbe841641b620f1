use serde::{Deserialize, Serialize};

pub const FULL_SCALE_SIZE: &str = "full";

/// One benchmark row: a dataset size run at a single `ef_search` setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    pub size_category: String,
    pub chunk_count: u64,
    pub search_breadth: u32,
    pub indexing_time_minutes: f64,
    pub throughput_per_minute: f64,
    pub ram_peak_gb: f64,
    pub disk_usage_gb: f64,
    pub p95_latency_ms: f64,
    pub recall_at_10: f64,
    pub origin: String,
}

/// Records from every loaded source, in source order and then row order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<MeasurementRecord>,
}

impl Dataset {
    pub fn new(records: Vec<MeasurementRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn size_categories(&self) -> Vec<&str> {
        let mut seen = Vec::<&str>::new();
        for record in &self.records {
            if !seen.contains(&record.size_category.as_str()) {
                seen.push(&record.size_category);
            }
        }
        seen
    }

    pub fn search_breadths(&self) -> Vec<u32> {
        let mut seen = Vec::<u32>::new();
        for record in &self.records {
            if !seen.contains(&record.search_breadth) {
                seen.push(record.search_breadth);
            }
        }
        seen
    }

    pub fn in_size<'a>(&'a self, size: &'a str) -> impl Iterator<Item = &'a MeasurementRecord> {
        self.records
            .iter()
            .filter(move |record| record.size_category == size)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    AtLeast,
    AtMost,
}

impl Comparison {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::AtLeast => "≥",
            Self::AtMost => "≤",
        }
    }

    pub fn holds(self, actual: f64, limit: f64) -> bool {
        match self {
            Self::AtLeast => actual >= limit,
            Self::AtMost => actual <= limit,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub comparison: Comparison,
    pub limit: f64,
}

impl Bound {
    pub const fn at_least(limit: f64) -> Self {
        Self {
            comparison: Comparison::AtLeast,
            limit,
        }
    }

    pub const fn at_most(limit: f64) -> Self {
        Self {
            comparison: Comparison::AtMost,
            limit,
        }
    }

    pub fn admits(&self, actual: f64) -> bool {
        self.comparison.holds(actual, self.limit)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    pub throughput_min: Bound,
    pub p95_latency_max: Bound,
    pub recall_min: Bound,
    pub disk_max: Bound,
}

impl ThresholdSet {
    /// Production acceptance criteria for the full-scale (100k chunk) run.
    pub const fn production() -> Self {
        Self {
            throughput_min: Bound::at_least(1000.0),
            p95_latency_max: Bound::at_most(120.0),
            recall_min: Bound::at_least(0.85),
            disk_max: Bound::at_most(0.6),
        }
    }

    pub fn bound_for(&self, dimension: Dimension) -> Bound {
        match dimension {
            Dimension::Throughput => self.throughput_min,
            Dimension::P95Latency => self.p95_latency_max,
            Dimension::Recall => self.recall_min,
            Dimension::Disk => self.disk_max,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Throughput,
    P95Latency,
    Recall,
    Disk,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Throughput,
        Dimension::P95Latency,
        Dimension::Recall,
        Dimension::Disk,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Throughput => "Throughput",
            Self::P95Latency => "P95 Latency",
            Self::Recall => "Recall@10",
            Self::Disk => "Disk Usage",
        }
    }

    pub fn value_of(self, record: &MeasurementRecord) -> f64 {
        match self {
            Self::Throughput => record.throughput_per_minute,
            Self::P95Latency => record.p95_latency_ms,
            Self::Recall => record.recall_at_10,
            Self::Disk => record.disk_usage_gb,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionCheck {
    pub dimension: Dimension,
    pub actual: f64,
    pub bound: Bound,
    pub passed: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "NO-GO")]
    NoGo,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Go => "GO",
            Self::NoGo => "NO-GO",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub size_category: String,
    pub representative: MeasurementRecord,
    pub checks: Vec<DimensionCheck>,
    pub verdict: Verdict,
}

impl EvaluationResult {
    pub fn check(&self, dimension: Dimension) -> Option<&DimensionCheck> {
        self.checks
            .iter()
            .find(|check| check.dimension == dimension)
    }
}

/// Best record per objective within one size category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSelection {
    pub size_category: String,
    pub lowest_latency: MeasurementRecord,
    pub best_recall: MeasurementRecord,
    pub best_throughput: MeasurementRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    pub path: String,
    pub origin: String,
    pub status: String,
    pub sha256: Option<String>,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
    pub failure_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRunManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub pattern: String,
    pub report_path: String,
    pub source_count: usize,
    pub loaded_source_count: usize,
    pub record_count: usize,
    pub size_categories: Vec<String>,
    pub verdict: Option<Verdict>,
    pub sources: Vec<SourceEntry>,
    pub warnings: Vec<String>,
}
