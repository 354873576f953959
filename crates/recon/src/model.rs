use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// The fixed set of per-country statistics this pipeline reconciles.
///
/// Order matters: the first metric in [`Metric::ALL`] is the primary source,
/// and the merged record's display name is taken from its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Gdp,
    LifeExpectancy,
    Literacy,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Gdp, Metric::LifeExpectancy, Metric::Literacy];

    /// The metric whose table supplies the surviving display name.
    pub fn primary() -> Metric {
        Self::ALL[0]
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gdp => write!(f, "gdp"),
            Self::LifeExpectancy => write!(f, "life_expectancy"),
            Self::Literacy => write!(f, "literacy"),
        }
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A raw scraped table. Column labels and order carry no schema contract;
/// rows may be ragged (missing trailing cells read as empty).
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Cell at (row, col), or empty string for a ragged/short row.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Pre-loaded raw tables, one per metric.
pub struct ReconInput {
    pub tables: BTreeMap<Metric, RawTable>,
}

// ---------------------------------------------------------------------------
// Cleaned + merged records
// ---------------------------------------------------------------------------

/// One entity from one metric table after cleaning.
/// `match_key` is a pure function of `display_name`; `value` is always present
/// (rows with an absent value are dropped before this exists).
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRecord {
    pub display_name: String,
    pub match_key: String,
    pub value: f64,
}

/// One country surviving the strict inner join across all three metrics.
/// `country` is the display name from the primary (GDP) table.
#[derive(Debug, Clone, Serialize)]
pub struct MergedRecord {
    pub match_key: String,
    pub country: String,
    pub gdp: f64,
    pub life_expectancy: f64,
    pub literacy: f64,
}

impl MergedRecord {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Gdp => self.gdp,
            Metric::LifeExpectancy => self.life_expectancy,
            Metric::Literacy => self.literacy,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

/// Per-metric cleaning and join diagnostics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricSummary {
    pub raw_rows: usize,
    pub cleaned: usize,
    pub dropped_blank_name: usize,
    pub dropped_missing_value: usize,
    pub dropped_excluded: usize,
    pub dropped_duplicate: usize,
    /// Cleaned keys that did not survive the inner join.
    pub join_excluded: usize,
    /// True when column inference fell back to positional defaults.
    pub column_fallback: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub merged: usize,
    pub metrics: BTreeMap<Metric, MetricSummary>,
    /// Metrics whose cleaned set was empty. Non-empty here means the join
    /// yielded zero records — a distinct, non-fatal outcome.
    pub empty_metrics: Vec<Metric>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub records: Vec<MergedRecord>,
}
