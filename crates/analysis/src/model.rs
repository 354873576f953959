use serde::Serialize;

/// A merged record extended with per-metric z-scores and the efficiency gap.
///
/// Field order is the output-file schema; z-scores and the gap are NaN when
/// the cohort is degenerate (fewer than 2 records) or a metric has zero
/// variance — never silently coerced to zero.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedRecord {
    pub country: String,
    pub gdp: f64,
    pub life_expectancy: f64,
    pub literacy: f64,
    pub gdp_zscore: f64,
    pub life_expectancy_zscore: f64,
    pub literacy_zscore: f64,
    /// `life_expectancy_zscore - gdp_zscore`. Positive: life expectancy runs
    /// ahead of what GDP alone predicts across the cohort; negative: behind.
    pub efficiency_gap: f64,
}

/// Full analyzed set plus the two derived outlier views.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub records: Vec<AnalyzedRecord>,
    pub positive_outliers: Vec<AnalyzedRecord>,
    pub negative_outliers: Vec<AnalyzedRecord>,
}
