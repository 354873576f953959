//! Z-score computation and outlier ranking.

use std::cmp::Ordering;

use wellstat_recon::model::{MergedRecord, Metric};

use crate::model::{AnalysisResult, AnalyzedRecord};

/// Cohort mean and population standard deviation for one metric.
/// Undefined (NaN) below 2 records — a single observation has no spread.
#[derive(Debug, Clone, Copy)]
struct Moments {
    mean: f64,
    stddev: f64,
}

fn moments(records: &[MergedRecord], metric: Metric) -> Moments {
    let n = records.len();
    if n < 2 {
        return Moments {
            mean: f64::NAN,
            stddev: f64::NAN,
        };
    }

    let sum: f64 = records.iter().map(|r| r.value(metric)).sum();
    let mean = sum / n as f64;
    let variance: f64 = records
        .iter()
        .map(|r| {
            let d = r.value(metric) - mean;
            d * d
        })
        .sum::<f64>()
        / n as f64;

    Moments {
        mean,
        stddev: variance.sqrt(),
    }
}

/// Compute z-scores and the efficiency gap for the whole cohort, then rank
/// the top-N outliers in both directions.
///
/// The cohort mean/stddev reduction runs over the complete input before any
/// record is scored; records cannot be scored incrementally. Sorting is
/// stable and NaN gaps compare equal, so ties and degenerate cohorts keep
/// the original input order.
pub fn analyze(records: &[MergedRecord], top_n: usize) -> AnalysisResult {
    let gdp_m = moments(records, Metric::Gdp);
    let life_m = moments(records, Metric::LifeExpectancy);
    let literacy_m = moments(records, Metric::Literacy);

    let zscore = |value: f64, m: Moments| (value - m.mean) / m.stddev;

    let analyzed: Vec<AnalyzedRecord> = records
        .iter()
        .map(|r| {
            let gdp_zscore = zscore(r.gdp, gdp_m);
            let life_expectancy_zscore = zscore(r.life_expectancy, life_m);
            let literacy_zscore = zscore(r.literacy, literacy_m);
            AnalyzedRecord {
                country: r.country.clone(),
                gdp: r.gdp,
                life_expectancy: r.life_expectancy,
                literacy: r.literacy,
                gdp_zscore,
                life_expectancy_zscore,
                literacy_zscore,
                efficiency_gap: life_expectancy_zscore - gdp_zscore,
            }
        })
        .collect();

    let mut descending = analyzed.clone();
    descending.sort_by(|a, b| {
        b.efficiency_gap
            .partial_cmp(&a.efficiency_gap)
            .unwrap_or(Ordering::Equal)
    });
    descending.truncate(top_n);

    let mut ascending = analyzed.clone();
    ascending.sort_by(|a, b| {
        a.efficiency_gap
            .partial_cmp(&b.efficiency_gap)
            .unwrap_or(Ordering::Equal)
    });
    ascending.truncate(top_n);

    AnalysisResult {
        records: analyzed,
        positive_outliers: descending,
        negative_outliers: ascending,
    }
}
