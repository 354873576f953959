//! Table Reconciler — cleans each raw table and inner-joins on match key.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::columns::infer_columns;
use crate::config::PipelineConfig;
use crate::model::{
    CleanedRecord, MergedRecord, Metric, MetricSummary, RawTable, ReconInput, ReconMeta,
    ReconResult, ReconSummary,
};
use crate::normalize::normalize;
use crate::sanitize::sanitize;

/// One metric table after cleaning, with its diagnostics.
#[derive(Debug)]
pub struct CleanedTable {
    pub records: Vec<CleanedRecord>,
    pub summary: MetricSummary,
}

/// Clean one raw table: infer columns, derive match keys, sanitize values,
/// drop blank/excluded/duplicate/value-less rows. Order of surviving records
/// follows the input table, so downstream output is deterministic.
pub fn clean_table(
    table: &RawTable,
    config: &PipelineConfig,
    excluded_keys: &HashSet<String>,
) -> CleanedTable {
    let inferred = infer_columns(table, &config.inference);

    let mut summary = MetricSummary {
        raw_rows: table.rows.len(),
        column_fallback: inferred.fallback,
        ..MetricSummary::default()
    };

    let mut seen_keys: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for row in 0..table.rows.len() {
        let display_name = table.cell(row, inferred.name_col).trim().to_string();
        let match_key = normalize(&display_name);

        if match_key.is_empty() {
            summary.dropped_blank_name += 1;
            continue;
        }
        if excluded_keys.contains(&match_key) {
            summary.dropped_excluded += 1;
            continue;
        }

        let value = match sanitize(table.cell(row, inferred.value_col)) {
            Some(v) => v,
            None => {
                summary.dropped_missing_value += 1;
                continue;
            }
        };

        // First occurrence of a key wins.
        if !seen_keys.insert(match_key.clone()) {
            summary.dropped_duplicate += 1;
            continue;
        }

        records.push(CleanedRecord {
            display_name,
            match_key,
            value,
        });
    }

    summary.cleaned = records.len();
    CleanedTable { records, summary }
}

/// Reconcile the three raw metric tables into merged country records.
///
/// Infallible: every malformed cell is recovered locally and counted. An
/// empty cleaned set yields zero merged records and is reported through
/// `summary.empty_metrics`, not as an error.
pub fn reconcile(config: &PipelineConfig, input: &ReconInput) -> ReconResult {
    let excluded_keys: HashSet<String> = config
        .exclude
        .names
        .iter()
        .map(|n| normalize(n))
        .filter(|k| !k.is_empty())
        .collect();

    static EMPTY: RawTable = RawTable {
        columns: Vec::new(),
        rows: Vec::new(),
    };

    let mut cleaned: BTreeMap<Metric, CleanedTable> = BTreeMap::new();
    for metric in Metric::ALL {
        let table = input.tables.get(&metric).unwrap_or(&EMPTY);
        cleaned.insert(metric, clean_table(table, config, &excluded_keys));
    }

    let empty_metrics: Vec<Metric> = Metric::ALL
        .into_iter()
        .filter(|m| cleaned[m].records.is_empty())
        .collect();

    // Key -> value lookups for the secondary metrics.
    let by_key: BTreeMap<Metric, HashMap<&str, f64>> = cleaned
        .iter()
        .map(|(metric, table)| {
            let map = table
                .records
                .iter()
                .map(|r| (r.match_key.as_str(), r.value))
                .collect();
            (*metric, map)
        })
        .collect();

    // Strict inner join, iterated in primary-table order: a country survives
    // only if every metric carries a non-dropped record for its key. The
    // display name comes from the primary table.
    let primary = Metric::primary();
    let mut records = Vec::new();
    for rec in &cleaned[&primary].records {
        let life = by_key[&Metric::LifeExpectancy].get(rec.match_key.as_str());
        let literacy = by_key[&Metric::Literacy].get(rec.match_key.as_str());
        if let (Some(&life), Some(&literacy)) = (life, literacy) {
            records.push(MergedRecord {
                match_key: rec.match_key.clone(),
                country: rec.display_name.clone(),
                gdp: rec.value,
                life_expectancy: life,
                literacy,
            });
        }
    }

    let merged_keys: HashSet<&str> = records.iter().map(|r| r.match_key.as_str()).collect();

    let mut metrics = BTreeMap::new();
    for (metric, table) in cleaned {
        let mut summary = table.summary;
        summary.join_excluded = table
            .records
            .iter()
            .filter(|r| !merged_keys.contains(r.match_key.as_str()))
            .count();
        metrics.insert(metric, summary);
    }

    ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary: ReconSummary {
            merged: records.len(),
            metrics,
            empty_metrics,
        },
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig::from_toml(
            r#"
name = "Test"

[metrics.gdp]
file = "gdp.csv"
[metrics.life_expectancy]
file = "life.csv"
[metrics.literacy]
file = "literacy.csv"
"#,
        )
        .unwrap()
    }

    fn two_col(rows: &[(&str, &str)]) -> RawTable {
        RawTable::new(
            vec!["Country".into(), "Value".into()],
            rows.iter()
                .map(|(n, v)| vec![n.to_string(), v.to_string()])
                .collect(),
        )
    }

    fn input(gdp: RawTable, life: RawTable, literacy: RawTable) -> ReconInput {
        ReconInput {
            tables: BTreeMap::from([
                (Metric::Gdp, gdp),
                (Metric::LifeExpectancy, life),
                (Metric::Literacy, literacy),
            ]),
        }
    }

    #[test]
    fn clean_drops_world_and_placeholders() {
        let table = two_col(&[
            ("World", "12,000"),
            ("Japan[5]", "33,815"),
            ("Chad", "—"),
            ("", "99"),
        ]);
        let excluded = HashSet::from([normalize("World")]);
        let cleaned = clean_table(&table, &config(), &excluded);

        assert_eq!(cleaned.records.len(), 1);
        assert_eq!(cleaned.records[0].display_name, "Japan[5]");
        assert_eq!(cleaned.records[0].match_key, "japan");
        assert_eq!(cleaned.summary.dropped_excluded, 1);
        assert_eq!(cleaned.summary.dropped_missing_value, 1);
        assert_eq!(cleaned.summary.dropped_blank_name, 1);
    }

    #[test]
    fn clean_keeps_first_duplicate() {
        let table = two_col(&[("Japan", "100"), ("japan", "200"), ("Chad", "50")]);
        let cleaned = clean_table(&table, &config(), &HashSet::new());

        assert_eq!(cleaned.records.len(), 2);
        assert_eq!(cleaned.records[0].display_name, "Japan");
        assert_eq!(cleaned.records[0].value, 100.0);
        assert_eq!(cleaned.summary.dropped_duplicate, 1);
    }

    #[test]
    fn join_intersects_on_match_key() {
        let gdp = two_col(&[("Japan", "$33,815"), ("Chad", "$716"), ("Peru", "$7,126")]);
        let life = two_col(&[("Japan[5]", "84.7"), ("Peru", "76.5"), ("Oman", "73.9")]);
        let literacy = two_col(&[("Peru", "94.5%"), ("Japan", "99%")]);

        let result = reconcile(&config(), &input(gdp, life, literacy));

        assert_eq!(result.summary.merged, 2);
        // Primary-table order: Japan before Peru.
        assert_eq!(result.records[0].country, "Japan");
        assert_eq!(result.records[0].life_expectancy, 84.7);
        assert_eq!(result.records[0].literacy, 99.0);
        assert_eq!(result.records[1].country, "Peru");

        // Chad excluded from gdp's side, Oman from life's side.
        assert_eq!(result.summary.metrics[&Metric::Gdp].join_excluded, 1);
        assert_eq!(result.summary.metrics[&Metric::LifeExpectancy].join_excluded, 1);
        assert_eq!(result.summary.metrics[&Metric::Literacy].join_excluded, 0);
        assert!(result.summary.empty_metrics.is_empty());
    }

    #[test]
    fn display_name_comes_from_primary_table() {
        let gdp = two_col(&[("Côte d'Ivoire", "2,486")]);
        let life = two_col(&[("Cote dIvoire", "58.6")]);
        let literacy = two_col(&[("COTE D'IVOIRE", "89.9")]);

        let result = reconcile(&config(), &input(gdp, life, literacy));
        assert_eq!(result.summary.merged, 1);
        assert_eq!(result.records[0].country, "Côte d'Ivoire");
    }

    #[test]
    fn join_size_bounded_by_smallest_cleaned_set() {
        let gdp = two_col(&[("A1x", "1"), ("B2x", "2"), ("C3x", "3")]);
        let life = two_col(&[("A1x", "1"), ("B2x", "2")]);
        let literacy = two_col(&[("A1x", "1")]);

        let result = reconcile(&config(), &input(gdp, life, literacy));
        assert_eq!(result.summary.merged, 1);
        assert_eq!(result.records[0].match_key, "a1x");
    }

    #[test]
    fn empty_metric_reported_not_fatal() {
        let gdp = two_col(&[("Japan", "33,815")]);
        let life = two_col(&[("Japan", "84.7")]);
        let literacy = two_col(&[]);

        let result = reconcile(&config(), &input(gdp, life, literacy));
        assert_eq!(result.summary.merged, 0);
        assert!(result.records.is_empty());
        assert_eq!(result.summary.empty_metrics, vec![Metric::Literacy]);
    }

    #[test]
    fn missing_table_treated_as_empty() {
        let result = reconcile(
            &config(),
            &ReconInput {
                tables: BTreeMap::new(),
            },
        );
        assert_eq!(result.summary.merged, 0);
        assert_eq!(result.summary.empty_metrics.len(), 3);
    }

    #[test]
    fn deterministic_across_runs() {
        let make = || {
            input(
                two_col(&[("Peru", "7,126"), ("Japan", "33,815"), ("Oman", "21,265")]),
                two_col(&[("Oman", "73.9"), ("Japan", "84.7"), ("Peru", "76.5")]),
                two_col(&[("Japan", "99"), ("Peru", "94.5"), ("Oman", "95.7")]),
            )
        };
        let a = reconcile(&config(), &make());
        let b = reconcile(&config(), &make());

        let keys = |r: &ReconResult| -> Vec<String> {
            r.records.iter().map(|m| m.match_key.clone()).collect()
        };
        assert_eq!(keys(&a), keys(&b));
        // Primary order preserved.
        assert_eq!(keys(&a), vec!["peru", "japan", "oman"]);
    }
}
