//! `wellstat run` / `wellstat validate` — the thin driver around the engine.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use wellstat_analysis::analyze::analyze;
use wellstat_analysis::model::AnalysisResult;
use wellstat_io::{read_raw_table, write_analyzed, write_merged};
use wellstat_recon::model::{Metric, ReconInput, ReconResult};
use wellstat_recon::{reconcile, PipelineConfig};

use crate::exit_codes::{EXIT_EMPTY_JOIN, EXIT_INVALID_CONFIG, EXIT_RUNTIME};
use crate::CliError;

/// Result files written into the output directory.
const ANALYZED_FILE: &str = "analyzed_data.csv";
const POSITIVE_FILE: &str = "positive_outliers.csv";
const NEGATIVE_FILE: &str = "negative_outliers.csv";
/// Intermediate merged table, written when a processed dir is configured.
const MERGED_FILE: &str = "master_country_stats.csv";

/// Full result envelope for `--json` output.
#[derive(Serialize)]
struct RunOutput<'a> {
    recon: &'a ReconResult,
    analysis: &'a AnalysisResult,
}

fn runtime_err(e: impl std::fmt::Display) -> CliError {
    CliError::new(EXIT_RUNTIME, e.to_string())
}

pub fn cmd_run(
    config_path: PathBuf,
    json: bool,
    output_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::new(EXIT_RUNTIME, format!("cannot read config: {e}")))?;
    let config = PipelineConfig::from_toml(&config_str)
        .map_err(|e| CliError::new(EXIT_INVALID_CONFIG, e.to_string()))?;

    // Resolve data paths relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let mut tables = BTreeMap::new();
    for metric in Metric::ALL {
        let path = base_dir.join(&config.metrics.get(metric).file);
        let table = read_raw_table(&path).map_err(runtime_err)?;
        tables.insert(metric, table);
    }

    let recon_result = reconcile(&config, &ReconInput { tables });
    let analysis = analyze(&recon_result.records, config.output.top_n);

    if let Some(ref processed) = config.output.processed_dir {
        let processed_dir = base_dir.join(processed);
        std::fs::create_dir_all(&processed_dir).map_err(|e| {
            CliError::new(EXIT_RUNTIME, format!("cannot create {}: {e}", processed_dir.display()))
        })?;
        write_merged(&processed_dir.join(MERGED_FILE), &recon_result.records)
            .map_err(runtime_err)?;
    }

    let out_dir = output_dir.unwrap_or_else(|| base_dir.join(&config.output.dir));
    std::fs::create_dir_all(&out_dir)
        .map_err(|e| CliError::new(EXIT_RUNTIME, format!("cannot create {}: {e}", out_dir.display())))?;

    write_analyzed(&out_dir.join(ANALYZED_FILE), &analysis.records).map_err(runtime_err)?;
    write_analyzed(&out_dir.join(POSITIVE_FILE), &analysis.positive_outliers).map_err(runtime_err)?;
    write_analyzed(&out_dir.join(NEGATIVE_FILE), &analysis.negative_outliers).map_err(runtime_err)?;

    if json {
        let envelope = RunOutput {
            recon: &recon_result,
            analysis: &analysis,
        };
        let json_str = serde_json::to_string_pretty(&envelope).map_err(runtime_err)?;
        println!("{json_str}");
    }

    print_summary(&recon_result, &analysis, &out_dir);

    if recon_result.summary.merged == 0 {
        return Err(CliError::new(
            EXIT_EMPTY_JOIN,
            "join produced zero merged countries (zero-row outputs written)",
        ));
    }

    Ok(())
}

/// Human summary to stderr (stdout is reserved for --json).
fn print_summary(recon: &ReconResult, analysis: &AnalysisResult, out_dir: &Path) {
    for (metric, m) in &recon.summary.metrics {
        eprintln!(
            "{metric}: {} raw rows -> {} cleaned ({} blank name, {} missing value, {} excluded, {} duplicate){}",
            m.raw_rows,
            m.cleaned,
            m.dropped_blank_name,
            m.dropped_missing_value,
            m.dropped_excluded,
            m.dropped_duplicate,
            if m.column_fallback { " [positional column fallback]" } else { "" },
        );
        if m.join_excluded > 0 {
            eprintln!("{metric}: {} countries excluded by join", m.join_excluded);
        }
    }

    if !recon.summary.empty_metrics.is_empty() {
        let names: Vec<String> = recon
            .summary
            .empty_metrics
            .iter()
            .map(|m| m.to_string())
            .collect();
        eprintln!("empty after cleaning: {}", names.join(", "));
    }

    eprintln!("merged: {} countries", recon.summary.merged);

    if recon.summary.merged == 1 {
        eprintln!("warning: cohort below 2 records; z-scores undefined (NaN)");
    }

    if recon.summary.merged > 0 {
        let preview = |records: &[wellstat_analysis::model::AnalyzedRecord]| -> String {
            records
                .iter()
                .take(5)
                .map(|r| r.country.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        eprintln!("positive outliers: {}", preview(&analysis.positive_outliers));
        eprintln!("negative outliers: {}", preview(&analysis.negative_outliers));
    }

    eprintln!("wrote {}", out_dir.display());
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::new(EXIT_RUNTIME, format!("cannot read config: {e}")))?;

    match PipelineConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: pipeline '{}' ({} metrics, top_n {})",
                config.name,
                Metric::ALL.len(),
                config.output.top_n,
            );
            Ok(())
        }
        Err(e) => Err(CliError::new(EXIT_INVALID_CONFIG, e.to_string())),
    }
}
