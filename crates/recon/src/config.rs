use serde::Deserialize;

use crate::error::ReconError;
use crate::model::Metric;

/// Fraction of alphabetic cells a column must exceed to be the name column.
pub const DEFAULT_NAME_ALPHA_FRACTION: f64 = 0.8;
/// Fraction of digit-bearing cells a column must exceed to be the value column.
pub const DEFAULT_VALUE_DIGIT_FRACTION: f64 = 0.3;
/// Outlier sets keep this many records unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub metrics: MetricFiles,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub exclude: ExcludeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Metric sources
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MetricFiles {
    pub gdp: MetricSource,
    pub life_expectancy: MetricSource,
    pub literacy: MetricSource,
}

impl MetricFiles {
    pub fn get(&self, metric: Metric) -> &MetricSource {
        match metric {
            Metric::Gdp => &self.gdp,
            Metric::LifeExpectancy => &self.life_expectancy,
            Metric::Literacy => &self.literacy,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MetricSource {
    pub file: String,
}

// ---------------------------------------------------------------------------
// Column inference
// ---------------------------------------------------------------------------

/// Thresholds for the column-inference heuristic. Scraped tables have a
/// dominant text column and a dominant numeric column even with footnote
/// markers and mixed content mixed in.
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_name_alpha_fraction")]
    pub name_alpha_fraction: f64,
    #[serde(default = "default_value_digit_fraction")]
    pub value_digit_fraction: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            name_alpha_fraction: DEFAULT_NAME_ALPHA_FRACTION,
            value_digit_fraction: DEFAULT_VALUE_DIGIT_FRACTION,
        }
    }
}

fn default_name_alpha_fraction() -> f64 {
    DEFAULT_NAME_ALPHA_FRACTION
}

fn default_value_digit_fraction() -> f64 {
    DEFAULT_VALUE_DIGIT_FRACTION
}

// ---------------------------------------------------------------------------
// Exclusions + output
// ---------------------------------------------------------------------------

/// Aggregate rows ("World" and friends) that must not join as countries.
#[derive(Debug, Clone, Deserialize)]
pub struct ExcludeConfig {
    #[serde(default = "default_exclude_names")]
    pub names: Vec<String>,
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            names: default_exclude_names(),
        }
    }
}

fn default_exclude_names() -> Vec<String> {
    vec!["World".into()]
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    /// When set, the intermediate merged table is also written here.
    #[serde(default)]
    pub processed_dir: Option<String>,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            processed_dir: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

fn default_output_dir() -> String {
    "data/results".into()
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl PipelineConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: PipelineConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        for metric in Metric::ALL {
            if self.metrics.get(metric).file.is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "metric '{metric}': file must not be empty"
                )));
            }
        }

        for (label, value) in [
            ("name_alpha_fraction", self.inference.name_alpha_fraction),
            ("value_digit_fraction", self.inference.value_digit_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ReconError::ConfigValidation(format!(
                    "{label} must be in (0, 1], got {value}"
                )));
            }
        }

        if self.output.top_n == 0 {
            return Err(ReconError::ConfigValidation(
                "output.top_n must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
