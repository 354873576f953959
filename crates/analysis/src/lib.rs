//! `wellstat-analysis` — Deviation analysis over merged country records.
//!
//! Pure computation: z-score normalization per metric, the derived
//! efficiency gap, and top-N outlier extraction. No IO dependencies.

pub mod analyze;
pub mod model;

pub use analyze::analyze;
pub use model::{AnalysisResult, AnalyzedRecord};
