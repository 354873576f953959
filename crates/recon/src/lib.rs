//! `wellstat-recon` — Country-table reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded raw tables, returns merged records.
//! No CLI or IO dependencies.

pub mod columns;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod sanitize;

pub use config::PipelineConfig;
pub use error::ReconError;
pub use model::{MergedRecord, Metric, RawTable, ReconInput, ReconResult};
pub use reconcile::reconcile;
