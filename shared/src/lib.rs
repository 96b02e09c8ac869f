//! Shared types and risk analysis for Route Safety Commander
//!
//! This crate holds the pure core: forecast models, the per-hour hazard
//! evaluator, trip aggregation and alert classification. It performs no
//! I/O and is shared by the backend and the browser (via WASM).

pub mod analysis;
pub mod models;
pub mod types;
pub mod validation;

pub use analysis::AnalysisError;
pub use models::*;
pub use types::*;
pub use validation::*;
