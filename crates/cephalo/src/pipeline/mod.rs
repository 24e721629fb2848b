//! End-to-end analysis pipeline.
//!
//! Stage order: calibration -> derived landmarks -> angles + distances ->
//! diagnostic indices -> validation and classification. Each stage is a pure
//! function of the previous outputs; skipped work is recorded as
//! [`AnalysisNote`](crate::AnalysisNote)s rather than errors.

mod result;
mod run;

pub use result::CephalometricAnalysis;
pub use run::analyze;
