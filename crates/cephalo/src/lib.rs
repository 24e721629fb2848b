//! cephalo — pure-Rust cephalometric measurement engine.
//!
//! Named 2D landmarks clicked on a lateral skull radiograph go in; angles,
//! calibrated distances and composite diagnostic indices come out. The
//! pipeline stages are:
//!
//! 1. **Calibration** – millimetres per coordinate unit from the ruler landmarks.
//! 2. **Derived landmarks** – Gonion and Gnathion by line–line intersection.
//! 3. **Angles** – vertex and line–line angles, plus composites (ANB, FMIA, Björk sum).
//! 4. **Distances** – scaled lengths, signed perpendicular offsets, ratios.
//! 5. **Indices** – APDI/ODI family with clinical-mean fallbacks, range
//!    validation and classification.
//!
//! Missing landmarks and degenerate geometry never abort a run: the affected
//! measurements are omitted and an [`AnalysisNote`] explains why.
//!
//! # Public API
//! - [`Analyzer`] as the primary entry point
//! - [`AnalysisConfig`] for ruler length, normal ranges and reference norms
//! - stage functions in [`geometry`], [`angles`], [`distances`], [`derived`]
//!   and [`indices`] for callers that need a single stage

pub mod angles;
mod api;
pub mod calibration;
mod config;
pub mod derived;
mod diagnostics;
pub mod distances;
pub mod geometry;
pub mod indices;
pub mod landmarks;
pub mod measurements;
pub mod pipeline;
mod reference;

#[cfg(test)]
pub(crate) mod test_utils;

pub use angles::{calculate_all_angles, AngleResult};
pub use api::Analyzer;
pub use calibration::{scale_factor, Calibration, CalibrationSource};
pub use config::{AnalysisConfig, ConfigError, DEFAULT_SEVERE_DEVIATION};
pub use derived::resolve_derived_landmarks;
pub use diagnostics::{AnalysisNote, NoteKind, Stage};
pub use distances::{calculate_all_distances, DistanceResult, SignConvention, Unit};
pub use indices::classify::{
    Classification, ClinicalSummary, Deviation, GrowthPattern, SkeletalClass,
};
pub use indices::{
    calculate_indices, compute_indices, DiagnosticIndexSet, Severity, ValidationWarning,
};
pub use landmarks::{LandmarkError, LandmarkSet, Point};
pub use measurements::MeasurementMap;
pub use pipeline::CephalometricAnalysis;
pub use reference::{default_normal_ranges, ReferenceNorm, ReferenceTable};
