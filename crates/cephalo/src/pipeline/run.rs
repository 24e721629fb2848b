use crate::angles;
use crate::calibration::{Calibration, CalibrationSource};
use crate::config::AnalysisConfig;
use crate::derived;
use crate::diagnostics::{Notes, Skip, Stage};
use crate::distances;
use crate::indices::{self, classify::classify};
use crate::landmarks::{names, LandmarkSet};
use crate::measurements::MeasurementMap;

use super::CephalometricAnalysis;

/// Run every stage on `landmarks` with `config`.
///
/// Never fails: missing landmarks and degenerate geometry drop individual
/// measurements and are reported in [`CephalometricAnalysis::notes`].
pub fn analyze(landmarks: &LandmarkSet, config: &AnalysisConfig) -> CephalometricAnalysis {
    let mut notes = Notes::default();

    let calibration = calibrate(landmarks, config.ruler_length_mm, &mut notes);
    let extended = derived::resolve_with_notes(landmarks, &mut notes);

    let angles = angles::calculate_with_notes(&extended, &mut notes);
    let distances = distances::calculate_with_notes(&extended, &calibration, &mut notes);
    let measurements = MeasurementMap::from_results(&angles, &distances);

    let indices = indices::calculate_with_notes(&measurements, &mut notes);
    let warnings = indices::validate(
        &measurements,
        &indices,
        &config.normal_ranges,
        config.severe_deviation,
    );
    let summary = classify(&measurements, &indices, &config.reference);

    let notes = notes.into_vec();
    tracing::info!(
        landmarks = landmarks.len(),
        derived = extended.len() - landmarks.len(),
        angles = angles.len(),
        distances = distances.len(),
        index_fallbacks = indices.fallbacks.len(),
        warnings = warnings.len(),
        notes = notes.len(),
        scale_factor = calibration.scale_factor,
        "cephalometric analysis complete"
    );

    CephalometricAnalysis {
        landmarks: extended,
        calibration,
        angles,
        distances,
        measurements,
        indices,
        warnings,
        summary,
        notes,
    }
}

fn calibrate(landmarks: &LandmarkSet, ruler_length_mm: f64, notes: &mut Notes) -> Calibration {
    let calibration = Calibration::from_landmarks(landmarks, ruler_length_mm);
    match calibration.source {
        CalibrationSource::Ruler => {}
        CalibrationSource::MissingRuler => {
            let missing = [names::RULER_START, names::RULER_END]
                .into_iter()
                .filter(|n| !landmarks.contains(n))
                .map(str::to_string)
                .collect();
            notes.skip(Stage::Calibration, "scale factor", Skip::Missing(missing));
        }
        CalibrationSource::DegenerateRuler => notes.skip(
            Stage::Calibration,
            "scale factor",
            Skip::Degenerate("zero-length ruler"),
        ),
    }
    calibration
}
