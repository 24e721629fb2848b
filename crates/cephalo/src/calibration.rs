//! Pixel-to-millimetre calibration from the ruler landmarks.
//!
//! The ruler is a segment of known real-world length clicked on the image.
//! A missing or zero-length ruler degrades to a scale factor of 1.0 so that
//! angle-only workflows keep working.

use serde::{Deserialize, Serialize};

use crate::geometry::{distance, round_to};
use crate::landmarks::{names, LandmarkSet};

/// Real-world length of the ruler segment (mm).
pub const DEFAULT_RULER_LENGTH_MM: f64 = 20.0;

/// Scale used when no usable ruler is available (one unit == one mm).
pub const DEFAULT_SCALE_FACTOR: f64 = 1.0;

/// How the scale factor was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationSource {
    /// Derived from `Ruler Start` / `Ruler End`.
    Ruler,
    /// One or both ruler landmarks are absent.
    MissingRuler,
    /// The ruler landmarks coincide.
    DegenerateRuler,
}

/// Scale factor for one landmark set, computed once per analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Millimetres per coordinate unit, rounded to two decimals.
    pub scale_factor: f64,
    /// Ruler length in coordinate units, when a ruler was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ruler_length_units: Option<f64>,
    pub source: CalibrationSource,
}

impl Calibration {
    /// Calibrate from the ruler landmarks of `landmarks`.
    pub fn from_landmarks(landmarks: &LandmarkSet, ruler_length_mm: f64) -> Self {
        let Ok([start, end]) = landmarks.get_many([names::RULER_START, names::RULER_END]) else {
            return Self::fallback(CalibrationSource::MissingRuler, None);
        };

        let d = distance(start, end);
        if d == 0.0 {
            return Self::fallback(CalibrationSource::DegenerateRuler, Some(d));
        }

        Self {
            scale_factor: round_to(ruler_length_mm / d, 2),
            ruler_length_units: Some(d),
            source: CalibrationSource::Ruler,
        }
    }

    /// Scale factor 1.0, for inputs that are already in millimetres.
    pub fn uncalibrated() -> Self {
        Self::fallback(CalibrationSource::MissingRuler, None)
    }

    fn fallback(source: CalibrationSource, ruler_length_units: Option<f64>) -> Self {
        tracing::debug!(?source, "no usable ruler, using default scale factor");
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            ruler_length_units,
            source,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.source == CalibrationSource::Ruler
    }

    /// Convert a raw coordinate-space length to millimetres (unrounded).
    pub fn scale(&self, raw: f64) -> f64 {
        raw * self.scale_factor
    }
}

/// Scale factor (mm per coordinate unit) for a 20 mm ruler.
///
/// Returns [`DEFAULT_SCALE_FACTOR`] when the ruler is missing or has zero
/// length.
pub fn scale_factor(landmarks: &LandmarkSet) -> f64 {
    Calibration::from_landmarks(landmarks, DEFAULT_RULER_LENGTH_MM).scale_factor
}
