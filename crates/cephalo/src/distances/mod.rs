//! Distance engine: calibrated lengths, signed perpendicular offsets and the
//! named distance catalog.
//!
//! Raw values are in landmark coordinate units; scaled values are millimetres
//! (raw × calibration scale factor), rounded to one decimal.

mod catalog;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;
use crate::diagnostics::{NoteKind, Notes, Skip, Stage};
use crate::geometry::{
    distance, midpoint, perpendicular_foot, perpendicular_line_through,
    perpendicular_signed_distance, round_to,
};
use crate::landmarks::{names as lm, LandmarkSet};
use crate::measurements::names as m;

pub use catalog::SignConvention;
pub(crate) use catalog::{DistanceDef, DISTANCE_CATALOG, RATIOS};

/// Unit of a distance-engine output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Mm,
    Percent,
    /// The calibration scale factor itself.
    MmPerUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    /// Value in coordinate units (signed where the measurement is signed).
    pub raw_distance: f64,
    /// Calibrated value, one decimal.
    pub scaled_distance: f64,
    pub unit: Unit,
}

impl DistanceResult {
    fn scaled(raw: f64, calibration: &Calibration) -> Self {
        Self {
            raw_distance: raw,
            scaled_distance: round_to(calibration.scale(raw), 1),
            unit: Unit::Mm,
        }
    }
}

/// Calibrated Euclidean distance between two landmarks.
pub fn scaled_distance(
    landmarks: &LandmarkSet,
    calibration: &Calibration,
    key1: &str,
    key2: &str,
) -> Option<DistanceResult> {
    try_scaled_distance(landmarks, calibration, key1, key2).ok()
}

/// Calibrated signed distance from `point` to the line (`line_a`, `line_b`).
///
/// `sign` selects between the raw cross-product orientation and its inverse.
pub fn perpendicular_distance(
    landmarks: &LandmarkSet,
    calibration: &Calibration,
    line_a: &str,
    line_b: &str,
    point: &str,
    sign: SignConvention,
) -> Option<DistanceResult> {
    try_perpendicular_distance(landmarks, calibration, [line_a, line_b], point, sign).ok()
}

fn try_scaled_distance(
    landmarks: &LandmarkSet,
    calibration: &Calibration,
    key1: &str,
    key2: &str,
) -> Result<DistanceResult, Skip> {
    let [p1, p2] = landmarks.get_many([key1, key2])?;
    Ok(DistanceResult::scaled(distance(p1, p2), calibration))
}

fn try_perpendicular_distance(
    landmarks: &LandmarkSet,
    calibration: &Calibration,
    line: [&str; 2],
    point: &str,
    sign: SignConvention,
) -> Result<DistanceResult, Skip> {
    let [a, b, p] = landmarks.get_many([line[0], line[1], point])?;
    let d = perpendicular_signed_distance(a, b, p).ok_or(Skip::Degenerate("zero-length line"))?;
    Ok(DistanceResult::scaled(sign.apply(d), calibration))
}

fn try_axis_offset(
    landmarks: &LandmarkSet,
    calibration: &Calibration,
    upper: &str,
    lower: &str,
    vertical: bool,
) -> Result<DistanceResult, Skip> {
    let [u, l] = landmarks.get_many([upper, lower])?;
    let raw = if vertical { u.y - l.y } else { u.x - l.x };
    Ok(DistanceResult::scaled(raw, calibration))
}

/// A-Point to the Nasion perpendicular (line through Nasion, perpendicular
/// to Frankfort Horizontal). Anterior is positive.
fn try_nasion_perpendicular(
    landmarks: &LandmarkSet,
    calibration: &Calibration,
    point: &str,
) -> Result<DistanceResult, Skip> {
    let [po, or, n, p] = landmarks.get_many([lm::PORION, lm::ORBITALE, lm::NASION, point])?;
    let [n0, n1] =
        perpendicular_line_through(po, or, n).ok_or(Skip::Degenerate("zero-length FH plane"))?;
    let d = perpendicular_signed_distance(n0, n1, p)
        .ok_or(Skip::Degenerate("zero-length nasion perpendicular"))?;
    Ok(DistanceResult::scaled(SignConvention::Inverted.apply(d), calibration))
}

/// Wits appraisal: AO − BO along the occlusal plane (Upper Molar → incisal
/// midpoint). Positive when AO lies anterior to BO.
fn try_wits(landmarks: &LandmarkSet, calibration: &Calibration) -> Result<DistanceResult, Skip> {
    let [molar, u1, l1, a, b] = landmarks.get_many([
        lm::UPPER_MOLAR,
        lm::UPPER_INCISOR_TIP,
        lm::LOWER_INCISOR_TIP,
        lm::A_POINT,
        lm::B_POINT,
    ])?;
    let incisal = midpoint(u1, l1);
    let dir = incisal.to_vector() - molar.to_vector();
    let len = dir.norm();
    if len == 0.0 {
        return Err(Skip::Degenerate("zero-length occlusal plane"));
    }
    let ao = perpendicular_foot(molar, incisal, a).to_vector();
    let bo = perpendicular_foot(molar, incisal, b).to_vector();
    let raw = (ao - bo).dot(&dir) / len;
    Ok(DistanceResult::scaled(raw, calibration))
}

fn evaluate(
    def: &DistanceDef,
    landmarks: &LandmarkSet,
    calibration: &Calibration,
) -> Result<DistanceResult, Skip> {
    match *def {
        DistanceDef::Between { from, to } => try_scaled_distance(landmarks, calibration, from, to),
        DistanceDef::Perpendicular { line, point, sign } => {
            try_perpendicular_distance(landmarks, calibration, line, point, sign)
        }
        DistanceDef::VerticalOffset { upper, lower } => {
            try_axis_offset(landmarks, calibration, upper, lower, true)
        }
        DistanceDef::HorizontalOffset { upper, lower } => {
            try_axis_offset(landmarks, calibration, upper, lower, false)
        }
        DistanceDef::NasionPerpendicular { point } => {
            try_nasion_perpendicular(landmarks, calibration, point)
        }
        DistanceDef::Wits => try_wits(landmarks, calibration),
    }
}

/// Evaluate every named distance that the landmarks allow.
///
/// `Cal` (the scale factor) is always present.
pub fn calculate_all_distances(
    landmarks: &LandmarkSet,
    calibration: &Calibration,
) -> BTreeMap<String, DistanceResult> {
    calculate_with_notes(landmarks, calibration, &mut Notes::default())
}

pub(crate) fn calculate_with_notes(
    landmarks: &LandmarkSet,
    calibration: &Calibration,
    notes: &mut Notes,
) -> BTreeMap<String, DistanceResult> {
    let mut out = BTreeMap::new();

    for entry in DISTANCE_CATALOG {
        match evaluate(&entry.def, landmarks, calibration) {
            Ok(r) => {
                out.insert(entry.name.to_string(), r);
            }
            Err(skip) => notes.skip(Stage::Distances, entry.name, skip),
        }
    }

    for ratio in RATIOS {
        let (Some(num), Some(den)) = (out.get(ratio.numerator), out.get(ratio.denominator)) else {
            let missing = [ratio.numerator, ratio.denominator]
                .into_iter()
                .filter(|n| !out.contains_key(*n))
                .map(str::to_string)
                .collect();
            notes.push(
                Stage::Distances,
                ratio.name,
                NoteKind::MissingMeasurements { names: missing },
            );
            continue;
        };
        if den.raw_distance == 0.0 {
            notes.skip(Stage::Distances, ratio.name, Skip::Degenerate("zero denominator"));
            continue;
        }
        let pct = num.raw_distance / den.raw_distance * 100.0;
        out.insert(
            ratio.name.to_string(),
            DistanceResult {
                raw_distance: pct,
                scaled_distance: round_to(pct, 1),
                unit: Unit::Percent,
            },
        );
    }

    out.insert(
        m::CAL.to_string(),
        DistanceResult {
            raw_distance: calibration.scale_factor,
            scaled_distance: calibration.scale_factor,
            unit: Unit::MmPerUnit,
        },
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derived::resolve_derived_landmarks;
    use crate::test_utils::{assert_close, landmarks, reference_landmarks};

    fn cal(set: &LandmarkSet) -> Calibration {
        Calibration::from_landmarks(set, crate::calibration::DEFAULT_RULER_LENGTH_MM)
    }

    #[test]
    fn scaled_distance_uses_ruler() {
        let set = landmarks(&[
            (lm::RULER_START, 0.0, 0.0),
            (lm::RULER_END, 100.0, 0.0),
            ("p", 0.0, 0.0),
            ("q", 50.0, 0.0),
        ]);
        let r = scaled_distance(&set, &cal(&set), "p", "q").unwrap();
        assert_eq!(r.raw_distance, 50.0);
        assert_eq!(r.scaled_distance, 10.0);
        assert_eq!(r.unit, Unit::Mm);
        assert!(scaled_distance(&set, &cal(&set), "p", "missing").is_none());
    }

    #[test]
    fn perpendicular_distance_sign_conventions() {
        let set = landmarks(&[("s", 0.0, 0.0), ("e", 10.0, 0.0), ("p", 5.0, 5.0)]);
        let c = Calibration::uncalibrated();
        let raw = perpendicular_distance(&set, &c, "s", "e", "p", SignConvention::CrossProduct)
            .unwrap();
        assert_eq!(raw.scaled_distance, 5.0);
        let inv =
            perpendicular_distance(&set, &c, "s", "e", "p", SignConvention::Inverted).unwrap();
        assert_eq!(inv.scaled_distance, -5.0);
    }

    #[test]
    fn e_line_reads_negative_behind_the_line() {
        let set = resolve_derived_landmarks(&reference_landmarks());
        let all = calculate_all_distances(&set, &cal(&set));
        assert!(all[m::E_LINE_UPPER].scaled_distance < 0.0);
        assert!(all[m::E_LINE_LOWER].scaled_distance < 0.0);

        // Push the upper lip in front of the nose–chin line.
        let mut protrusive = set.clone();
        protrusive
            .insert(lm::UPPER_LIP, crate::Point::new(820.0, 680.0))
            .unwrap();
        let all = calculate_all_distances(&protrusive, &cal(&protrusive));
        assert!(all[m::E_LINE_UPPER].scaled_distance > 0.0);
    }

    #[test]
    fn nasion_perpendicular_is_positive_when_anterior() {
        let base = [
            (lm::PORION, 0.0, 100.0),
            (lm::ORBITALE, 100.0, 100.0),
            (lm::NASION, 120.0, 50.0),
        ];
        let mut pts = base.to_vec();
        pts.push((lm::A_POINT, 125.0, 120.0));
        let set = landmarks(&pts);
        let d = calculate_all_distances(&set, &Calibration::uncalibrated());
        assert_eq!(d[m::NAPERP_A].scaled_distance, 5.0);

        let mut pts = base.to_vec();
        pts.push((lm::A_POINT, 117.0, 120.0));
        let set = landmarks(&pts);
        let d = calculate_all_distances(&set, &Calibration::uncalibrated());
        assert_eq!(d[m::NAPERP_A].scaled_distance, -3.0);
    }

    #[test]
    fn nasion_perpendicular_follows_tilted_fh() {
        // FH rotated by 45°: the perpendicular through Nasion has slope -1.
        let set = landmarks(&[
            (lm::PORION, 0.0, 0.0),
            (lm::ORBITALE, 10.0, 10.0),
            (lm::NASION, 0.0, 0.0),
            (lm::A_POINT, 10.0, 0.0),
        ]);
        let d = calculate_all_distances(&set, &Calibration::uncalibrated());
        assert_close(d[m::NAPERP_A].raw_distance.abs(), 50f64.sqrt(), 1e-12);
    }

    #[test]
    fn incisor_offsets_are_axis_components() {
        let set = landmarks(&[
            (lm::UPPER_INCISOR_TIP, 105.0, 203.0),
            (lm::LOWER_INCISOR_TIP, 102.0, 200.0),
        ]);
        let d = calculate_all_distances(&set, &Calibration::uncalibrated());
        assert_eq!(d[m::OVERBITE].scaled_distance, 3.0);
        assert_eq!(d[m::OVERJET].scaled_distance, 3.0);
    }

    #[test]
    fn wits_measures_along_occlusal_plane() {
        let set = landmarks(&[
            (lm::UPPER_MOLAR, 0.0, 100.0),
            (lm::UPPER_INCISOR_TIP, 100.0, 101.0),
            (lm::LOWER_INCISOR_TIP, 100.0, 99.0),
            (lm::A_POINT, 60.0, 40.0),
            (lm::B_POINT, 55.0, 160.0),
        ]);
        let d = calculate_all_distances(&set, &Calibration::uncalibrated());
        assert_eq!(d[m::WITS].scaled_distance, 5.0);
    }

    #[test]
    fn ratios_are_percentages_of_raw_lengths() {
        let set = resolve_derived_landmarks(&reference_landmarks());
        let all = calculate_all_distances(&set, &cal(&set));
        let fhr = all[m::PFH].raw_distance / all[m::AFH].raw_distance * 100.0;
        assert_eq!(all[m::FHR].scaled_distance, round_to(fhr, 1));
        assert_eq!(all[m::FHR].unit, Unit::Percent);
        assert!(all.contains_key(m::HR));
    }

    #[test]
    fn cal_is_always_reported() {
        let d = calculate_all_distances(&LandmarkSet::new(), &Calibration::uncalibrated());
        assert_eq!(d.len(), 1);
        assert_eq!(d[m::CAL].scaled_distance, 1.0);
        assert_eq!(d[m::CAL].unit, Unit::MmPerUnit);

        let set = reference_landmarks();
        let d = calculate_all_distances(&set, &cal(&set));
        assert_eq!(d[m::CAL].scaled_distance, 0.1);
    }

    #[test]
    fn missing_gonion_removes_only_dependent_distances() {
        let full_set = resolve_derived_landmarks(&reference_landmarks());
        let full = calculate_all_distances(&full_set, &cal(&full_set));

        let set = resolve_derived_landmarks(&reference_landmarks().without(lm::ARTICULARE));
        let mut notes = Notes::default();
        let partial = calculate_with_notes(&set, &cal(&set), &mut notes);

        for gone in [m::MBL, m::PFH, m::FHR, m::RAMUS, m::PCBL] {
            assert!(!partial.contains_key(gone), "{gone} should be absent");
        }
        for (name, value) in &partial {
            assert_eq!(value, &full[name], "{name} changed");
        }
        assert!(notes
            .as_slice()
            .iter()
            .any(|n| n.subject == m::FHR
                && n.kind
                    == NoteKind::MissingMeasurements {
                        names: vec!["PFH".to_string()]
                    }));
    }
}
