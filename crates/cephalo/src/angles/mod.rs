//! Angle engine: vertex angles, line–line angles and the clinical catalog.
//!
//! All angles are in degrees, rounded to one decimal. Each catalog entry is
//! evaluated independently; a missing landmark removes only that entry.

mod catalog;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{NoteKind, Notes, Skip, Stage};
use crate::geometry::{angle_between_deg, round_to};
use crate::landmarks::LandmarkSet;

pub(crate) use catalog::{AngleDef, Readout, ANGLE_CATALOG, COMPOSITE_ANGLES};

/// One computed angle and the landmarks it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleResult {
    /// Degrees, one decimal.
    pub angle: f64,
    pub contributing_landmarks: Vec<String>,
}

impl AngleResult {
    fn new(angle: f64, landmarks: &[&str]) -> Self {
        Self {
            angle,
            contributing_landmarks: landmarks.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Angle at `vertex` between the rays towards `a` and `c`, in `[0, 180]`.
///
/// `None` if a landmark is missing or either ray has zero length.
pub fn vertex_angle(landmarks: &LandmarkSet, a: &str, vertex: &str, c: &str) -> Option<AngleResult> {
    try_vertex_angle(landmarks, a, vertex, c).ok()
}

/// Angle between the lines `a1→a2` and `b1→b2`, folded into `[0, 90]`.
///
/// Lines are undirected, so an obtuse raw angle is replaced by its
/// supplement. `None` if a landmark is missing or a direction has zero length.
pub fn intersection_angle(
    landmarks: &LandmarkSet,
    a1: &str,
    a2: &str,
    b1: &str,
    b2: &str,
) -> Option<AngleResult> {
    try_intersection_angle(landmarks, a1, a2, b1, b2).ok()
}

pub(crate) fn try_vertex_angle(
    landmarks: &LandmarkSet,
    a: &str,
    vertex: &str,
    c: &str,
) -> Result<AngleResult, Skip> {
    let [pa, pv, pc] = landmarks.get_many([a, vertex, c])?;
    let v1 = pa.to_vector() - pv.to_vector();
    let v2 = pc.to_vector() - pv.to_vector();
    let deg = angle_between_deg(&v1, &v2).ok_or(Skip::Degenerate("zero-length ray"))?;
    Ok(AngleResult::new(round_to(deg, 1), &[a, vertex, c]))
}

pub(crate) fn try_intersection_angle(
    landmarks: &LandmarkSet,
    a1: &str,
    a2: &str,
    b1: &str,
    b2: &str,
) -> Result<AngleResult, Skip> {
    let [pa1, pa2, pb1, pb2] = landmarks.get_many([a1, a2, b1, b2])?;
    let va = pa2.to_vector() - pa1.to_vector();
    let vb = pb2.to_vector() - pb1.to_vector();
    let mut deg = angle_between_deg(&va, &vb).ok_or(Skip::Degenerate("zero-length line"))?;
    if deg > 90.0 {
        deg = 180.0 - deg;
    }
    Ok(AngleResult::new(round_to(deg, 1), &[a1, a2, b1, b2]))
}

/// Evaluate every named clinical angle that the landmarks allow.
pub fn calculate_all_angles(landmarks: &LandmarkSet) -> BTreeMap<String, AngleResult> {
    calculate_with_notes(landmarks, &mut Notes::default())
}

pub(crate) fn calculate_with_notes(
    landmarks: &LandmarkSet,
    notes: &mut Notes,
) -> BTreeMap<String, AngleResult> {
    let mut out = BTreeMap::new();

    for entry in ANGLE_CATALOG {
        let result = match entry.def {
            AngleDef::Vertex { a, vertex, c } => try_vertex_angle(landmarks, a, vertex, c),
            AngleDef::Lines { a, b } => try_intersection_angle(landmarks, a[0], a[1], b[0], b[1]),
        };
        match result {
            Ok(r) => {
                let r = match entry.readout {
                    Readout::Direct => r,
                    Readout::Supplement => AngleResult {
                        angle: round_to(180.0 - r.angle, 1),
                        ..r
                    },
                };
                out.insert(entry.name.to_string(), r);
            }
            Err(skip) => notes.skip(Stage::Angles, entry.name, skip),
        }
    }

    // Composites only use angles computed above (or earlier composites).
    for composite in COMPOSITE_ANGLES {
        let missing: Vec<String> = composite
            .terms
            .iter()
            .filter(|(_, name)| !out.contains_key(*name))
            .map(|(_, name)| name.to_string())
            .collect();
        if !missing.is_empty() {
            notes.push(
                Stage::Angles,
                composite.name,
                NoteKind::MissingMeasurements { names: missing },
            );
            continue;
        }

        let mut value = composite.offset;
        let mut contributors: Vec<String> = Vec::new();
        for (coeff, name) in composite.terms {
            let term = &out[*name];
            value += coeff * term.angle;
            for lm in &term.contributing_landmarks {
                if !contributors.contains(lm) {
                    contributors.push(lm.clone());
                }
            }
        }
        out.insert(
            composite.name.to_string(),
            AngleResult {
                angle: round_to(value, 1),
                contributing_landmarks: contributors,
            },
        );
    }

    out
}
