//! Construction landmarks obtained by intersecting anatomical lines.

use crate::diagnostics::{AnalysisNote, Notes, Skip, Stage};
use crate::geometry::line_intersection;
use crate::landmarks::{names, LandmarkSet};

/// A construction point defined as the intersection of two lines.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DerivedLandmark {
    pub name: &'static str,
    pub line_a: [&'static str; 2],
    pub line_b: [&'static str; 2],
}

/// Construction points, resolved in order.
pub(crate) const DERIVED_LANDMARKS: &[DerivedLandmark] = &[
    DerivedLandmark {
        name: names::GONION,
        line_a: [names::ARTICULARE, names::RAMUS_DOWN],
        line_b: [names::MENTON, names::CORPUS_LT],
    },
    DerivedLandmark {
        name: names::GNATHION,
        line_a: [names::NASION, names::POGONION],
        line_b: [names::MENTON, names::CORPUS_LT],
    },
];

/// Copy of `landmarks` extended with the derived `Go` and `Gn` points.
///
/// Points that are already present are kept as supplied. A derived point is
/// omitted when a prerequisite is missing or its lines are parallel.
/// Re-running on an extended set is a no-op.
pub fn resolve_derived_landmarks(landmarks: &LandmarkSet) -> LandmarkSet {
    resolve_with_notes(landmarks, &mut Notes::default())
}

/// Like [`resolve_derived_landmarks`], also returning why points were omitted.
pub fn resolve_derived_landmarks_with_notes(
    landmarks: &LandmarkSet,
) -> (LandmarkSet, Vec<AnalysisNote>) {
    let mut notes = Notes::default();
    let out = resolve_with_notes(landmarks, &mut notes);
    (out, notes.into_vec())
}

pub(crate) fn resolve_with_notes(landmarks: &LandmarkSet, notes: &mut Notes) -> LandmarkSet {
    let mut out = landmarks.clone();
    for def in DERIVED_LANDMARKS {
        if out.contains(def.name) {
            continue;
        }
        match intersect(&out, def) {
            Ok(p) => {
                // Intersection of finite points with a bounded determinant is finite.
                if out.insert(def.name, p).is_err() {
                    notes.skip(
                        Stage::DerivedLandmarks,
                        def.name,
                        Skip::Degenerate("non-finite intersection"),
                    );
                }
            }
            Err(skip) => notes.skip(Stage::DerivedLandmarks, def.name, skip),
        }
    }
    out
}

fn intersect(landmarks: &LandmarkSet, def: &DerivedLandmark) -> Result<crate::Point, Skip> {
    let [a1, a2, b1, b2] =
        landmarks.get_many([def.line_a[0], def.line_a[1], def.line_b[0], def.line_b[1]])?;
    line_intersection(a1, a2, b1, b2).ok_or(Skip::Degenerate("parallel lines"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NoteKind;
    use crate::test_utils::{landmarks, reference_landmarks};
    use crate::Point;

    #[test]
    fn gonion_is_ramus_and_border_intersection() {
        let set = landmarks(&[
            (names::ARTICULARE, 0.0, 0.0),
            (names::RAMUS_DOWN, 0.0, 10.0),
            (names::MENTON, 50.0, 40.0),
            (names::CORPUS_LT, 30.0, 40.0),
        ]);
        let resolved = resolve_derived_landmarks(&set);
        assert_eq!(resolved.get(names::GONION), Some(Point::new(0.0, 40.0)));
        // Nasion/Pogonion absent: no Gnathion.
        assert!(!resolved.contains(names::GNATHION));
        // Input is not mutated.
        assert!(!set.contains(names::GONION));
    }

    #[test]
    fn existing_points_are_not_overwritten() {
        let mut set = reference_landmarks();
        set.insert(names::GONION, Point::new(1.0, 2.0)).unwrap();
        let resolved = resolve_derived_landmarks(&set);
        assert_eq!(resolved.get(names::GONION), Some(Point::new(1.0, 2.0)));
        assert!(resolved.contains(names::GNATHION));
    }

    #[test]
    fn resolver_is_idempotent() {
        let once = resolve_derived_landmarks(&reference_landmarks());
        let twice = resolve_derived_landmarks(&once);
        assert_eq!(once, twice);
        assert!(once.contains(names::GONION) && once.contains(names::GNATHION));
    }

    #[test]
    fn missing_articulare_omits_gonion_only() {
        let set = reference_landmarks().without(names::ARTICULARE);
        let mut notes = Notes::default();
        let resolved = resolve_with_notes(&set, &mut notes);
        assert!(!resolved.contains(names::GONION));
        assert!(resolved.contains(names::GNATHION));

        let note = &notes.as_slice()[0];
        assert_eq!(note.subject, "Go");
        assert_eq!(
            note.kind,
            NoteKind::MissingLandmarks {
                names: vec!["Ar".to_string()]
            }
        );
    }

    #[test]
    fn parallel_lines_omit_the_point() {
        let set = landmarks(&[
            (names::ARTICULARE, 0.0, 0.0),
            (names::RAMUS_DOWN, 10.0, 0.0),
            (names::MENTON, 0.0, 5.0),
            (names::CORPUS_LT, 10.0, 5.0),
        ]);
        let (resolved, notes) = resolve_derived_landmarks_with_notes(&set);
        assert!(!resolved.contains(names::GONION));
        assert!(matches!(
            notes[0].kind,
            NoteKind::DegenerateGeometry { .. }
        ));
    }
}
