//! Shared fixtures for unit tests.
//!
//! Coordinates are pixels on a lateral ceph with the face to the right and
//! y pointing down. The ruler spans 200 px, so the scale factor is 0.1.

use crate::landmarks::{names, LandmarkSet, Point};

/// Build a landmark set from `(name, x, y)` triples.
pub(crate) fn landmarks(points: &[(&str, f64, f64)]) -> LandmarkSet {
    LandmarkSet::from_points(points.iter().map(|&(n, x, y)| (n, Point::new(x, y))))
        .expect("fixture landmarks are finite")
}

/// A complete, anatomically plausible landmark set.
pub(crate) fn reference_landmarks() -> LandmarkSet {
    landmarks(&[
        (names::SELLA, 400.0, 400.0),
        (names::NASION, 700.0, 350.0),
        (names::PORION, 300.0, 480.0),
        (names::ORBITALE, 640.0, 500.0),
        (names::A_POINT, 690.0, 600.0),
        (names::B_POINT, 670.0, 800.0),
        (names::POGONION, 675.0, 870.0),
        (names::MENTON, 640.0, 910.0),
        (names::ARTICULARE, 360.0, 560.0),
        (names::RAMUS_DOWN, 380.0, 740.0),
        (names::CORPUS_LT, 500.0, 860.0),
        (names::ANS, 720.0, 560.0),
        (names::PNS, 450.0, 580.0),
        (names::UPPER_INCISOR_TIP, 705.0, 730.0),
        (names::UPPER_INCISOR_APEX, 650.0, 590.0),
        (names::LOWER_INCISOR_TIP, 695.0, 720.0),
        (names::LOWER_INCISOR_APEX, 640.0, 840.0),
        (names::UPPER_MOLAR, 560.0, 720.0),
        (names::PRONASALE, 800.0, 560.0),
        (names::SOFT_TISSUE_POGONION, 720.0, 900.0),
        (names::UPPER_LIP, 760.0, 680.0),
        (names::LOWER_LIP, 745.0, 760.0),
        (names::RULER_START, 50.0, 50.0),
        (names::RULER_END, 250.0, 50.0),
    ])
}

pub(crate) fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}
