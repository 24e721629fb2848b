//! Named clinical angle definitions.

use crate::landmarks::names as lm;
use crate::measurements::names as m;

/// Geometric construction of a catalog angle.
#[derive(Debug, Clone, Copy)]
pub(crate) enum AngleDef {
    /// Angle at `vertex` between rays to `a` and `c`.
    Vertex {
        a: &'static str,
        vertex: &'static str,
        c: &'static str,
    },
    /// Undirected angle between line `a` and line `b`, in `[0, 90]`.
    Lines {
        a: [&'static str; 2],
        b: [&'static str; 2],
    },
}

/// How the geometric angle is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Readout {
    Direct,
    /// `180 − angle` (obtuse clinical convention).
    Supplement,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct AngleEntry {
    pub name: &'static str,
    pub def: AngleDef,
    pub readout: Readout,
}

/// Angle computed from previously computed angles:
/// `offset + Σ coeff·angle`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CompositeAngle {
    pub name: &'static str,
    pub offset: f64,
    pub terms: &'static [(f64, &'static str)],
}

const fn vertex(name: &'static str, a: &'static str, v: &'static str, c: &'static str) -> AngleEntry {
    AngleEntry {
        name,
        def: AngleDef::Vertex { a, vertex: v, c },
        readout: Readout::Direct,
    }
}

const fn lines(name: &'static str, a: [&'static str; 2], b: [&'static str; 2]) -> AngleEntry {
    AngleEntry {
        name,
        def: AngleDef::Lines { a, b },
        readout: Readout::Direct,
    }
}

const fn supplement(entry: AngleEntry) -> AngleEntry {
    AngleEntry {
        readout: Readout::Supplement,
        ..entry
    }
}

const FH: [&str; 2] = [lm::PORION, lm::ORBITALE];
const SN: [&str; 2] = [lm::SELLA, lm::NASION];
const PALATAL: [&str; 2] = [lm::ANS, lm::PNS];
const MANDIBULAR: [&str; 2] = [lm::GONION, lm::MENTON];
const U1_AXIS: [&str; 2] = [lm::UPPER_INCISOR_APEX, lm::UPPER_INCISOR_TIP];
const L1_AXIS: [&str; 2] = [lm::LOWER_INCISOR_APEX, lm::LOWER_INCISOR_TIP];

pub(crate) const ANGLE_CATALOG: &[AngleEntry] = &[
    // Sagittal skeletal.
    vertex(m::SNA, lm::SELLA, lm::NASION, lm::A_POINT),
    vertex(m::SNB, lm::SELLA, lm::NASION, lm::B_POINT),
    vertex(m::SN_POG, lm::SELLA, lm::NASION, lm::POGONION),
    lines(m::FACIAL_ANGLE, FH, [lm::NASION, lm::POGONION]),
    supplement(vertex(m::CONVEXITY, lm::NASION, lm::A_POINT, lm::POGONION)),
    // Vertical skeletal.
    lines(m::FMA, FH, MANDIBULAR),
    lines(m::SN_GOGN, SN, [lm::GONION, lm::GNATHION]),
    lines(m::SN_FH, SN, FH),
    lines(m::SN_PP, SN, PALATAL),
    lines(m::FH_PP, FH, PALATAL),
    lines(m::PMA, PALATAL, MANDIBULAR),
    lines(m::Y_ANGLE, FH, [lm::SELLA, lm::GNATHION]),
    // Dental.
    supplement(lines(m::U1_SN, SN, U1_AXIS)),
    supplement(lines(m::U1_PP, PALATAL, U1_AXIS)),
    lines(m::U1_NA_ANGLE, [lm::NASION, lm::A_POINT], U1_AXIS),
    lines(m::L1_NB_ANGLE, [lm::NASION, lm::B_POINT], L1_AXIS),
    supplement(lines(m::IMPA, MANDIBULAR, L1_AXIS)),
    supplement(lines(m::INTERINCISAL, U1_AXIS, L1_AXIS)),
    // Björk polygon. The articular angle is reported under the name SGoGn.
    vertex(m::NSAR, lm::NASION, lm::SELLA, lm::ARTICULARE),
    vertex(m::SGOGN, lm::SELLA, lm::ARTICULARE, lm::GONION),
    vertex(m::ARGOGN, lm::ARTICULARE, lm::GONION, lm::GNATHION),
    // Gonial angle split by the Go–N line.
    vertex(m::UGA, lm::ARTICULARE, lm::GONION, lm::NASION),
    vertex(m::LGA, lm::NASION, lm::GONION, lm::MENTON),
];

pub(crate) const COMPOSITE_ANGLES: &[CompositeAngle] = &[
    CompositeAngle {
        name: m::ANB,
        offset: 0.0,
        terms: &[(1.0, m::SNA), (-1.0, m::SNB)],
    },
    CompositeAngle {
        name: m::FMIA,
        offset: 180.0,
        terms: &[(-1.0, m::FMA), (-1.0, m::IMPA)],
    },
    CompositeAngle {
        name: m::SUM,
        offset: 0.0,
        terms: &[(1.0, m::NSAR), (1.0, m::SGOGN), (1.0, m::ARGOGN)],
    },
];
