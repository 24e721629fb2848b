//! Named clinical distance definitions.

use crate::landmarks::names as lm;
use crate::measurements::names as m;

/// Orientation applied to a signed perpendicular distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignConvention {
    /// Sign of `(line_end − line_start) × (point − line_start)`.
    CrossProduct,
    /// Opposite of the cross-product sign. With the face to the right and y
    /// pointing down, points behind (posterior to) the line read negative.
    Inverted,
}

impl SignConvention {
    pub(crate) fn apply(self, signed: f64) -> f64 {
        match self {
            Self::CrossProduct => signed,
            Self::Inverted => -signed,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum DistanceDef {
    Between {
        from: &'static str,
        to: &'static str,
    },
    Perpendicular {
        line: [&'static str; 2],
        point: &'static str,
        sign: SignConvention,
    },
    /// `upper.y − lower.y`.
    VerticalOffset {
        upper: &'static str,
        lower: &'static str,
    },
    /// `upper.x − lower.x`.
    HorizontalOffset {
        upper: &'static str,
        lower: &'static str,
    },
    NasionPerpendicular {
        point: &'static str,
    },
    Wits,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct DistanceEntry {
    pub name: &'static str,
    pub def: DistanceDef,
}

/// `numerator / denominator × 100`, from raw lengths.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RatioDef {
    pub name: &'static str,
    pub numerator: &'static str,
    pub denominator: &'static str,
}

const fn between(name: &'static str, from: &'static str, to: &'static str) -> DistanceEntry {
    DistanceEntry {
        name,
        def: DistanceDef::Between { from, to },
    }
}

const E_LINE: [&str; 2] = [lm::PRONASALE, lm::SOFT_TISSUE_POGONION];

pub(crate) const DISTANCE_CATALOG: &[DistanceEntry] = &[
    // Soft tissue.
    DistanceEntry {
        name: m::E_LINE_UPPER,
        def: DistanceDef::Perpendicular {
            line: E_LINE,
            point: lm::UPPER_LIP,
            sign: SignConvention::Inverted,
        },
    },
    DistanceEntry {
        name: m::E_LINE_LOWER,
        def: DistanceDef::Perpendicular {
            line: E_LINE,
            point: lm::LOWER_LIP,
            sign: SignConvention::Inverted,
        },
    },
    // Incisor relationship.
    DistanceEntry {
        name: m::OVERBITE,
        def: DistanceDef::VerticalOffset {
            upper: lm::UPPER_INCISOR_TIP,
            lower: lm::LOWER_INCISOR_TIP,
        },
    },
    DistanceEntry {
        name: m::OVERJET,
        def: DistanceDef::HorizontalOffset {
            upper: lm::UPPER_INCISOR_TIP,
            lower: lm::LOWER_INCISOR_TIP,
        },
    },
    DistanceEntry {
        name: m::U1_TO_NA,
        def: DistanceDef::Perpendicular {
            line: [lm::NASION, lm::A_POINT],
            point: lm::UPPER_INCISOR_TIP,
            sign: SignConvention::Inverted,
        },
    },
    DistanceEntry {
        name: m::L1_TO_NB,
        def: DistanceDef::Perpendicular {
            line: [lm::NASION, lm::B_POINT],
            point: lm::LOWER_INCISOR_TIP,
            sign: SignConvention::Inverted,
        },
    },
    // Lengths.
    between(m::ACBL, lm::SELLA, lm::NASION),
    between(m::SN, lm::SELLA, lm::NASION),
    between(m::MBL, lm::GONION, lm::MENTON),
    between(m::AFH, lm::NASION, lm::MENTON),
    between(m::PFH, lm::SELLA, lm::GONION),
    between(m::UFH, lm::NASION, lm::ANS),
    between(m::LFH, lm::ANS, lm::MENTON),
    between(m::RAMUS, lm::ARTICULARE, lm::GONION),
    between(m::MXBL, lm::ANS, lm::PNS),
    between(m::PCBL, lm::SELLA, lm::ARTICULARE),
    between(m::S_POR, lm::SELLA, lm::PORION),
    between(m::S_A, lm::SELLA, lm::A_POINT),
    // Sagittal jaw relation.
    DistanceEntry {
        name: m::NAPERP_A,
        def: DistanceDef::NasionPerpendicular { point: lm::A_POINT },
    },
    DistanceEntry {
        name: m::WITS,
        def: DistanceDef::Wits,
    },
];

pub(crate) const RATIOS: &[RatioDef] = &[
    RatioDef {
        name: m::FHR,
        numerator: m::PFH,
        denominator: m::AFH,
    },
    RatioDef {
        name: m::HR,
        numerator: m::LFH,
        denominator: m::AFH,
    },
];
