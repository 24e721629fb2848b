//! Clinical classification against population norms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DiagnosticIndexSet;
use crate::measurements::{names as m, MeasurementMap};
use crate::reference::ReferenceTable;

/// Position of a value relative to its population norm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deviation {
    Low,
    Normal,
    High,
}

impl Deviation {
    /// `|z| ≤ 1` is normal.
    pub fn from_z_score(z: f64) -> Self {
        if z < -1.0 {
            Self::Low
        } else if z > 1.0 {
            Self::High
        } else {
            Self::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub value: f64,
    pub z_score: f64,
    pub deviation: Deviation,
}

/// Sagittal jaw relationship from ANB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkeletalClass {
    #[serde(rename = "class_i")]
    ClassI,
    #[serde(rename = "class_ii")]
    ClassII,
    #[serde(rename = "class_iii")]
    ClassIII,
}

impl SkeletalClass {
    pub fn from_anb(anb: f64) -> Self {
        if anb < 0.0 {
            Self::ClassIII
        } else if anb > 4.0 {
            Self::ClassII
        } else {
            Self::ClassI
        }
    }
}

/// Vertical growth pattern from FMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthPattern {
    Hypodivergent,
    Normodivergent,
    Hyperdivergent,
}

impl GrowthPattern {
    pub fn from_fma(fma: f64) -> Self {
        if fma < 22.0 {
            Self::Hypodivergent
        } else if fma > 32.0 {
            Self::Hyperdivergent
        } else {
            Self::Normodivergent
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClinicalSummary {
    pub skeletal_class: Option<SkeletalClass>,
    pub growth_pattern: Option<GrowthPattern>,
    /// Name → classification for every referenced value that was computed.
    pub deviations: BTreeMap<String, Classification>,
}

/// Classify measurements and computed indices against `reference`.
///
/// Fallback index values are left out: they describe the population, not
/// the patient.
pub fn classify(
    measurements: &MeasurementMap,
    indices: &DiagnosticIndexSet,
    reference: &ReferenceTable,
) -> ClinicalSummary {
    let mut deviations = BTreeMap::new();
    for (name, norm) in reference.iter() {
        let Some(value) = measurements.get(name).or_else(|| indices.computed(name)) else {
            continue;
        };
        let z_score = norm.z_score(value);
        deviations.insert(
            name.to_string(),
            Classification {
                value,
                z_score,
                deviation: Deviation::from_z_score(z_score),
            },
        );
    }

    ClinicalSummary {
        skeletal_class: measurements.get(m::ANB).map(SkeletalClass::from_anb),
        growth_pattern: measurements.get(m::FMA).map(GrowthPattern::from_fma),
        deviations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indices::calculate_indices;
    use crate::reference::ReferenceNorm;

    #[test]
    fn class_boundaries() {
        assert_eq!(SkeletalClass::from_anb(-0.1), SkeletalClass::ClassIII);
        assert_eq!(SkeletalClass::from_anb(0.0), SkeletalClass::ClassI);
        assert_eq!(SkeletalClass::from_anb(4.0), SkeletalClass::ClassI);
        assert_eq!(SkeletalClass::from_anb(4.1), SkeletalClass::ClassII);
    }

    #[test]
    fn growth_boundaries() {
        assert_eq!(GrowthPattern::from_fma(21.9), GrowthPattern::Hypodivergent);
        assert_eq!(GrowthPattern::from_fma(22.0), GrowthPattern::Normodivergent);
        assert_eq!(GrowthPattern::from_fma(32.0), GrowthPattern::Normodivergent);
        assert_eq!(GrowthPattern::from_fma(32.5), GrowthPattern::Hyperdivergent);
    }

    #[test]
    fn deviations_use_z_scores() {
        let mut reference = ReferenceTable::empty();
        reference.insert("SNA", ReferenceNorm { mean: 81.0, sd: 3.0 });
        reference.insert("SNB", ReferenceNorm { mean: 79.0, sd: 3.0 });
        reference.insert("FMA", ReferenceNorm { mean: 25.0, sd: 4.5 });

        let meas: MeasurementMap = [("SNA", 88.0), ("SNB", 79.0), ("ANB", 9.0)]
            .into_iter()
            .collect();
        let summary = classify(&meas, &DiagnosticIndexSet::default(), &reference);

        assert_eq!(summary.deviations["SNA"].deviation, Deviation::High);
        assert_eq!(summary.deviations["SNB"].deviation, Deviation::Normal);
        assert!(!summary.deviations.contains_key("FMA"));
        assert_eq!(summary.skeletal_class, Some(SkeletalClass::ClassII));
        assert_eq!(summary.growth_pattern, None);
    }

    #[test]
    fn fallback_indices_are_not_classified() {
        let meas = MeasurementMap::new();
        let indices = calculate_indices(&meas);
        let summary = classify(&meas, &indices, &ReferenceTable::default());
        assert!(summary.deviations.is_empty());
        assert_eq!(summary.skeletal_class, None);
    }

    #[test]
    fn serializes_snake_case_labels() {
        let summary = ClinicalSummary {
            skeletal_class: Some(SkeletalClass::ClassIII),
            growth_pattern: Some(GrowthPattern::Hyperdivergent),
            deviations: BTreeMap::new(),
        };
        let v = serde_json::to_value(&summary).unwrap();
        assert_eq!(v["skeletal_class"], "class_iii");
        assert_eq!(v["growth_pattern"], "hyperdivergent");
    }
}
