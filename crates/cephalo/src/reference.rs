//! Clinical reference values: validation ranges and population norms.
//!
//! The engine ships sensible defaults; deployments can replace both tables
//! through [`AnalysisConfig`](crate::AnalysisConfig).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::measurements::names as m;

/// Default normal ranges `[low, high]` checked by the validation pass.
const DEFAULT_NORMAL_RANGES: &[(&str, [f64; 2])] = &[
    (m::SNA, [79.0, 83.0]),
    (m::SNB, [78.0, 82.0]),
    (m::ANB, [0.0, 4.0]),
    (m::FMA, [22.0, 32.0]),
    (m::IMPA, [85.0, 95.0]),
    (m::FMIA, [60.0, 70.0]),
    (m::INTERINCISAL, [125.0, 135.0]),
    (m::SN_GOGN, [27.0, 37.0]),
    (m::U1_SN, [100.0, 106.0]),
    (m::NSAR, [118.0, 128.0]),
    (m::ARGOGN, [120.0, 130.0]),
    (m::SUM, [390.0, 402.0]),
    (m::Y_ANGLE, [53.0, 66.0]),
    (m::FHR, [59.0, 65.0]),
];

/// Default population norms (mean, standard deviation).
///
/// Indices are absent: the published APDI/ODI norms belong to the weighted
/// formulas, not the simplified scale computed here.
const DEFAULT_NORMS: &[(&str, f64, f64)] = &[
    (m::SNA, 81.0, 3.0),
    (m::SNB, 79.0, 3.0),
    (m::ANB, 2.0, 2.0),
    (m::FMA, 25.0, 4.5),
    (m::IMPA, 90.0, 5.0),
    (m::FMIA, 65.0, 5.0),
    (m::INTERINCISAL, 130.0, 6.0),
    (m::SN_GOGN, 32.0, 5.0),
    (m::U1_SN, 103.0, 5.5),
    (m::NSAR, 123.0, 5.0),
    (m::ARGOGN, 125.0, 5.0),
    (m::SUM, 396.0, 6.0),
    (m::Y_ANGLE, 59.4, 3.8),
    (m::FHR, 62.0, 3.0),
    (m::E_LINE_UPPER, -4.0, 2.0),
    (m::E_LINE_LOWER, -2.0, 2.0),
    (m::OVERBITE, 2.5, 2.0),
    (m::OVERJET, 2.5, 2.5),
    (m::U1_TO_NA, 4.0, 2.0),
    (m::L1_TO_NB, 4.0, 2.0),
    (m::WITS, -1.0, 2.0),
];

/// Normal-range table used when no configuration overrides it.
pub fn default_normal_ranges() -> BTreeMap<String, [f64; 2]> {
    DEFAULT_NORMAL_RANGES
        .iter()
        .map(|(name, range)| (name.to_string(), *range))
        .collect()
}

/// Population mean and standard deviation for one measurement or index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceNorm {
    pub mean: f64,
    pub sd: f64,
}

impl ReferenceNorm {
    /// Signed distance from the mean in standard deviations.
    pub fn z_score(&self, value: f64) -> f64 {
        (value - self.mean) / self.sd
    }
}

/// Name → norm lookup used for classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceTable(BTreeMap<String, ReferenceNorm>);

impl ReferenceTable {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&ReferenceNorm> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, norm: ReferenceNorm) {
        self.0.insert(name.into(), norm);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReferenceNorm)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self(
            DEFAULT_NORMS
                .iter()
                .map(|&(name, mean, sd)| (name.to_string(), ReferenceNorm { mean, sd }))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ranges_are_well_formed() {
        let ranges = default_normal_ranges();
        assert_eq!(ranges.len(), 14);
        for (name, [lo, hi]) in &ranges {
            assert!(lo < hi, "{name}: inverted range");
        }
        assert_eq!(ranges["SNA"], [79.0, 83.0]);
        assert_eq!(ranges["Interincisal"], [125.0, 135.0]);
    }

    #[test]
    fn default_norm_means_sit_inside_their_ranges() {
        let ranges = default_normal_ranges();
        let table = ReferenceTable::default();
        for (name, norm) in table.iter() {
            assert!(norm.sd > 0.0);
            if let Some([lo, hi]) = ranges.get(name) {
                assert!(norm.mean >= *lo && norm.mean <= *hi, "{name} mean outside range");
            }
        }
    }

    #[test]
    fn default_norms_cover_measurements_only() {
        let table = ReferenceTable::default();
        for name in crate::indices::INDEX_FALLBACKS.iter().map(|(n, _)| *n) {
            assert!(table.get(name).is_none(), "{name} has a default norm");
        }
        assert!(table.get(m::SNA).is_some());
    }

    #[test]
    fn z_score_is_signed() {
        let n = ReferenceNorm { mean: 2.0, sd: 2.0 };
        assert_eq!(n.z_score(6.0), 2.0);
        assert_eq!(n.z_score(-1.0), -1.5);
    }
}
