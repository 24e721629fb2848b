//! Flat measurement map shared by the angle, distance and index engines.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::angles::AngleResult;
use crate::distances::DistanceResult;

/// Names of every measurement the catalogs can produce.
pub mod names {
    // Angles.
    pub const SNA: &str = "SNA";
    pub const SNB: &str = "SNB";
    pub const ANB: &str = "ANB";
    pub const SN_POG: &str = "SN-Pog";
    pub const FMA: &str = "FMA";
    pub const SN_GOGN: &str = "SN-GoGn";
    pub const SN_FH: &str = "SN-FH";
    pub const SN_PP: &str = "SN-PP";
    pub const FH_PP: &str = "FH-PP";
    pub const PMA: &str = "PMA";
    pub const FACIAL_ANGLE: &str = "Facial Angle";
    pub const Y_ANGLE: &str = "Y-angle";
    pub const CONVEXITY: &str = "Convexity";
    pub const U1_SN: &str = "U1-SN";
    pub const U1_PP: &str = "U1-PP";
    pub const U1_NA_ANGLE: &str = "U1-NA";
    pub const L1_NB_ANGLE: &str = "L1-NB";
    pub const IMPA: &str = "IMPA";
    pub const FMIA: &str = "FMIA";
    pub const INTERINCISAL: &str = "Interincisal";
    pub const NSAR: &str = "NSAr";
    pub const SGOGN: &str = "SGoGn";
    pub const ARGOGN: &str = "ArGoGn";
    pub const SUM: &str = "Sum";
    pub const UGA: &str = "UGA";
    pub const LGA: &str = "LGA";

    // Distances and ratios.
    pub const E_LINE_UPPER: &str = "E-line Upper";
    pub const E_LINE_LOWER: &str = "E-line Lower";
    pub const OVERBITE: &str = "Overbite";
    pub const OVERJET: &str = "Overjet";
    pub const ACBL: &str = "ACBL";
    pub const SN: &str = "SN";
    pub const MBL: &str = "MBL";
    pub const AFH: &str = "AFH";
    pub const PFH: &str = "PFH";
    pub const UFH: &str = "UFH";
    pub const LFH: &str = "LFH";
    pub const FHR: &str = "FHR";
    pub const HR: &str = "HR";
    pub const U1_TO_NA: &str = "U1-to-NA";
    pub const L1_TO_NB: &str = "L1-to-NB";
    pub const RAMUS: &str = "Ramus";
    pub const MXBL: &str = "MxBL";
    pub const PCBL: &str = "PCBL";
    pub const S_POR: &str = "S-Por";
    pub const S_A: &str = "S-A";
    pub const NAPERP_A: &str = "Naperp-A";
    pub const WITS: &str = "Wits";
    pub const CAL: &str = "Cal";
}

/// Measurement name → value.
///
/// A measurement is either present with a finite value or absent; non-finite
/// values are refused on insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementMap(BTreeMap<String, f64>);

impl MeasurementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of angle and distance outputs.
    pub fn from_results(
        angles: &BTreeMap<String, AngleResult>,
        distances: &BTreeMap<String, DistanceResult>,
    ) -> Self {
        let mut map = Self::new();
        for (name, a) in angles {
            map.insert(name.clone(), a.angle);
        }
        for (name, d) in distances {
            map.insert(name.clone(), d.scaled_distance);
        }
        map
    }

    /// Insert a value; returns `false` (and stores nothing) if it is not finite.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> bool {
        let name = name.into();
        if !value.is_finite() {
            tracing::debug!(name = %name, value, "refusing non-finite measurement");
            return false;
        }
        self.0.insert(name, value);
        true
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, f64)> for MeasurementMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl<'a> FromIterator<(&'a str, f64)> for MeasurementMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}
