//! Normal-range validation of measurements and indices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DiagnosticIndexSet;
use crate::measurements::MeasurementMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Severe,
}

/// A value outside its clinical normal range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub name: String,
    pub value: f64,
    pub expected_range: [f64; 2],
    pub severity: Severity,
}

/// Check every ranged name present in `measurements` or `indices`.
///
/// Index values filled from fallbacks are not checked. A warning is
/// `severe` when the value lies more than `severe_deviation` from the range
/// midpoint. Warnings come out in range-table order.
pub fn validate(
    measurements: &MeasurementMap,
    indices: &DiagnosticIndexSet,
    ranges: &BTreeMap<String, [f64; 2]>,
    severe_deviation: f64,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    for (name, &[low, high]) in ranges {
        let Some(value) = measurements.get(name).or_else(|| indices.computed(name)) else {
            continue;
        };
        if (low..=high).contains(&value) {
            continue;
        }
        let midpoint = (low + high) / 2.0;
        let severity = if (value - midpoint).abs() > severe_deviation {
            Severity::Severe
        } else {
            Severity::Mild
        };
        tracing::debug!(name = %name, value, low, high, ?severity, "value outside normal range");
        warnings.push(ValidationWarning {
            name: name.clone(),
            value,
            expected_range: [low, high],
            severity,
        });
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::default_normal_ranges;

    fn ranges() -> BTreeMap<String, [f64; 2]> {
        default_normal_ranges()
    }

    #[test]
    fn in_range_values_are_silent() {
        let m: MeasurementMap = [("SNA", 81.0), ("ANB", 0.0), ("FMA", 32.0)]
            .into_iter()
            .collect();
        let w = validate(&m, &DiagnosticIndexSet::default(), &ranges(), 10.0);
        assert!(w.is_empty());
    }

    #[test]
    fn severity_depends_on_midpoint_distance() {
        // ANB midpoint 2: 7 is 5 away (mild), 13 is 11 away (severe).
        let mild: MeasurementMap = [("ANB", 7.0)].into_iter().collect();
        let w = validate(&mild, &DiagnosticIndexSet::default(), &ranges(), 10.0);
        assert_eq!(w.len(), 1);
        assert_eq!(w[0].severity, Severity::Mild);
        assert_eq!(w[0].expected_range, [0.0, 4.0]);

        let severe: MeasurementMap = [("ANB", 13.0)].into_iter().collect();
        let w = validate(&severe, &DiagnosticIndexSet::default(), &ranges(), 10.0);
        assert_eq!(w[0].severity, Severity::Severe);

        let w = validate(&severe, &DiagnosticIndexSet::default(), &ranges(), 12.0);
        assert_eq!(w[0].severity, Severity::Mild);
    }

    #[test]
    fn unranged_and_absent_names_are_ignored() {
        let m: MeasurementMap = [("Overjet", 40.0)].into_iter().collect();
        assert!(validate(&m, &DiagnosticIndexSet::default(), &ranges(), 10.0).is_empty());
    }

    #[test]
    fn index_ranges_skip_fallback_values() {
        let mut ranges = ranges();
        ranges.insert("APDI".to_string(), [77.6, 85.2]);

        let mut indices = DiagnosticIndexSet::default();
        indices.set_fallback("APDI", 81.4);
        let w = validate(&MeasurementMap::new(), &indices, &ranges, 10.0);
        assert!(w.is_empty());

        let mut indices = DiagnosticIndexSet::default();
        indices.set("APDI", 7.0);
        let w = validate(&MeasurementMap::new(), &indices, &ranges, 10.0);
        assert_eq!(w.len(), 1);
        assert_eq!(w[0].severity, Severity::Severe);
    }
}
