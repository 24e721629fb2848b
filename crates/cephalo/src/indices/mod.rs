//! Composite diagnostic indices.
//!
//! Every index is always present in the output. When an upstream
//! measurement is absent the index takes its clinical mean (see
//! [`fallback_value`]) and is marked as a fallback; indices computed from a
//! fallback index fall back as well.

pub mod classify;
pub mod formulas;
mod validation;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::diagnostics::{NoteKind, Notes, Stage};
use crate::measurements::{names as m, MeasurementMap};

pub use validation::{validate, Severity, ValidationWarning};

/// Index names.
pub mod names {
    pub const HGI: &str = "HGI";
    pub const VGI: &str = "VGI";
    pub const FABA: &str = "FABA";
    pub const PPA: &str = "PPA";
    pub const APDI: &str = "APDI";
    pub const MAB: &str = "MAB";
    pub const ODI: &str = "ODI";
    pub const IAPDI: &str = "IAPDI";
    pub const IODI: &str = "IODI";
    pub const APDL: &str = "APDL";
    pub const APDL2: &str = "2APDL";
    pub const VDL: &str = "VDL";
    pub const CFD: &str = "CFD";
    pub const EI: &str = "EI";
}

use names as idx;

/// Index name → value used when the index cannot be computed.
pub const INDEX_FALLBACKS: &[(&str, f64)] = &[
    (idx::HGI, 0.0),
    (idx::VGI, 0.0),
    (idx::FABA, 7.0),
    (idx::PPA, 0.0),
    (idx::APDI, 81.4),
    (idx::MAB, 0.0),
    (idx::ODI, 74.5),
    (idx::IAPDI, 81.0),
    (idx::IODI, 80.0),
    (idx::APDL, 0.0),
    (idx::APDL2, 0.0),
    (idx::VDL, 0.0),
    (idx::CFD, 0.0),
    (idx::EI, 30.0),
];

/// Clinical mean reported for `name` when it cannot be computed.
pub fn fallback_value(name: &str) -> Option<f64> {
    INDEX_FALLBACKS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, v)| v)
}

/// Computed indices plus the names that were filled from fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticIndexSet {
    pub values: BTreeMap<String, f64>,
    pub fallbacks: BTreeSet<String>,
}

impl DiagnosticIndexSet {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Value of `name` only when it was computed from measurements.
    pub fn computed(&self, name: &str) -> Option<f64> {
        if self.is_fallback(name) {
            None
        } else {
            self.get(name)
        }
    }

    pub fn is_fallback(&self, name: &str) -> bool {
        self.fallbacks.contains(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub(crate) fn set(&mut self, name: &str, value: f64) {
        self.fallbacks.remove(name);
        self.values.insert(name.to_string(), value);
    }

    pub(crate) fn set_fallback(&mut self, name: &str, value: f64) {
        self.fallbacks.insert(name.to_string());
        self.values.insert(name.to_string(), value);
    }
}

/// Where an index formula reads an input from.
#[derive(Debug, Clone, Copy)]
enum Input {
    Measurement(&'static str),
    Index(&'static str),
}

use Input::{Index as I, Measurement as M};

struct IndexBuilder<'a> {
    measurements: &'a MeasurementMap,
    set: DiagnosticIndexSet,
}

impl<'a> IndexBuilder<'a> {
    fn new(measurements: &'a MeasurementMap) -> Self {
        Self {
            measurements,
            set: DiagnosticIndexSet::default(),
        }
    }

    /// Resolve `inputs`, reporting absent measurements and fallback indices.
    fn take<const N: usize>(&self, inputs: [Input; N]) -> Result<[f64; N], Vec<String>> {
        let mut out = [0.0; N];
        let mut missing = Vec::new();
        for (slot, input) in out.iter_mut().zip(inputs) {
            let (name, value) = match input {
                Input::Measurement(name) => (name, self.measurements.get(name)),
                Input::Index(name) => (name, self.set.computed(name)),
            };
            match value {
                Some(v) => *slot = v,
                None => missing.push(name.to_string()),
            }
        }
        if missing.is_empty() {
            Ok(out)
        } else {
            Err(missing)
        }
    }

    fn record(&mut self, name: &'static str, result: Result<f64, Vec<String>>, notes: &mut Notes) {
        let fallback = fallback_value(name).unwrap_or(0.0);
        match result {
            Ok(v) if v.is_finite() => self.set.set(name, v),
            Ok(v) => {
                notes.push(
                    Stage::Indices,
                    name,
                    NoteKind::DegenerateGeometry {
                        reason: format!("non-finite index value {}", v),
                    },
                );
                self.set.set_fallback(name, fallback);
            }
            Err(names) => {
                notes.push(Stage::Indices, name, NoteKind::MissingMeasurements { names });
                self.set.set_fallback(name, fallback);
            }
        }
    }
}

/// Compute every diagnostic index from a measurement map.
pub fn calculate_indices(measurements: &MeasurementMap) -> DiagnosticIndexSet {
    calculate_with_notes(measurements, &mut Notes::default())
}

/// Indices plus range warnings against the default normal-range table.
pub fn compute_indices(
    measurements: &MeasurementMap,
) -> (DiagnosticIndexSet, Vec<ValidationWarning>) {
    let indices = calculate_indices(measurements);
    let warnings = validate(
        measurements,
        &indices,
        &crate::reference::default_normal_ranges(),
        crate::config::DEFAULT_SEVERE_DEVIATION,
    );
    (indices, warnings)
}

/// Compute every index, recording a note for each one that falls back.
///
/// EI needs ODI and APDI to be computed as well as Interincisal and both
/// E-lines; it never mixes fallback ODI/APDI means into a patient value and
/// takes its own fallback (30) instead.
pub(crate) fn calculate_with_notes(
    measurements: &MeasurementMap,
    notes: &mut Notes,
) -> DiagnosticIndexSet {
    let mut b = IndexBuilder::new(measurements);

    let r = b.take([M(m::MBL), M(m::ACBL)]).map(|[mbl, acbl]| formulas::hgi(mbl, acbl));
    b.record(idx::HGI, r, notes);

    let r = b.take([M(m::FHR)]).map(|[fhr]| formulas::vgi(fhr));
    b.record(idx::VGI, r, notes);

    let r = b.take([M(m::ANB)]).map(|[anb]| formulas::faba(anb));
    b.record(idx::FABA, r, notes);

    let r = b.take([M(m::FMA)]).map(|[fma]| formulas::ppa(fma));
    b.record(idx::PPA, r, notes);

    let r = b
        .take([I(idx::FABA), I(idx::PPA)])
        .map(|[faba, ppa]| formulas::apdi(faba, ppa));
    b.record(idx::APDI, r, notes);

    let r = b.take([M(m::IMPA)]).map(|[impa]| formulas::mab(impa));
    b.record(idx::MAB, r, notes);

    let r = b
        .take([I(idx::MAB), I(idx::PPA)])
        .map(|[mab, ppa]| formulas::odi(mab, ppa));
    b.record(idx::ODI, r, notes);

    let r = b
        .take([I(idx::APDI), M(m::FMA), M(m::ANB)])
        .map(|[apdi, fma, anb]| formulas::iapdi(apdi, fma, anb));
    b.record(idx::IAPDI, r, notes);

    let r = b
        .take([M(m::FMA), M(m::ANB)])
        .map(|[fma, anb]| formulas::iodi(fma, anb));
    b.record(idx::IODI, r, notes);

    match b.take([I(idx::APDI), I(idx::IAPDI)]) {
        Ok([apdi, iapdi]) => {
            let (apdl, apdl2) = formulas::apdl(apdi, iapdi);
            b.record(idx::APDL, Ok(apdl), notes);
            b.record(idx::APDL2, Ok(apdl2), notes);
        }
        Err(missing) => {
            b.record(idx::APDL, Err(missing.clone()), notes);
            b.record(idx::APDL2, Err(missing), notes);
        }
    }

    let r = b
        .take([I(idx::ODI), I(idx::IODI)])
        .map(|[odi, iodi]| formulas::vdl(odi, iodi));
    b.record(idx::VDL, r, notes);

    let r = b
        .take([I(idx::ODI), I(idx::APDI), I(idx::IAPDI), I(idx::IODI)])
        .map(|[odi, apdi, iapdi, iodi]| formulas::cfd(odi, apdi, iapdi, iodi));
    b.record(idx::CFD, r, notes);

    let r = b
        .take([
            I(idx::ODI),
            I(idx::APDI),
            M(m::INTERINCISAL),
            M(m::E_LINE_UPPER),
            M(m::E_LINE_LOWER),
        ])
        .map(|[odi, apdi, ii, upper, lower]| formulas::ei(odi, apdi, ii, upper, lower));
    b.record(idx::EI, r, notes);

    let set = b.set;
    tracing::debug!(
        computed = set.len() - set.fallbacks.len(),
        fallbacks = set.fallbacks.len(),
        "diagnostic indices"
    );
    set
}
