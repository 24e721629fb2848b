//! Structured notes collected while an analysis runs.
//!
//! Skipped measurements and degenerate geometry are expected in partial
//! clinical workflows. They are reported here, alongside the result, and as
//! `tracing` debug events; they never abort the pipeline.

use serde::{Deserialize, Serialize};

/// Pipeline stage that produced a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Calibration,
    DerivedLandmarks,
    Angles,
    Distances,
    Indices,
}

/// What went wrong for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoteKind {
    /// Required landmarks were not supplied (or could not be derived).
    MissingLandmarks { names: Vec<String> },
    /// Required upstream measurements were absent.
    MissingMeasurements { names: Vec<String> },
    /// Geometry was degenerate (zero-length line, parallel lines, ...).
    DegenerateGeometry { reason: String },
}

/// A single note about a skipped or degraded computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisNote {
    pub stage: Stage,
    /// Measurement, landmark or index the note is about.
    pub subject: String,
    #[serde(flatten)]
    pub kind: NoteKind,
}

/// Reason a single computation produced no value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Skip {
    Missing(Vec<String>),
    Degenerate(&'static str),
}

impl From<Vec<String>> for Skip {
    fn from(missing: Vec<String>) -> Self {
        Self::Missing(missing)
    }
}

/// Append-only note collector threaded through one pipeline run.
#[derive(Debug, Clone, Default)]
pub(crate) struct Notes {
    notes: Vec<AnalysisNote>,
}

impl Notes {
    pub(crate) fn push(&mut self, stage: Stage, subject: &str, kind: NoteKind) {
        tracing::debug!(?stage, subject, ?kind, "measurement skipped");
        self.notes.push(AnalysisNote {
            stage,
            subject: subject.to_string(),
            kind,
        });
    }

    pub(crate) fn skip(&mut self, stage: Stage, subject: &str, skip: Skip) {
        let kind = match skip {
            Skip::Missing(names) => NoteKind::MissingLandmarks { names },
            Skip::Degenerate(reason) => NoteKind::DegenerateGeometry {
                reason: reason.to_string(),
            },
        };
        self.push(stage, subject, kind);
    }

    pub(crate) fn into_vec(self) -> Vec<AnalysisNote> {
        self.notes
    }

    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[AnalysisNote] {
        &self.notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_serialize_with_flat_kind_tag() {
        let mut notes = Notes::default();
        notes.skip(
            Stage::Angles,
            "FMA",
            Skip::Missing(vec!["Go".to_string()]),
        );
        notes.skip(Stage::DerivedLandmarks, "Gn", Skip::Degenerate("parallel lines"));

        let v = serde_json::to_value(notes.into_vec()).unwrap();
        assert_eq!(v[0]["stage"], "angles");
        assert_eq!(v[0]["kind"], "missing_landmarks");
        assert_eq!(v[0]["names"][0], "Go");
        assert_eq!(v[1]["kind"], "degenerate_geometry");
        assert_eq!(v[1]["reason"], "parallel lines");
    }
}
