//! Typed landmark coordinates and the named landmark set.
//!
//! All points passed to one analysis must live in the same coordinate space
//! (normalized or pixel); the engine never mixes or converts spaces.

use std::collections::BTreeMap;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Landmark names understood by the measurement catalogs.
///
/// The set is open: unknown names are carried through untouched.
pub mod names {
    pub const SELLA: &str = "Sella";
    pub const NASION: &str = "Nasion";
    pub const A_POINT: &str = "A-Point";
    pub const B_POINT: &str = "B-Point";
    pub const PORION: &str = "Porion";
    pub const ORBITALE: &str = "Orbitale";
    pub const MENTON: &str = "Menton";
    pub const POGONION: &str = "Pogonion";
    /// Articulare.
    pub const ARTICULARE: &str = "Ar";
    /// Point on the posterior ramus border below Articulare.
    pub const RAMUS_DOWN: &str = "Ramus Down";
    /// Point on the lower border of the mandibular corpus.
    pub const CORPUS_LT: &str = "Corpus Lt.";
    pub const ANS: &str = "ANS";
    pub const PNS: &str = "PNS";
    pub const UPPER_INCISOR_TIP: &str = "Upper Incisor Tip";
    pub const UPPER_INCISOR_APEX: &str = "Upper Incisor Apex";
    pub const LOWER_INCISOR_TIP: &str = "Lower Incisor Tip";
    pub const LOWER_INCISOR_APEX: &str = "Lower Incisor Apex";
    /// Mesial cusp of the upper first molar (posterior end of the occlusal plane).
    pub const UPPER_MOLAR: &str = "Upper Molar";
    pub const PRONASALE: &str = "Pronasale";
    pub const SOFT_TISSUE_POGONION: &str = "Soft Tissue Pogonion";
    pub const UPPER_LIP: &str = "Upper Lip";
    pub const LOWER_LIP: &str = "Lower Lip";
    pub const RULER_START: &str = "Ruler Start";
    pub const RULER_END: &str = "Ruler End";

    /// Gonion, constructed from the ramus and mandibular-border lines.
    pub const GONION: &str = "Go";
    /// Gnathion, constructed from the facial line and the mandibular border.
    pub const GNATHION: &str = "Gn";
}

/// Errors raised for malformed landmark input.
///
/// These indicate a caller defect; incomplete landmark sets are not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum LandmarkError {
    /// A landmark was given an empty (or whitespace-only) name.
    EmptyName,
    /// A landmark coordinate is NaN or infinite.
    NonFinite {
        /// Landmark name.
        name: String,
        /// Offending x coordinate.
        x: f64,
        /// Offending y coordinate.
        y: f64,
    },
}

impl std::fmt::Display for LandmarkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "landmark name must not be empty"),
            Self::NonFinite { name, x, y } => {
                write!(f, "landmark '{}' has non-finite coordinates ({}, {})", name, x, y)
            }
        }
    }
}

impl std::error::Error for LandmarkError {}

/// 2D landmark coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn from_vector(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<[f64; 2]> for Point {
    fn from(xy: [f64; 2]) -> Self {
        Self::new(xy[0], xy[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Named landmark coordinates for one image.
///
/// Serialized as a plain `{"Sella": {"x": .., "y": ..}, ...}` object.
/// Deserialization validates every point, so a set obtained from JSON never
/// contains non-finite coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Point>",
    into = "BTreeMap<String, Point>"
)]
pub struct LandmarkSet {
    points: BTreeMap<String, Point>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `(name, point)` pairs, validating each entry.
    pub fn from_points<I, S>(points: I) -> Result<Self, LandmarkError>
    where
        I: IntoIterator<Item = (S, Point)>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for (name, p) in points {
            set.insert(name, p)?;
        }
        Ok(set)
    }

    /// Insert or replace a landmark. Returns the previous point, if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        point: Point,
    ) -> Result<Option<Point>, LandmarkError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LandmarkError::EmptyName);
        }
        if !point.is_finite() {
            return Err(LandmarkError::NonFinite {
                name,
                x: point.x,
                y: point.y,
            });
        }
        Ok(self.points.insert(name, point))
    }

    /// Copy of this set without `name`.
    pub fn without(&self, name: &str) -> Self {
        let mut points = self.points.clone();
        points.remove(name);
        Self { points }
    }

    pub fn get(&self, name: &str) -> Option<Point> {
        self.points.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.points.contains_key(name)
    }

    /// Look up several landmarks at once.
    ///
    /// On failure returns every missing name, in request order.
    pub fn get_many<const N: usize>(&self, names: [&str; N]) -> Result<[Point; N], Vec<String>> {
        let mut out = [Point::new(0.0, 0.0); N];
        let mut missing = Vec::new();
        for (slot, name) in out.iter_mut().zip(names) {
            match self.get(name) {
                Some(p) => *slot = p,
                None => missing.push(name.to_string()),
            }
        }
        if missing.is_empty() {
            Ok(out)
        } else {
            Err(missing)
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.points.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.points.iter().map(|(k, p)| (k.as_str(), *p))
    }

    /// Parse a landmark set from its JSON object form.
    pub fn from_json_str(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}

impl TryFrom<BTreeMap<String, Point>> for LandmarkSet {
    type Error = LandmarkError;

    fn try_from(points: BTreeMap<String, Point>) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

impl From<LandmarkSet> for BTreeMap<String, Point> {
    fn from(set: LandmarkSet) -> Self {
        set.points
    }
}
