//! 2D analytic geometry primitives on landmark points.
//!
//! Lines are always *infinite* lines through two points; nothing here clamps
//! to segments. Degenerate inputs return `None` (or the documented fallback)
//! instead of panicking.

use nalgebra::Vector2;

use crate::landmarks::Point;

/// Determinant magnitude below which two lines are treated as parallel.
pub const INTERSECTION_EPSILON: f64 = 1e-4;

/// Round `value` to `decimals` decimal places (half away from zero).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (value * f).round() / f
}

/// Euclidean distance.
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2.to_vector() - p1.to_vector()).norm()
}

pub fn midpoint(p1: Point, p2: Point) -> Point {
    Point::from_vector((p1.to_vector() + p2.to_vector()) * 0.5)
}

/// Intersection of the line through (p1, p2) with the line through (p3, p4).
///
/// Each line is written as `a·x + b·y = c` and the 2×2 system is solved with
/// Cramer's rule. Returns `None` for parallel, coincident or zero-length
/// lines. Coordinates are rounded to one decimal.
pub fn line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let a1 = p2.y - p1.y;
    let b1 = p1.x - p2.x;
    let c1 = a1 * p1.x + b1 * p1.y;

    let a2 = p4.y - p3.y;
    let b2 = p3.x - p4.x;
    let c2 = a2 * p3.x + b2 * p3.y;

    let det = a1 * b2 - a2 * b1;
    if det.abs() < INTERSECTION_EPSILON {
        return None;
    }

    let x = (c1 * b2 - b1 * c2) / det;
    let y = (a1 * c2 - c1 * a2) / det;
    Some(Point::new(round_to(x, 1), round_to(y, 1)))
}

/// Orthogonal projection of `point` onto the infinite line through
/// (`line_start`, `line_end`).
///
/// The foot may fall outside the segment. When the line has zero length the
/// point itself is returned.
pub fn perpendicular_foot(line_start: Point, line_end: Point, point: Point) -> Point {
    let s = line_start.to_vector();
    let d = line_end.to_vector() - s;
    let len2 = d.norm_squared();
    if len2 == 0.0 {
        return point;
    }
    let t = (point.to_vector() - s).dot(&d) / len2;
    Point::from_vector(s + d * t)
}

/// Signed distance from `point` to the infinite line through
/// (`line_start`, `line_end`).
///
/// Magnitude is `|A·x + B·y + C| / sqrt(A² + B²)` for the implicit line
/// `A·x + B·y + C = 0`. The sign follows the 2D cross product
/// `(line_end − line_start) × (point − line_start)`: non-negative → `+`,
/// negative → `−`. Returns `None` for a zero-length line.
pub fn perpendicular_signed_distance(
    line_start: Point,
    line_end: Point,
    point: Point,
) -> Option<f64> {
    let a = line_end.y - line_start.y;
    let b = line_start.x - line_end.x;
    let c = line_end.x * line_start.y - line_start.x * line_end.y;

    let norm = (a * a + b * b).sqrt();
    if norm == 0.0 {
        return None;
    }
    let unsigned = (a * point.x + b * point.y + c).abs() / norm;

    let dir = line_end.to_vector() - line_start.to_vector();
    let rel = point.to_vector() - line_start.to_vector();
    let sign = if dir.perp(&rel) >= 0.0 { 1.0 } else { -1.0 };
    Some(sign * unsigned)
}

/// Two points spanning the line through `through` that is perpendicular to
/// the line (`line_start`, `line_end`).
///
/// The direction is the reference direction rotated by +90°, i.e. the line
/// with slope `−1/slope` of the reference line; writing it as a direction
/// vector keeps horizontal and vertical references well defined.
pub fn perpendicular_line_through(
    line_start: Point,
    line_end: Point,
    through: Point,
) -> Option<[Point; 2]> {
    let d = line_end.to_vector() - line_start.to_vector();
    if d.norm_squared() == 0.0 {
        return None;
    }
    let n = Vector2::new(-d.y, d.x);
    Some([through, Point::from_vector(through.to_vector() + n)])
}

/// Unsigned angle between two vectors in degrees, in `[0, 180]`.
///
/// The cosine is clamped to `[-1, 1]` before `acos`. Returns `None` when
/// either vector has zero length.
pub fn angle_between_deg(v1: &Vector2<f64>, v2: &Vector2<f64>) -> Option<f64> {
    let n1 = v1.norm();
    let n2 = v2.norm();
    if n1 == 0.0 || n2 == 0.0 {
        return None;
    }
    let cos = (v1.dot(v2) / (n1 * n2)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}
