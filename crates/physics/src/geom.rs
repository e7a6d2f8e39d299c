//! Small geometry helpers used by the shape builder, the SAT tests and the
//! collision response: polar conversions, point rotation and closest-point
//! queries.

use crate::types::Vec2;

/// Decomposes a vector into `(length, angle)` with `angle = atan2(y, x)`.
/// A zero vector reports angle 0.
#[must_use]
pub fn to_polar(v: Vec2) -> (f32, f32) {
    (v.length(), v.y.atan2(v.x))
}

/// Rebuilds a vector from `(length, angle)`.
#[must_use]
pub fn from_polar(length: f32, angle: f32) -> Vec2 {
    Vec2::new(length * angle.cos(), length * angle.sin())
}

/// Rotates `point` around `origin` by `angle` radians (counter-clockwise).
#[must_use]
pub fn rotate_about(point: Vec2, origin: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    let rel = point - origin;
    origin + Vec2::new(rel.x * cos - rel.y * sin, rel.x * sin + rel.y * cos)
}

/// Closest point to `p` on the segment `a..b`. Degenerate segments collapse
/// to `a`.
#[must_use]
pub fn point_to_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Iterates the closed polygon edges of `points` as consecutive pairs,
/// wrapping from the last point back to the first.
pub fn pairwise(points: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}
