//! Separating-axis overlap test for oriented rectangles.

use crate::geom::pairwise;
use crate::types::Vec2;

use super::Quad;

fn project(quad: &Quad, axis: Vec2) -> (f32, f32) {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for corner in quad.corners {
        let dot = corner.dot(axis);
        lo = lo.min(dot);
        hi = hi.max(dot);
    }
    (lo, hi)
}

/// True if the interiors of two quads overlap. Touching along an edge or a
/// corner is NOT overlap, so shapes can rest exactly against each other.
///
/// Opposite edges of a [`Quad`] are parallel, so two edge normals per quad
/// cover all separating axes.
#[must_use]
pub fn quads_overlap(a: &Quad, b: &Quad) -> bool {
    for quad in [a, b] {
        for (from, to) in pairwise(&quad.corners).take(2) {
            let axis = (to - from).perp();
            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            if max_a <= min_b || max_b <= min_a {
                return false;
            }
        }
    }
    true
}
