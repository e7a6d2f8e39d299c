//! Collision shapes. Everything the detector sees is an oriented
//! quadrilateral; walls are axis-aligned rectangles expressed in the same
//! form.

use crate::geom::rotate_about;
use crate::types::Vec2;

/// Inward shrink (px) applied to the vehicle footprint before building its
/// collision quad. Sprites overdraw their physical outline slightly; without
/// the margin, cars scrape on contacts the player cannot see.
pub const COLLISION_MARGIN: f32 = 3.0;

/// An oriented rectangle as 4 world-frame corners in winding order.
///
/// Construction keeps opposite edges parallel; the SAT test in this module
/// tree relies on that and is exact only for such quads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    pub corners: [Vec2; 4],
}

impl Quad {
    /// Axis-aligned rectangle from opposite corners.
    #[must_use]
    pub fn from_rect(min: Vec2, max: Vec2) -> Self {
        Self {
            corners: [
                Vec2::new(min.x, min.y),
                Vec2::new(max.x, min.y),
                Vec2::new(max.x, max.y),
                Vec2::new(min.x, max.y),
            ],
        }
    }

    /// Rectangle centered on `center` with the given half extents, rotated
    /// by `rotation` radians.
    #[must_use]
    pub fn from_center(center: Vec2, half_extents: Vec2, rotation: f32) -> Self {
        let offsets = [
            Vec2::new(-half_extents.x, -half_extents.y),
            Vec2::new(half_extents.x, -half_extents.y),
            Vec2::new(half_extents.x, half_extents.y),
            Vec2::new(-half_extents.x, half_extents.y),
        ];
        let mut corners = [Vec2::ZERO; 4];
        for (corner, offset) in corners.iter_mut().zip(offsets) {
            *corner = rotate_about(center + offset, center, rotation);
        }
        Self { corners }
    }
}

/// Builds the vehicle's collision quad from its pose and full footprint
/// (width x height of the un-rotated sprite).
///
/// The sprite art points up while orientation 0 faces world +x, so the quad
/// is rotated by `-orientation + 90deg` to line up with the heading.
#[must_use]
pub fn vehicle_quad(position: Vec2, orientation: f32, footprint: Vec2) -> Quad {
    let half_extents = Vec2::new(
        (footprint.x * 0.5 - COLLISION_MARGIN).max(0.0),
        (footprint.y * 0.5 - COLLISION_MARGIN).max(0.0),
    );
    Quad::from_center(
        position,
        half_extents,
        -orientation + std::f32::consts::FRAC_PI_2,
    )
}
