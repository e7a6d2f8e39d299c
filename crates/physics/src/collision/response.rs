//! Impact response: derives a corrected velocity and heading for a vehicle
//! whose tentative translation overlapped one or more obstacles.
//!
//! The caller restores the pre-translation position first, so the vehicle
//! center sits outside every obstacle when the contact normal is computed.

use crate::geom::{from_polar, pairwise, point_to_segment, to_polar};
use crate::types::Vec2;

use super::Candidate;

/// Fraction of the approach speed kept along the contact normal.
pub const RESTITUTION: f32 = 0.55;
/// Fraction of the sliding speed kept along the contact tangent.
pub const TANGENTIAL_FRICTION: f32 = 0.9;
/// Additional per-second speed loss while scrubbing against an obstacle.
pub const CONTACT_DRAG: f32 = 1.5;

/// Computes the post-impact vehicle-frame velocity and orientation.
///
/// `velocity` is the vehicle-frame `(forward, lateral)` pair and
/// `orientation` the current heading; `collisions` are the obstacles the
/// tentative translation hit. The result never exceeds the incoming speed
/// and is a pure function of its inputs, so the caller's retry ladder
/// terminates predictably.
#[must_use]
pub fn collide(
    position: Vec2,
    velocity: Vec2,
    orientation: f32,
    collisions: &[&Candidate],
    frame_interval: f32,
) -> (Vec2, f32) {
    let (speed, heading) = to_polar(velocity);
    let world_velocity = from_polar(speed, heading - orientation);

    let normal = contact_normal(position, collisions)
        .or_else(|| {
            let reverse_travel = -world_velocity.normalize_or_zero();
            (reverse_travel != Vec2::ZERO).then_some(reverse_travel)
        })
        .unwrap_or(Vec2::new(1.0, 0.0));

    let approach = world_velocity.dot(normal);
    let reflected = if approach < 0.0 {
        let normal_part = normal * approach;
        let tangent_part = world_velocity - normal_part;
        tangent_part * TANGENTIAL_FRICTION - normal_part * RESTITUTION
    } else {
        // Already separating; no component to reflect.
        world_velocity
    };
    let drag = (1.0 - CONTACT_DRAG * frame_interval).max(0.0);
    let out_world = reflected * drag;

    let (out_speed, out_angle) = to_polar(out_world);
    if out_speed <= f32::EPSILON {
        return (Vec2::ZERO, orientation);
    }
    // Re-aim the chassis along the outgoing direction; a reversing vehicle
    // leads with its tail instead of its nose.
    if velocity.x >= 0.0 {
        (Vec2::new(out_speed, 0.0), -out_angle)
    } else {
        (Vec2::new(-out_speed, 0.0), std::f32::consts::PI - out_angle)
    }
}

/// Averaged direction from the contact boundaries toward the vehicle, or
/// `None` when the geometry is degenerate (all contacts exactly on the
/// vehicle center).
fn contact_normal(position: Vec2, collisions: &[&Candidate]) -> Option<Vec2> {
    let mut sum = Vec2::ZERO;
    for candidate in collisions {
        let mut closest = candidate.quad.corners[0];
        let mut best = f32::INFINITY;
        for (from, to) in pairwise(&candidate.quad.corners) {
            let point = point_to_segment(position, from, to);
            let dist = position.distance(point);
            if dist < best {
                best = dist;
                closest = point;
            }
        }
        sum += (position - closest).normalize_or_zero();
    }
    let normal = sum.normalize_or_zero();
    (normal != Vec2::ZERO).then_some(normal)
}
