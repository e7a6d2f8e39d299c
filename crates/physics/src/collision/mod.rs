//! # Collision Detection and Response
//!
//! Oriented-quad overlap tests between a moving vehicle and the world's
//! registered obstacles, plus the response function that derives a corrected
//! velocity and heading after an impact.

mod detector;
mod response;
mod sat;
mod shape;

pub use detector::*;
pub use response::*;
pub use sat::*;
pub use shape::*;

use crate::types::VehicleId;

/// Identity of an obstacle registered in the world's collision set.
///
/// Used for self-exclusion (a vehicle never collides with itself) and for
/// reporting which obstacle was hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObstacleId {
    Wall(u32),
    Vehicle(VehicleId),
}

/// One obstacle shape offered to the detector.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub id: ObstacleId,
    pub quad: Quad,
}

impl Candidate {
    #[must_use]
    pub const fn new(id: ObstacleId, quad: Quad) -> Self {
        Self { id, quad }
    }
}
