//! Vehicle pose, vehicle-frame velocity and the per-frame kinematics that
//! update them.
//!
//! Velocity is stored as `(forward, lateral)` in the vehicle's own rotated
//! frame; only [`Vehicle::apply_speed`] converts it into a world-frame
//! displacement. Position and orientation mutators keep the derived
//! collision polygon current as part of the same update, so the polygon is
//! never stale when a collision probe runs.

use crate::collision::{vehicle_quad, Quad};
use crate::geom::{from_polar, to_polar};
use crate::settings::TerrainProfile;
use crate::track::{spawn_orientation, TrackMap};
use crate::types::{Controls, Steer, Throttle, Vec2, VehicleId};

#[derive(Debug, Clone)]
pub struct Vehicle {
    id: VehicleId,
    position: Vec2,
    orientation: f32,
    velocity: Vec2,
    pub controls: Controls,
    footprint: Vec2,
    polygon: Quad,
}

impl Vehicle {
    /// Creates a vehicle at the center of a spawn cell, stationary, facing
    /// the given heading (90 degrees = world +x).
    ///
    /// `footprint` is the full width x height of the un-rotated sprite; the
    /// collision quad shrinks it by the standard margin.
    #[must_use]
    pub fn spawn(cell: (i32, i32), heading_degrees: f32, footprint: Vec2) -> Self {
        let position = TrackMap::spawn_position(cell);
        let orientation = spawn_orientation(heading_degrees);
        Self {
            id: VehicleId::from_spawn_cell(cell),
            position,
            orientation,
            velocity: Vec2::ZERO,
            controls: Controls::default(),
            footprint,
            polygon: vehicle_quad(position, orientation, footprint),
        }
    }

    #[must_use]
    pub const fn id(&self) -> VehicleId {
        self.id
    }

    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Heading in radians; 0 faces world +x.
    #[must_use]
    pub const fn orientation(&self) -> f32 {
        self.orientation
    }

    /// Vehicle-frame `(forward, lateral)` velocity.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[must_use]
    pub const fn footprint(&self) -> Vec2 {
        self.footprint
    }

    /// The current world-frame collision quad. Always in sync with
    /// position and orientation.
    #[must_use]
    pub const fn polygon(&self) -> &Quad {
        &self.polygon
    }

    /// Sprite rotation in degrees for the renderer. The art points up while
    /// orientation 0 faces +x, hence the 90 degree offset.
    #[must_use]
    pub fn display_angle(&self) -> f32 {
        (-self.orientation + std::f32::consts::FRAC_PI_2).to_degrees()
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.refresh_polygon();
    }

    pub fn set_orientation(&mut self, orientation: f32) {
        self.orientation = orientation;
        self.refresh_polygon();
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn refresh_polygon(&mut self) {
        self.polygon = vehicle_quad(self.position, self.orientation, self.footprint);
    }
}

/// Per-frame kinematics, parameterized by the terrain profile under the
/// vehicle.
impl Vehicle {
    /// Next forward speed from throttle state, engine braking and the
    /// terrain's speed caps.
    #[must_use]
    pub fn next_forward_speed(&self, profile: &TerrainProfile, frame_interval: f32) -> f32 {
        let current = self.velocity.x;
        let mut engine_braking = profile.engine_braking * frame_interval;
        if current < 0.0 {
            engine_braking = -engine_braking;
        }

        let speed = match self.controls.throttle() {
            Throttle::Coast => {
                if current == 0.0 {
                    return 0.0;
                }
                let slowed = current - engine_braking;
                // Crossing zero stalls the car instead of oscillating
                // around it.
                if (current >= 0.0 && slowed <= 0.0) || (current <= 0.0 && slowed >= 0.0) {
                    0.0
                } else {
                    slowed
                }
            }
            Throttle::Brake if current > 0.0 => {
                (current - profile.braking * frame_interval).max(0.0)
            }
            throttle => {
                // Accelerating, or braking at standstill which backs the
                // car up.
                let mut acceleration = profile.acceleration * frame_interval;
                if throttle == Throttle::Brake {
                    acceleration = -acceleration;
                }
                current + acceleration
            }
        };

        // At the cap, engine braking still applies, so excess speed from a
        // terrain change bleeds off gradually instead of snapping.
        if speed > profile.max_forward_speed {
            (current - engine_braking).max(profile.max_forward_speed)
        } else if speed < -profile.max_reverse_speed {
            (current - engine_braking).min(-profile.max_reverse_speed)
        } else {
            speed
        }
    }

    /// Next lateral (drift) speed: linear decay toward zero, never crossing
    /// it.
    #[must_use]
    pub fn next_lateral_speed(&self, profile: &TerrainProfile, frame_interval: f32) -> f32 {
        let current = self.velocity.y;
        if current == 0.0 {
            return 0.0;
        }
        let step = profile.lateral_speed_slowdown * frame_interval;
        if current > 0.0 {
            (current - step).max(0.0)
        } else {
            (current + step).min(0.0)
        }
    }

    /// Commits both speed components for this frame.
    pub fn integrate_speed(&mut self, profile: &TerrainProfile, frame_interval: f32) {
        self.velocity = Vec2::new(
            self.next_forward_speed(profile, frame_interval),
            self.next_lateral_speed(profile, frame_interval),
        );
    }

    /// Signed heading change for this frame's steering input.
    ///
    /// Authority grows linearly with forward speed and saturates at
    /// `ref_speed`, so a parked car cannot pivot in place. The sign flips in
    /// reverse to keep left/right intuitive for the driver.
    #[must_use]
    pub fn steering(&self, profile: &TerrainProfile, ref_speed: f32, frame_interval: f32) -> f32 {
        let direction = match self.controls.steer() {
            Steer::Straight => return 0.0,
            Steer::Left => -1.0,
            Steer::Right => 1.0,
        };
        let mut angle_change = direction * profile.steering_rate * frame_interval;
        if self.velocity.x < 0.0 {
            angle_change = -angle_change;
        }
        angle_change * (self.velocity.x.abs() / ref_speed).min(1.0)
    }

    /// Yaws the chassis by `angle_change` while keeping momentum fixed in
    /// the world frame: the velocity's vehicle-frame angle is rotated by the
    /// same amount, which is what makes the car drift through corners
    /// instead of railing around them.
    pub fn turn(&mut self, angle_change: f32) {
        self.set_orientation(self.orientation - angle_change);
        let (speed, heading) = to_polar(self.velocity);
        self.velocity = from_polar(speed, heading - angle_change);
    }

    /// Integrates the current velocity over `frame_interval` from `position`
    /// and returns the destination. Uses the orientation at call time, so
    /// turn-before-translate ordering is the caller's job.
    #[must_use]
    pub fn apply_speed(&self, frame_interval: f32, position: Vec2) -> Vec2 {
        let (speed, heading) = to_polar(self.velocity);
        let displacement = from_polar(speed, heading - self.orientation) * frame_interval;
        position + displacement
    }
}
