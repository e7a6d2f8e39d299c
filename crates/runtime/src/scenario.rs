//! # Demo Circuit
//!
//! A closed ring road around a grass infield, fenced in by border walls, with
//! a pack of waypoint-chasing cars. The binary steps this world and logs its
//! progress; the tests drive the same world headless.

use physics::{
    Controls, GameSettings, Quad, StepReport, TrackError, TrackMap, Vec2, VehicleId, World,
};

/// Footprint shared by every demo car, in world units.
pub const CAR_FOOTPRINT: Vec2 = Vec2::new(38.0, 70.0);

/// Corner waypoints of the ring road, visited clockwise.
const WAYPOINTS: [Vec2; 4] = [
    Vec2::new(256.0, 256.0),
    Vec2::new(1792.0, 256.0),
    Vec2::new(1792.0, 1280.0),
    Vec2::new(256.0, 1280.0),
];

/// A waypoint counts as reached inside this radius.
const WAYPOINT_RADIUS: f32 = 160.0;

/// Heading error below which the autopilot holds the wheel straight.
const STEER_DEADBAND: f32 = 0.05;

struct Driver {
    vehicle: VehicleId,
    next_waypoint: usize,
    captures: u32,
}

/// The demo world plus the autopilot state for each car.
pub struct Scenario {
    pub world: World,
    drivers: Vec<Driver>,
}

impl Scenario {
    /// Builds the circuit: a 16x12 tile ring road with sand run-off, border
    /// walls, optionally a barrier angled across the bottom straight, and
    /// four cars lined up on the top straight facing clockwise.
    pub fn build(settings: GameSettings, barrier: bool) -> Result<Self, TrackError> {
        let track = TrackMap::from_rows(&[
            "ssssssssssssssss",
            "srrrrrrrrrrrrrrs",
            "srrrrrrrrrrrrrrs",
            "srrggggggggggrrs",
            "srrggggggggggrrs",
            "srrggggggggggrrs",
            "srrggggggggggrrs",
            "srrggggggggggrrs",
            "srrggggggggggrrs",
            "srrrrrrrrrrrrrrs",
            "srrrrrrrrrrrrrrs",
            "ssssssssssssssss",
        ])?;
        let mut world = World::new(track, settings);

        world.add_wall(Vec2::new(0.0, 0.0), Vec2::new(2048.0, 16.0));
        world.add_wall(Vec2::new(0.0, 1520.0), Vec2::new(2048.0, 1536.0));
        world.add_wall(Vec2::new(0.0, 0.0), Vec2::new(16.0, 1536.0));
        world.add_wall(Vec2::new(2032.0, 0.0), Vec2::new(2048.0, 1536.0));
        if barrier {
            // Chicane barrier angled across the bottom straight.
            world.add_wall_quad(Quad::from_center(
                Vec2::new(1020.0, 1212.0),
                Vec2::new(18.0, 60.0),
                0.35,
            ));
        }

        // Heading 90 degrees puts the nose along world +x, toward waypoint 1.
        let drivers = [(2, 1), (2, 2), (4, 1), (4, 2)]
            .into_iter()
            .map(|cell| Driver {
                vehicle: world.spawn_vehicle(cell, 90.0, CAR_FOOTPRINT),
                next_waypoint: 1,
                captures: 0,
            })
            .collect();

        Ok(Self { world, drivers })
    }

    /// Runs one frame: autopilot input, then the physics step, then waypoint
    /// bookkeeping against the committed positions.
    pub fn advance(&mut self, frame_interval: f32) -> Vec<StepReport> {
        for driver in &mut self.drivers {
            let target = WAYPOINTS[driver.next_waypoint];
            if let Some(vehicle) = self.world.vehicle_mut(driver.vehicle) {
                vehicle.controls =
                    controls_toward(vehicle.position(), vehicle.orientation(), target);
            }
        }

        let reports = self.world.step(frame_interval);

        for driver in &mut self.drivers {
            let Some(vehicle) = self.world.vehicle(driver.vehicle) else {
                continue;
            };
            if vehicle.position().distance(WAYPOINTS[driver.next_waypoint]) < WAYPOINT_RADIUS {
                driver.next_waypoint = (driver.next_waypoint + 1) % WAYPOINTS.len();
                driver.captures += 1;
            }
        }

        reports
    }

    /// Total waypoints reached across all cars.
    #[must_use]
    pub fn waypoint_captures(&self) -> u32 {
        self.drivers.iter().map(|driver| driver.captures).sum()
    }
}

/// Full-throttle input steering the nose toward `target`.
///
/// The world travel angle of a forward-moving car is the negated orientation,
/// so the heading error is `desired + orientation`; steering right grows the
/// travel angle.
fn controls_toward(position: Vec2, orientation: f32, target: Vec2) -> Controls {
    let to_target = target - position;
    let desired = to_target.y.atan2(to_target.x);
    let error = wrap_angle(desired + orientation);

    let mut controls = Controls {
        accelerate: true,
        ..Controls::default()
    };
    if error > STEER_DEADBAND {
        controls.steer_right = true;
    } else if error < -STEER_DEADBAND {
        controls.steer_left = true;
    }
    controls
}

/// Maps an angle into `(-pi, pi]`.
fn wrap_angle(angle: f32) -> f32 {
    let mut wrapped = angle % std::f32::consts::TAU;
    if wrapped > std::f32::consts::PI {
        wrapped -= std::f32::consts::TAU;
    } else if wrapped <= -std::f32::consts::PI {
        wrapped += std::f32::consts::TAU;
    }
    wrapped
}
