//! The world: track, tuning table, obstacle registry and the per-frame
//! collision resolver.
//!
//! Vehicles are stepped sequentially in spawn order, each against the most
//! recently committed positions of the others (read-committed). A resolver
//! probes the collision set a bounded number of times per vehicle, so frame
//! cost stays flat as the obstacle count grows.

use tracing::{debug, trace};

use crate::collision::{collide, get_collisions, Candidate, ObstacleId, Quad};
use crate::settings::{GameSettings, TerrainProfile};
use crate::track::TrackMap;
use crate::types::{Vec2, VehicleId};
use crate::vehicle::Vehicle;

/// How one vehicle's frame resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Translation committed with no contact.
    Clear,
    /// Impact response applied; the corrected heading and velocity stuck.
    Bounced,
    /// Impact response applied, but only after rolling the heading back to
    /// its pre-impact value.
    BouncedHeldHeading,
    /// Every retry still collided; the vehicle kept its start-of-frame pose
    /// for this frame.
    Frozen,
}

/// Per-vehicle, per-frame resolution record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub vehicle: VehicleId,
    pub outcome: StepOutcome,
    /// Collision probes spent on this vehicle this frame. Bounded by
    /// [`MAX_PROBES_PER_STEP`].
    pub probes: u8,
    pub steering_vetoed: bool,
}

/// Upper bound on collision probes per vehicle per frame: one for steering
/// plus up to three for translation.
pub const MAX_PROBES_PER_STEP: u8 = 4;

struct Wall {
    id: u32,
    quad: Quad,
}

pub struct World {
    track: TrackMap,
    settings: GameSettings,
    walls: Vec<Wall>,
    vehicles: Vec<Vehicle>,
    next_wall_id: u32,
}

impl World {
    #[must_use]
    pub fn new(track: TrackMap, settings: GameSettings) -> Self {
        Self {
            track,
            settings,
            walls: Vec::new(),
            vehicles: Vec::new(),
            next_wall_id: 0,
        }
    }

    #[must_use]
    pub const fn track(&self) -> &TrackMap {
        &self.track
    }

    #[must_use]
    pub const fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Registers an axis-aligned static wall.
    pub fn add_wall(&mut self, min: Vec2, max: Vec2) -> ObstacleId {
        self.add_wall_quad(Quad::from_rect(min, max))
    }

    /// Registers a static wall with an arbitrary quad, for angled barriers.
    pub fn add_wall_quad(&mut self, quad: Quad) -> ObstacleId {
        let id = self.next_wall_id;
        self.next_wall_id += 1;
        self.walls.push(Wall { id, quad });
        ObstacleId::Wall(id)
    }

    /// Spawns a vehicle at a grid cell and registers it in the collision
    /// set. The caller keeps spawn cells clear of obstacles; stepping
    /// assumes every vehicle starts its frame in a valid pose.
    pub fn spawn_vehicle(
        &mut self,
        cell: (i32, i32),
        heading_degrees: f32,
        footprint: Vec2,
    ) -> VehicleId {
        let vehicle = Vehicle::spawn(cell, heading_degrees, footprint);
        let id = vehicle.id();
        self.vehicles.push(vehicle);
        id
    }

    /// Unregisters a vehicle. Returns false if it was not present.
    pub fn remove_vehicle(&mut self, id: VehicleId) -> bool {
        let before = self.vehicles.len();
        self.vehicles.retain(|vehicle| vehicle.id() != id);
        self.vehicles.len() != before
    }

    #[must_use]
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id() == id)
    }

    pub fn vehicle_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|vehicle| vehicle.id() == id)
    }

    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Obstacles currently overlapping a vehicle's polygon. Empty after
    /// [`World::step`] for every vehicle that started the frame clear.
    #[must_use]
    pub fn collisions_of(&self, id: VehicleId) -> Vec<ObstacleId> {
        let Some(vehicle) = self.vehicle(id) else {
            return Vec::new();
        };
        let candidates = self.candidates_excluding(id);
        get_collisions(
            vehicle.polygon(),
            ObstacleId::Vehicle(id),
            &candidates,
            None,
        )
        .into_iter()
        .map(|candidate| candidate.id)
        .collect()
    }

    /// Advances every vehicle by `frame_interval` seconds, in spawn order.
    ///
    /// Each vehicle is resolved against the walls plus the other vehicles'
    /// committed polygons, so a vehicle stepped later in the frame already
    /// sees where earlier ones ended up.
    pub fn step(&mut self, frame_interval: f32) -> Vec<StepReport> {
        let mut reports = Vec::with_capacity(self.vehicles.len());
        for index in 0..self.vehicles.len() {
            let subject_id = self.vehicles[index].id();
            let candidates = self.candidates_excluding(subject_id);
            let terrain = self.track.terrain_at(self.vehicles[index].position());
            let profile = *self.settings.terrain(terrain);
            let ref_speed = self.settings.steering_ref_speed;
            let report = resolve_move(
                &mut self.vehicles[index],
                &candidates,
                &profile,
                ref_speed,
                frame_interval,
            );
            reports.push(report);
        }
        reports
    }

    /// Snapshot of every registered obstacle except one vehicle: walls
    /// first, then vehicles in spawn order.
    fn candidates_excluding(&self, skip: VehicleId) -> Vec<Candidate> {
        let mut candidates = Vec::with_capacity(self.walls.len() + self.vehicles.len());
        for wall in &self.walls {
            candidates.push(Candidate::new(ObstacleId::Wall(wall.id), wall.quad));
        }
        for vehicle in &self.vehicles {
            if vehicle.id() != skip {
                candidates.push(Candidate::new(
                    ObstacleId::Vehicle(vehicle.id()),
                    *vehicle.polygon(),
                ));
            }
        }
        candidates
    }
}

/// One vehicle's frame: integrate speed, steer, translate, and walk the
/// rollback ladder until the pose is contact-free.
///
/// Stages, each with its own snapshot/restore pair:
/// 1. tentative turn, vetoed outright if it would rotate into an obstacle;
/// 2. tentative translation, committed when the probe comes back clean;
/// 3. impact response and retry with the corrected velocity and heading;
/// 4. retry again with the heading rolled back to its pre-impact value;
/// 5. freeze in the start-of-frame pose, keeping only the corrected
///    velocity for the next frame.
fn resolve_move(
    vehicle: &mut Vehicle,
    candidates: &[Candidate],
    profile: &TerrainProfile,
    ref_speed: f32,
    frame_interval: f32,
) -> StepReport {
    let subject = ObstacleId::Vehicle(vehicle.id());
    let mut probes = 0;

    vehicle.integrate_speed(profile, frame_interval);

    let steering = vehicle.steering(profile, ref_speed, frame_interval);
    let pre_turn_orientation = vehicle.orientation();
    let pre_turn_velocity = vehicle.velocity();
    vehicle.turn(steering);
    probes += 1;
    let mut steering_vetoed = false;
    if !get_collisions(vehicle.polygon(), subject, candidates, Some(1)).is_empty() {
        vehicle.set_velocity(pre_turn_velocity);
        vehicle.set_orientation(pre_turn_orientation);
        steering_vetoed = true;
        trace!(vehicle = ?vehicle.id(), steering, "steering vetoed by contact");
    }

    let start_position = vehicle.position();
    let moved = vehicle.apply_speed(frame_interval, start_position);
    vehicle.set_position(moved);
    probes += 1;
    let hits = get_collisions(vehicle.polygon(), subject, candidates, None);
    if hits.is_empty() {
        return StepReport {
            vehicle: vehicle.id(),
            outcome: StepOutcome::Clear,
            probes,
            steering_vetoed,
        };
    }

    // First retry: restore the position, take the impact response, and
    // translate again with the corrected velocity and heading.
    vehicle.set_position(start_position);
    let held_orientation = vehicle.orientation();
    let (corrected_velocity, corrected_orientation) = collide(
        vehicle.position(),
        vehicle.velocity(),
        vehicle.orientation(),
        &hits,
        frame_interval,
    );
    vehicle.set_velocity(corrected_velocity);
    vehicle.set_orientation(corrected_orientation);
    let moved = vehicle.apply_speed(frame_interval, start_position);
    vehicle.set_position(moved);
    probes += 1;
    if get_collisions(vehicle.polygon(), subject, candidates, Some(1)).is_empty() {
        return StepReport {
            vehicle: vehicle.id(),
            outcome: StepOutcome::Bounced,
            probes,
            steering_vetoed,
        };
    }

    // Second retry: same corrected velocity, pre-impact heading.
    vehicle.set_orientation(held_orientation);
    let moved = vehicle.apply_speed(frame_interval, start_position);
    vehicle.set_position(moved);
    probes += 1;
    if get_collisions(vehicle.polygon(), subject, candidates, Some(1)).is_empty() {
        return StepReport {
            vehicle: vehicle.id(),
            outcome: StepOutcome::BouncedHeldHeading,
            probes,
            steering_vetoed,
        };
    }

    // Give up for this frame. The start-of-frame pose is known valid; the
    // corrected velocity is kept so next frame starts pointed away.
    vehicle.set_orientation(held_orientation);
    vehicle.set_position(start_position);
    debug!(
        vehicle = ?vehicle.id(),
        position = ?start_position,
        "movement fully rolled back this frame"
    );
    StepReport {
        vehicle: vehicle.id(),
        outcome: StepOutcome::Frozen,
        probes,
        steering_vetoed,
    }
}
