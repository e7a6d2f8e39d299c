#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
//! # Vehicle Simulation Core
//!
//! Per-frame 2D vehicle kinematics and collision resolution for a top-down
//! racing world.
//!
//! ## Key Components
//!
//! -   **Kinematics:** the [`Vehicle`] in the [`vehicle`] module owns pose
//!     and vehicle-frame velocity and integrates throttle, braking, drift
//!     decay and steering, parameterized per terrain by [`GameSettings`].
//! -   **Terrain:** the [`TrackMap`] in the [`track`] module classifies
//!     every world position into a [`TerrainKind`]; out-of-bounds positions
//!     report the most punishing terrain instead of failing.
//! -   **Collision:** the [`collision`] module builds oriented collision
//!     quads, tests them with a separating-axis scan, and computes the
//!     post-impact response.
//! -   **Resolution:** the [`World`] in the [`world`] module steps every
//!     vehicle once per frame through a bounded rollback ladder, so no
//!     vehicle ever ends a frame inside an obstacle.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use physics::{GameSettings, TerrainKind, TrackMap, Vec2, World};
//!
//! let track = TrackMap::filled(32, 32, TerrainKind::Road);
//! let mut world = World::new(track, GameSettings::default());
//! let id = world.spawn_vehicle((4, 4), 90.0, Vec2::new(38.0, 70.0));
//! world.vehicle_mut(id).unwrap().controls.accelerate = true;
//! for _ in 0..60 {
//!     world.step(1.0 / 60.0);
//! }
//! ```

pub mod collision;
pub mod geom;
pub mod settings;
pub mod track;
pub mod types;
pub mod vehicle;
pub mod world;

pub use collision::{collide, get_collisions, Candidate, ObstacleId, Quad, COLLISION_MARGIN};
pub use settings::{GameSettings, SettingsError, TerrainProfile};
pub use track::{spawn_orientation, TerrainKind, TrackError, TrackMap, TILE_SIZE};
pub use types::{Controls, Steer, Throttle, Vec2, VehicleId};
pub use vehicle::Vehicle;
pub use world::{StepOutcome, StepReport, World, MAX_PROBES_PER_STEP};
