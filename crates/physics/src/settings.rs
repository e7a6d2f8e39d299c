//! Read-only physics tuning table, keyed by terrain.
//!
//! The table is loaded once at startup (JSON) and validated up front; the
//! simulation never sees a missing or unusable coefficient at frame time.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::track::TerrainKind;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("settings value {name} = {value} is out of range")]
    Invalid { name: String, value: f32 },
}

/// Per-terrain physics coefficients. Linear values are px/s or px/s^2,
/// `steering_rate` is rad/s at full steering authority.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainProfile {
    pub acceleration: f32,
    pub braking: f32,
    pub engine_braking: f32,
    pub max_forward_speed: f32,
    pub max_reverse_speed: f32,
    pub lateral_speed_slowdown: f32,
    pub steering_rate: f32,
}

/// The full tuning table. One profile per terrain plus the speed at which
/// steering authority saturates.
///
/// Every field is mandatory; a settings file missing a terrain or a
/// coefficient fails at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub road: TerrainProfile,
    pub wet: TerrainProfile,
    pub dirt: TerrainProfile,
    pub grass: TerrainProfile,
    pub sand: TerrainProfile,
    pub steering_ref_speed: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            road: TerrainProfile {
                acceleration: 320.0,
                braking: 640.0,
                engine_braking: 140.0,
                max_forward_speed: 480.0,
                max_reverse_speed: 160.0,
                lateral_speed_slowdown: 480.0,
                steering_rate: 3.0,
            },
            wet: TerrainProfile {
                acceleration: 260.0,
                braking: 480.0,
                engine_braking: 120.0,
                max_forward_speed: 460.0,
                max_reverse_speed: 150.0,
                lateral_speed_slowdown: 320.0,
                steering_rate: 2.4,
            },
            dirt: TerrainProfile {
                acceleration: 210.0,
                braking: 430.0,
                engine_braking: 110.0,
                max_forward_speed: 380.0,
                max_reverse_speed: 130.0,
                lateral_speed_slowdown: 280.0,
                steering_rate: 2.1,
            },
            grass: TerrainProfile {
                acceleration: 170.0,
                braking: 390.0,
                engine_braking: 130.0,
                max_forward_speed: 300.0,
                max_reverse_speed: 110.0,
                lateral_speed_slowdown: 260.0,
                steering_rate: 1.9,
            },
            sand: TerrainProfile {
                acceleration: 120.0,
                braking: 330.0,
                engine_braking: 160.0,
                max_forward_speed: 220.0,
                max_reverse_speed: 90.0,
                lateral_speed_slowdown: 240.0,
                steering_rate: 1.6,
            },
            steering_ref_speed: 110.0,
        }
    }
}

impl GameSettings {
    /// Loads and validates a settings file.
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parses and validates a JSON settings document.
    pub fn from_json(data: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(data)?;
        settings.validate()?;
        Ok(settings)
    }

    /// The profile for a terrain. Total over [`TerrainKind`].
    #[must_use]
    pub fn terrain(&self, kind: TerrainKind) -> &TerrainProfile {
        match kind {
            TerrainKind::Road => &self.road,
            TerrainKind::Wet => &self.wet,
            TerrainKind::Dirt => &self.dirt,
            TerrainKind::Grass => &self.grass,
            TerrainKind::Sand => &self.sand,
        }
    }

    /// Rejects coefficients the kinematics cannot run on: non-finite values,
    /// non-positive top speeds or acceleration, negative decay rates.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for kind in TerrainKind::ALL {
            let profile = self.terrain(kind);
            let positive = [
                ("acceleration", profile.acceleration),
                ("braking", profile.braking),
                ("max_forward_speed", profile.max_forward_speed),
                ("max_reverse_speed", profile.max_reverse_speed),
            ];
            for (field, value) in positive {
                if !value.is_finite() || value <= 0.0 {
                    return Err(invalid(kind, field, value));
                }
            }
            let non_negative = [
                ("engine_braking", profile.engine_braking),
                ("lateral_speed_slowdown", profile.lateral_speed_slowdown),
                ("steering_rate", profile.steering_rate),
            ];
            for (field, value) in non_negative {
                if !value.is_finite() || value < 0.0 {
                    return Err(invalid(kind, field, value));
                }
            }
        }
        if !self.steering_ref_speed.is_finite() || self.steering_ref_speed <= 0.0 {
            return Err(SettingsError::Invalid {
                name: "steering_ref_speed".to_owned(),
                value: self.steering_ref_speed,
            });
        }
        Ok(())
    }
}

fn invalid(kind: TerrainKind, field: &str, value: f32) -> SettingsError {
    SettingsError::Invalid {
        name: format!("{}.{field}", kind.name()),
        value,
    }
}
