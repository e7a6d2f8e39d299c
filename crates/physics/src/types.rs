//! Core value types shared across the simulation: the 2D vector, the decoded
//! control state, and the stable vehicle identity key.

use std::hash::{Hash, Hasher};

/// 2D world/vehicle-frame vector.
///
/// `#[repr(C)]` + `Pod` so slices of simulation state can be handed to a
/// renderer as raw bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction, or zero for (near-)zero input.
    #[must_use]
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len > 1e-6 {
            Self::new(self.x / len, self.y / len)
        } else {
            Self::ZERO
        }
    }

    /// Counter-clockwise perpendicular, used for edge normals.
    #[must_use]
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Decoded per-frame driver input. The four flags are independent; the
/// conflicting combinations are normalized by [`Controls::throttle`] and
/// [`Controls::steer`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

/// Net longitudinal input after normalization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Throttle {
    Coast,
    Accelerate,
    Brake,
}

/// Net steering input after normalization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Steer {
    Straight,
    Left,
    Right,
}

impl Controls {
    /// Accelerate and brake pressed together cancel out to coasting, so
    /// engine braking applies.
    #[must_use]
    pub fn throttle(self) -> Throttle {
        match (self.accelerate, self.brake) {
            (true, false) => Throttle::Accelerate,
            (false, true) => Throttle::Brake,
            _ => Throttle::Coast,
        }
    }

    /// Both steering directions pressed together cancel out to straight.
    #[must_use]
    pub fn steer(self) -> Steer {
        match (self.steer_left, self.steer_right) {
            (true, false) => Steer::Left,
            (false, true) => Steer::Right,
            _ => Steer::Straight,
        }
    }
}

/// Stable vehicle identity derived from the spawn grid cell.
///
/// Spawn cells are unique by track design, so the key is unique per session;
/// it is used only for ordering and self-exclusion in collision bookkeeping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VehicleId(u64);

impl VehicleId {
    #[must_use]
    pub fn from_spawn_cell(cell: (i32, i32)) -> Self {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        cell.hash(&mut hasher);
        Self(hasher.finish())
    }
}
