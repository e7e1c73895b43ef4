//! A position + rotation transform sample.
//!
//! `Pose` is the unit of transform data exchanged with the external collision
//! backend (the pose of a hit collidable), stored by the surface tracker as
//! per-tick history, and carried by traversal events.

use glam::{Quat, Vec3};

/// A rigid transform: position plus unit rotation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[inline]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// A pose with the given position and no rotation.
    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self { position, rotation: Quat::IDENTITY }
    }

    /// Map a point from this pose's local space into world space.
    #[inline]
    pub fn transform_point(self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// `true` when every component is finite (no NaN/inf crept in).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.position.is_finite() && self.rotation.is_finite()
    }
}

impl Default for Pose {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}, {:.3})",
            self.position.x, self.position.y, self.position.z
        )
    }
}
