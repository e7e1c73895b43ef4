//! Named target-velocity blending.

use glam::Vec3;

/// A named desired velocity the integrator converges toward.
///
/// Used to smoothly blend the agent toward scripted speeds (conveyor
/// sections, cinematic pushes) without overwriting the behavior-computed
/// velocity outright.  Convergence is exponential-style: each tick moves the
/// velocity a `convergence · dt` fraction of the remaining gap (clamped to
/// the full gap).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeMovement {
    /// Application-chosen name; unique within one `LinearKinematic`.
    pub name: String,

    /// The velocity to converge toward.
    pub target_velocity: Vec3,

    /// Convergence rate in 1/s.  `convergence * dt >= 1` snaps to the target.
    pub convergence: f32,
}

impl CompositeMovement {
    pub fn new(name: impl Into<String>, target_velocity: Vec3, convergence: f32) -> Self {
        Self {
            name: name.into(),
            target_velocity,
            convergence,
        }
    }

    /// One blend step: move `current` toward the target.
    #[inline]
    pub fn blend(&self, current: Vec3, dt: f32) -> Vec3 {
        let t = (self.convergence * dt).clamp(0.0, 1.0);
        current + (self.target_velocity - current) * t
    }
}
