//! Angular kinematic condition.

use glam::{Quat, Vec3};

use kcm_core::math::{project_on_plane, sanitize_quat};

/// The angular half of the agent's kinematic condition.
///
/// Rotation speed and angular acceleration are axis-angle vectors in
/// **degrees per second** (per second squared), matching the units the
/// surface tracker measures.  `orientation` is kept a valid unit rotation
/// after every integration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngularKinematic {
    /// Unit orientation rotor.
    pub orientation: Quat,

    /// Rotation speed, axis-angle, deg/s.
    pub rotation_speed: Vec3,

    /// Angular acceleration, axis-angle, deg/s².
    pub angular_acceleration: Vec3,
}

impl Default for AngularKinematic {
    fn default() -> Self {
        Self {
            orientation:          Quat::IDENTITY,
            rotation_speed:       Vec3::ZERO,
            angular_acceleration: Vec3::ZERO,
        }
    }
}

impl AngularKinematic {
    /// Re-normalize the orientation, recovering identity from degeneracy.
    pub fn renormalize(&mut self) {
        self.orientation = sanitize_quat(self.orientation, "orientation");
    }

    /// Remove the `up`-axis component of rotation speed and acceleration.
    ///
    /// Applied while gravity alignment is enforced; the alignment pass owns
    /// the twist about `up`, so the free rates must not carry one.
    pub fn project_out_up(&mut self, up: Vec3) {
        self.rotation_speed       = project_on_plane(self.rotation_speed, up);
        self.angular_acceleration = project_on_plane(self.angular_acceleration, up);
    }

    /// The local up axis of the current orientation.
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// The local forward axis of the current orientation.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }
}
