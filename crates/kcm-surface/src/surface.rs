//! One tracked contact with a collidable.

use glam::Vec3;

use kcm_core::{CollidableId, PhysicalProperties, Pose};

/// A tracked contact between the agent and one collidable.
///
/// Created when a collidable is first swept/overlapped, updated every tick
/// while tracked, and discarded (or flagged `tracked = false`) once the
/// collidable disappears or its tracking history goes stale.
///
/// Velocities are *measured* by the [`SurfaceTracker`][crate::SurfaceTracker]
/// from the collidable's transform delta between ticks — they are never read
/// from the physics backend directly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Surface {
    /// Handle to the touched collidable.
    pub collidable: CollidableId,

    /// Named attachment point (socket/bone) on the collidable, if any.
    /// A change of socket resets velocity tracking (treated as a new contact).
    pub socket: Option<String>,

    /// World pose of the tracked attachment point this tick.
    pub socket_pose: Pose,

    /// Measured linear velocity of the attachment point (m/s).
    pub linear_velocity: Vec3,

    /// Measured angular velocity as an axis-angle rate (deg/s).
    pub angular_velocity: Vec3,

    /// Contact point on the collidable, world space.
    pub contact_point: Vec3,

    /// Contact normal at the resting contact.
    pub contact_normal: Vec3,

    /// Normal of the original impact (may differ from `contact_normal` on
    /// edges and corners).
    pub impact_normal: Vec3,

    /// Packed physical properties reported by the collision backend.
    pub properties: PhysicalProperties,

    /// `false` once tracking parameters went stale; consumers skip the
    /// surface and the pipeline discards it at the next pre-move pass.
    pub tracked: bool,
}

impl Surface {
    /// A fresh, not-yet-measured contact (zero velocities).
    pub fn new(collidable: CollidableId, point: Vec3, normal: Vec3) -> Self {
        Self {
            collidable,
            socket:           None,
            socket_pose:      Pose::IDENTITY,
            linear_velocity:  Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            contact_point:    point,
            contact_normal:   normal,
            impact_normal:    normal,
            properties:       PhysicalProperties::default(),
            tracked:          true,
        }
    }

    /// Velocity of the surface at an arbitrary world-space `point`.
    ///
    /// Composes the measured linear velocity with the rotation-induced
    /// tangential term `ω × r`, where `r` runs from the tracked attachment
    /// point to `point`.  Required for correctly transferring momentum
    /// to/from rotating platforms.
    pub fn velocity_at(&self, point: Vec3) -> Vec3 {
        let omega = self.angular_velocity * std::f32::consts::PI / 180.0;
        let r = point - self.socket_pose.position;
        self.linear_velocity + omega.cross(r)
    }

    /// Rotation-induced (centripetal) acceleration at `point`: `ω × (ω × r)`.
    ///
    /// Consumed by the referential-acceleration path for agents riding
    /// rotating platforms; zero for purely translating surfaces.
    pub fn acceleration_at(&self, point: Vec3) -> Vec3 {
        let omega = self.angular_velocity * std::f32::consts::PI / 180.0;
        let r = point - self.socket_pose.position;
        omega.cross(omega.cross(r))
    }

    /// `true` if the agent may stand on this surface.
    #[inline]
    pub fn is_steppable(&self) -> bool {
        self.tracked && self.properties.can_step_on
    }
}
