//! Linear kinematic condition.

use glam::Vec3;

use crate::CompositeMovement;

/// The linear half of the agent's kinematic condition.
///
/// # Referential pair
///
/// `referential_velocity` / `referential_acceleration` represent the motion
/// of the platform or medium the agent is riding.  They are **computed**
/// every tick from the active contact surfaces (or external forces when
/// airborne) and must never accumulate across ticks by themselves — the
/// pipeline overwrites both before every integration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearKinematic {
    pub position:     Vec3,
    pub velocity:     Vec3,
    pub acceleration: Vec3,

    /// Velocity contributed by the surface/medium the agent is riding.
    /// Recomputed every tick; never hand-set.
    pub referential_velocity: Vec3,

    /// Acceleration contributed by the surface/medium (e.g. a platform
    /// speeding up, or centripetal acceleration on a turntable).
    pub referential_acceleration: Vec3,

    /// Named target velocities the integrator blends toward.
    pub composites: Vec<CompositeMovement>,

    /// One-shot positional correction consumed on the next integration step
    /// (e.g. ground snapping).  Applied to position, not velocity.
    pub snap_displacement: Vec3,
}

impl LinearKinematic {
    pub fn at(position: Vec3) -> Self {
        Self { position, ..Default::default() }
    }

    // ── Composite movement targets ────────────────────────────────────────

    /// Insert or replace the composite target named `name`.
    pub fn set_composite(&mut self, name: impl Into<String>, target: Vec3, convergence: f32) {
        let name = name.into();
        match self.composites.iter_mut().find(|c| c.name == name) {
            Some(c) => {
                c.target_velocity = target;
                c.convergence = convergence;
            }
            None => self.composites.push(CompositeMovement::new(name, target, convergence)),
        }
    }

    /// Remove the composite target named `name`; `true` if one existed.
    pub fn remove_composite(&mut self, name: &str) -> bool {
        let before = self.composites.len();
        self.composites.retain(|c| c.name != name);
        self.composites.len() != before
    }

    pub fn composite(&self, name: &str) -> Option<&CompositeMovement> {
        self.composites.iter().find(|c| c.name == name)
    }

    // ── Snap displacement ─────────────────────────────────────────────────

    /// Queue a one-shot positional correction for the next integration.
    /// Repeated calls within one tick accumulate.
    pub fn add_snap(&mut self, displacement: Vec3) {
        self.snap_displacement += displacement;
    }

    /// Consume the pending snap displacement, leaving zero behind.
    #[inline]
    pub fn take_snap(&mut self) -> Vec3 {
        std::mem::take(&mut self.snap_displacement)
    }

    /// Speed relative to the referential frame.
    pub fn relative_speed(&self) -> f32 {
        (self.velocity - self.referential_velocity).length()
    }
}
