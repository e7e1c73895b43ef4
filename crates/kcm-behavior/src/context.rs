//! The per-tick agent context injected into every behavior call.

use glam::Vec3;

use kcm_motion::RootMotionDelta;

/// Ambient quantities for one tick, built once by the pipeline and handed
/// to every check/process call by shared reference.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionContext {
    /// Tick length, seconds.
    pub dt: f32,

    /// Agent mass, kg.
    pub mass: f32,

    /// Gravity acceleration vector.
    pub gravity: Vec3,

    /// Net external force; `mass * gravity` unless overridden.
    pub external_force: Vec3,

    /// Root-motion delta read from the animation source this tick, if any.
    pub root_motion: Option<RootMotionDelta>,
}

impl MotionContext {
    pub fn new(dt: f32, mass: f32, gravity: Vec3) -> Self {
        Self {
            dt,
            mass,
            gravity,
            external_force: gravity * mass,
            root_motion: None,
        }
    }

    /// Replace the default `mass * gravity` external force.
    pub fn with_external_force(mut self, force: Vec3) -> Self {
        self.external_force = force;
        self
    }

    pub fn with_root_motion(mut self, delta: RootMotionDelta) -> Self {
        self.root_motion = Some(delta);
        self
    }
}
