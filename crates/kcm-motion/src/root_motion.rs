//! Root-motion blending strategies.
//!
//! The animation source hands the engine an opaque per-tick transform delta;
//! behaviors choose how (and whether) it contributes to velocity.  Dispatch
//! is a strategy table mapping mode to a pure blend function, so adding a
//! mode never grows a conditional ladder.

use glam::{Quat, Vec3};

use kcm_core::math::lerp_clamped;

/// Transform delta read from the external animation source this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootMotionDelta {
    pub translation: Vec3,
    pub rotation:    Quat,
}

impl Default for RootMotionDelta {
    fn default() -> Self {
        Self { translation: Vec3::ZERO, rotation: Quat::IDENTITY }
    }
}

impl RootMotionDelta {
    /// The delta's translation expressed as a velocity over `dt`.
    pub fn velocity(&self, dt: f32) -> Vec3 {
        if dt > f32::EPSILON {
            self.translation / dt
        } else {
            Vec3::ZERO
        }
    }
}

/// How a behavior folds root motion into the computed velocity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RootMotionMode {
    /// Animation velocity is added on top of the simulated velocity.
    Additive,

    /// Animation velocity replaces the simulated velocity (weighted).
    Override,
}

/// A pure blend: `(base_velocity, root_motion_velocity, weight) -> velocity`.
pub type BlendFn = fn(Vec3, Vec3, f32) -> Vec3;

fn blend_additive(base: Vec3, motion: Vec3, weight: f32) -> Vec3 {
    base + motion * weight.clamp(0.0, 1.0)
}

fn blend_override(base: Vec3, motion: Vec3, weight: f32) -> Vec3 {
    lerp_clamped(base, motion, weight)
}

/// The strategy table.
pub fn blend_fn(mode: RootMotionMode) -> BlendFn {
    match mode {
        RootMotionMode::Additive => blend_additive,
        RootMotionMode::Override => blend_override,
    }
}

/// Fold a root-motion delta into `base` velocity under `mode`.
pub fn apply_root_motion(
    mode: RootMotionMode,
    base: Vec3,
    delta: &RootMotionDelta,
    weight: f32,
    dt: f32,
) -> Vec3 {
    blend_fn(mode)(base, delta.velocity(dt), weight)
}
