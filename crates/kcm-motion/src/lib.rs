//! `kcm-motion` — analytic integration and referential-frame handling.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`integrator`]  | drag, referential aggregation, snap, closed-form linear/angular integration |
//! | [`root_motion`] | animation root-motion deltas and blend strategies     |

pub mod integrator;
pub mod root_motion;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use integrator::{
    apply_snap, drag_acceleration, integrate_angular, integrate_linear, referential_from_force,
    referential_from_surfaces, velocity_to_reach,
};
pub use root_motion::{apply_root_motion, blend_fn, BlendFn, RootMotionDelta, RootMotionMode};
