//! `kcm-surface` — tracked contact surfaces and their measured velocities.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`surface`] | `Surface` — one tracked contact with a collidable         |
//! | [`tracker`] | `SurfaceTracker` — per-collidable transform history and   |
//! |             | velocity measurement                                      |
//!
//! # Design notes
//!
//! The engine never asks the external physics backend for a body's velocity;
//! it *measures* it from the collidable's transform between ticks.  That
//! keeps the collision facade minimal (transforms come back with every hit
//! anyway) and works identically for animated, scripted, and simulated
//! movers.  The cost is one tick of warm-up per new contact: the first
//! observation seeds the history and reports zero velocity.

pub mod surface;
pub mod tracker;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use surface::Surface;
pub use tracker::{MeasuredVelocity, SurfaceTracker};
