//! `kcm-collision` — the collision query facade and slide resolution.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`shape`]  | `Shape` — the agent's collision volume                     |
//! | [`query`]  | `CollisionQuery` trait, `SweepHit`/`OverlapHit`/`Penetration` |
//! | [`planes`] | `PlaneWorld` — analytic half-space backend                 |
//! | [`slide`]  | `resolve_slide` — iterative two-surface slide resolution   |
//!
//! # Pluggability
//!
//! The engine never talks to a physics engine directly: all geometry queries
//! go through the [`CollisionQuery`] trait, so applications plug in whatever
//! backend they run (a full physics engine, a voxel raycaster, …).  The
//! bundled [`PlaneWorld`] is an exact analytic backend over half-spaces —
//! enough to exercise every slide/depenetration path deterministically, and
//! the fixture all slide tests run against.

pub mod planes;
pub mod query;
pub mod shape;
pub mod slide;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use planes::{PlaneWorld, PlaneWorldBuilder};
pub use query::{CollisionQuery, OverlapHit, Penetration, SweepHit};
pub use shape::Shape;
pub use slide::{resolve_slide, depenetration_offset, SlideConfig, SlideOutcome, SlideResult};
