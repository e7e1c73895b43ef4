//! `kcm-core` — foundational types for the `rust_kcm` motion engine.
//!
//! This crate is a dependency of every other `kcm-*` crate.  It intentionally
//! has no `kcm-*` dependencies and minimal external ones (only `glam`,
//! `thiserror`, and `tracing`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`ids`]        | `CollidableId`, `BehaviorIndex`                        |
//! | [`pose`]       | `Pose` — a position + rotation transform sample        |
//! | [`properties`] | `PhysicalProperties`, `CollisionResponse`              |
//! | [`math`]       | degeneracy-safe vector helpers and NaN guards          |
//! | [`error`]      | `KcmError`, `KcmResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.         |
//!           | Required by replication-layer snapshot consumers.           |

pub mod error;
pub mod ids;
pub mod math;
pub mod pose;
pub mod properties;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{KcmError, KcmResult};
pub use ids::{BehaviorIndex, CollidableId};
pub use pose::Pose;
pub use properties::{CollisionResponse, PhysicalProperties};
