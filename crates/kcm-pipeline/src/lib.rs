//! `kcm-pipeline` — the per-tick controller pipeline.
//!
//! Ties the behavior registry, the kinematic status, the motion integrator,
//! and the collision backend together into the per-agent tick:
//!
//! probe → state check → action check → process → integrate → slide →
//! commit.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`select`]   | state/action selection over the priority-sorted registry |
//! | [`pipeline`] | `ControllerPipeline`, `PipelineConfig`, `TickInput`      |
//! | [`observer`] | `PipelineObserver` lifecycle notifications               |
//! | [`builder`]  | validated construction                                   |
//! | [`error`]    | `PipelineError`                                          |

pub mod builder;
pub mod error;
pub mod observer;
pub mod pipeline;
pub mod select;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::PipelineBuilder;
pub use error::{PipelineError, PipelineResult};
pub use observer::{NoopObserver, PipelineObserver};
pub use pipeline::{ControllerPipeline, PipelineConfig, TickInput};
pub use select::{select_action, select_state, ActionSelection, StateSelection};
