//! `kcm-behavior` — behavior traits, action phases, and the registry.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`phase`]    | `ActionPhase`, `PhaseDurations`, `ActionPhaseInfo` — the single-countdown phase machine |
//! | [`compat`]   | `Compatibility` — state/action activation constraints     |
//! | [`context`]  | `MotionContext` — per-tick ambient quantities             |
//! | [`state`]    | `StateBehavior` trait                                     |
//! | [`action`]   | `ActionBehavior` trait, `CheckReason`                     |
//! | [`registry`] | `BehaviorRegistry` — priority-sorted, stable, nullable lookups |
//! | [`noop`]     | `NoopState` / `NoopAction` placeholders                   |

pub mod action;
pub mod compat;
pub mod context;
pub mod noop;
pub mod phase;
pub mod registry;
pub mod state;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::{ActionBehavior, CheckReason};
pub use compat::Compatibility;
pub use context::MotionContext;
pub use noop::{NoopAction, NoopState};
pub use phase::{ActionPhase, ActionPhaseInfo, PhaseDurations};
pub use registry::BehaviorRegistry;
pub use state::StateBehavior;
