//! `kcm-condition` — the declarative surface-condition evaluator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`range`]     | `ScalarRange` with the inverted-`min > max` disabled sentinel |
//! | [`evaluator`] | `SurfaceCondition`, `EvalFrame`, the optional `DepthProbe` |
//! | [`watcher`]   | `SurfaceEventWatcher` — condition-driven named events |

pub mod evaluator;
pub mod range;
pub mod watcher;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use evaluator::{DepthProbe, EvalFrame, SurfaceCondition};
pub use range::ScalarRange;
pub use watcher::{SurfaceEvent, SurfaceEventWatcher};
