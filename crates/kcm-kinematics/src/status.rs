//! The controller status — the single value threaded through the pipeline.

use glam::Vec3;
use rustc_hash::FxHashMap;

use kcm_core::{BehaviorIndex, Pose};

use crate::KinematicComponents;

// ── ProbeOverride ─────────────────────────────────────────────────────────────

/// Per-tick override of the pre-move collision probe.
///
/// Behaviors set this to probe somewhere other than the default "along
/// gravity" direction (e.g. a wall-run state probing sideways), and to
/// substitute the drag coefficient for one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbeOverride {
    /// Probe direction (need not be normalized; zero falls back to default).
    pub direction: Vec3,

    /// Drag coefficient to use this tick instead of the configured one.
    pub drag: f32,
}

// ── TraversalEvent ────────────────────────────────────────────────────────────

/// A named path/traversal notification produced by a behavior.
///
/// Behaviors push these into the status during `process`; the pipeline
/// drains them to the observer at the end of the tick.  The transform list
/// carries whatever waypoints the behavior computed (vault path, ledge
/// points, …).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraversalEvent {
    pub name: String,
    pub transforms: Vec<Pose>,
}

// ── ControllerStatus ──────────────────────────────────────────────────────────

/// The complete per-tick status of one agent.
///
/// This is the single value threaded through the whole pipeline.  It is
/// **value-copied at each stage** — check stages receive the committed
/// status and return a *candidate* copy, so a failed check commits nothing.
/// The committed status of each tick is what the surrounding replication/
/// presentation layer diffs and serializes.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerStatus {
    pub components: KinematicComponents,

    /// Index of the selected state behavior in the sorted registry;
    /// `BehaviorIndex::NONE` when no state accepted.
    pub state_index: BehaviorIndex,

    /// Index of the selected action behavior; `NONE` when idle.
    pub action_index: BehaviorIndex,

    /// Times the current action has self-repeated without deactivating.
    pub action_repeats: u8,

    /// Replicated action-phase discriminant (small integer on the wire).
    pub phase_flag: u8,

    /// Named float "cosmetic" variables — animation/feel parameters that
    /// behaviors read and write and the presentation layer consumes.
    pub cosmetics: FxHashMap<String, f32>,

    /// Raw movement input for this tick, agent space.
    pub move_input: Vec3,

    /// Optional per-tick probe/drag override (cleared after the tick).
    pub probe_override: Option<ProbeOverride>,

    /// Traversal events queued by behaviors this tick; drained by the
    /// pipeline after processing.
    pub events: Vec<TraversalEvent>,
}

impl ControllerStatus {
    /// Read a cosmetic variable, defaulting to `0.0` when unset.
    pub fn cosmetic(&self, name: &str) -> f32 {
        self.cosmetics.get(name).copied().unwrap_or(0.0)
    }

    /// Write a cosmetic variable.
    pub fn set_cosmetic(&mut self, name: impl Into<String>, value: f32) {
        self.cosmetics.insert(name.into(), value);
    }

    /// Queue a traversal event for the observer.
    pub fn push_event(&mut self, name: impl Into<String>, transforms: Vec<Pose>) {
        self.events.push(TraversalEvent { name: name.into(), transforms });
    }
}
