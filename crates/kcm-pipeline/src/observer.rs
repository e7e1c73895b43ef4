//! Lifecycle notifications for the replication/presentation layer.

use kcm_behavior::ActionPhase;
use kcm_condition::SurfaceEvent;
use kcm_core::{BehaviorIndex, Pose};
use kcm_kinematics::ControllerStatus;

/// Receives named lifecycle notifications from the pipeline.
///
/// Every method has a no-op default, so observers implement only what they
/// consume.  Calls arrive synchronously during [`tick`] on the ticking
/// thread, in the order the underlying events occurred.
///
/// [`tick`]: crate::ControllerPipeline::tick
pub trait PipelineObserver {
    /// The selected state index changed (either side may be `NONE`).
    fn on_state_change(&mut self, _from: BehaviorIndex, _to: BehaviorIndex) {}

    /// The selected action index changed (either side may be `NONE`).
    fn on_action_change(&mut self, _from: BehaviorIndex, _to: BehaviorIndex) {}

    /// The running action crossed into a new phase.
    fn on_phase_change(&mut self, _action: BehaviorIndex, _phase: ActionPhase) {}

    /// A surface-event watcher matched.
    fn on_surface_event(&mut self, _event: &SurfaceEvent) {}

    /// A behavior queued a named path/traversal event.
    fn on_traversal_event(&mut self, _name: &str, _transforms: &[Pose]) {}

    /// The tick finished; `status` is the committed result, ready for
    /// diffing/serialization.
    fn on_tick_end(&mut self, _status: &ControllerStatus) {}
}

/// An observer that ignores everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}
