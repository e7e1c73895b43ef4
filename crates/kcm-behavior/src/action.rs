//! The action-behavior capability trait.

use kcm_kinematics::ControllerStatus;
use kcm_motion::RootMotionMode;

use crate::{Compatibility, MotionContext, PhaseDurations};

/// Why an action's `check` is being consulted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CheckReason {
    /// Normal selection of a not-currently-running action.
    Fresh,

    /// The action is in recovery and is being offered a self-repeat.
    Repeat,
}

/// A transient, phase-based behavior (jump, dash, …) layered on top of the
/// selected state.
///
/// The phase timeline ([`PhaseDurations`] + cooldown) is immutable
/// configuration read once at activation; the running countdown lives in
/// the registry's [`ActionPhaseInfo`][crate::ActionPhaseInfo], not in the
/// behavior object.
pub trait ActionBehavior: Send + Sync {
    fn name(&self) -> &str;

    /// Selection priority; a challenger needs strictly higher priority than
    /// a running incumbent, except equal priority wins during recovery.
    fn priority(&self) -> i32;

    /// Anticipation/active/recovery lengths for one activation.
    fn durations(&self) -> PhaseDurations;

    /// Cooldown after expiry or deactivation, seconds.
    fn cooldown(&self) -> f32 {
        0.0
    }

    /// May this action restart itself from its own recovery phase?
    fn allows_repeat(&self) -> bool {
        false
    }

    /// While running, keep the current state selected without re-checking.
    fn freezes_state(&self) -> bool {
        false
    }

    /// State/action constraint, applied on both fresh and repeat paths.
    fn compatibility(&self) -> Compatibility {
        Compatibility::Always
    }

    /// Decide whether to activate, returning a candidate status.
    fn check(
        &mut self,
        status: &ControllerStatus,
        ctx: &MotionContext,
        reason: CheckReason,
    ) -> Option<ControllerStatus>;

    fn on_enter(&mut self, _status: &mut ControllerStatus, _ctx: &MotionContext) {}

    fn on_exit(&mut self, _status: &mut ControllerStatus, _ctx: &MotionContext) {}

    /// Per-tick processing while running.
    fn process(&mut self, status: &mut ControllerStatus, ctx: &MotionContext);

    /// Root-motion folding mode while running; overrides the state's.
    fn root_motion(&self) -> Option<RootMotionMode> {
        None
    }
}
