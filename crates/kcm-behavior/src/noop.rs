//! Placeholder behaviors.

use kcm_kinematics::ControllerStatus;

use crate::{ActionBehavior, CheckReason, MotionContext, PhaseDurations, StateBehavior};

/// A state that never applies and does nothing; useful as a registry
/// placeholder or a test stand-in.
pub struct NoopState {
    name:     String,
    priority: i32,
}

impl NoopState {
    pub fn new(name: impl Into<String>, priority: i32) -> Self {
        Self { name: name.into(), priority }
    }
}

impl StateBehavior for NoopState {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn check(
        &mut self,
        _status: &ControllerStatus,
        _ctx: &MotionContext,
        _was_active: bool,
    ) -> Option<ControllerStatus> {
        None
    }

    fn process(&mut self, _status: &mut ControllerStatus, _ctx: &MotionContext) {}
}

/// An action that never activates.
pub struct NoopAction {
    name:     String,
    priority: i32,
}

impl NoopAction {
    pub fn new(name: impl Into<String>, priority: i32) -> Self {
        Self { name: name.into(), priority }
    }
}

impl ActionBehavior for NoopAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn durations(&self) -> PhaseDurations {
        PhaseDurations::default()
    }

    fn check(
        &mut self,
        _status: &ControllerStatus,
        _ctx: &MotionContext,
        _reason: CheckReason,
    ) -> Option<ControllerStatus> {
        None
    }

    fn process(&mut self, _status: &mut ControllerStatus, _ctx: &MotionContext) {}
}
