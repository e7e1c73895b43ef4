//! The state-behavior capability trait.

use kcm_kinematics::ControllerStatus;
use kcm_motion::RootMotionMode;

use crate::MotionContext;

/// One mutually-exclusive locomotion mode (ground, air, water, …).
///
/// States are selected once per tick, highest priority first; the first
/// state whose [`check`][Self::check] accepts wins.  `check` receives the
/// committed status by shared reference and returns a **candidate** copy
/// with any adjustments applied — returning `None` declines, committing
/// nothing.
///
/// Behavior objects are long-lived and shared across ticks; they must not
/// retain references into the status between calls.
pub trait StateBehavior: Send + Sync {
    /// Stable identifying name; registry keys and compatibility lists use it.
    fn name(&self) -> &str;

    /// Selection priority; higher wins, ties keep registration order.
    fn priority(&self) -> i32;

    /// Decide whether this state applies, given the committed status.
    ///
    /// `was_active` is set when this state won the previous tick — states
    /// commonly apply hysteresis on it (e.g. coyote time).
    fn check(
        &mut self,
        status: &ControllerStatus,
        ctx: &MotionContext,
        was_active: bool,
    ) -> Option<ControllerStatus>;

    /// Called once when this state takes over from another.
    fn on_enter(&mut self, _status: &mut ControllerStatus, _ctx: &MotionContext) {}

    /// Called once when another state takes over.
    fn on_exit(&mut self, _status: &mut ControllerStatus, _ctx: &MotionContext) {}

    /// Per-tick processing while selected: steer velocity, set composites,
    /// queue snaps, write cosmetics.
    fn process(&mut self, status: &mut ControllerStatus, ctx: &MotionContext);

    /// Root-motion folding mode while this state is selected.
    fn root_motion(&self) -> Option<RootMotionMode> {
        None
    }
}
