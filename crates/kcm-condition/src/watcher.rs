//! Generic condition-driven event watchers.

use kcm_collision::CollisionQuery;
use kcm_kinematics::ControllerStatus;

use crate::{EvalFrame, SurfaceCondition};

/// A named application event produced by a matching watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceEvent {
    pub name: String,

    /// Index of the matching surface in the status' surface list.
    pub surface_index: usize,
}

/// Re-runs a [`SurfaceCondition`] every tick and fires a named event on a
/// match.
///
/// Firing is edge-triggered: once fired, the watcher stays quiet until the
/// condition stops matching.  With `fire_once` it stays latched until an
/// explicit [`reset`][Self::reset].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceEventWatcher {
    pub event:     String,
    pub condition: SurfaceCondition,
    pub fire_once: bool,
    fired:         bool,
}

impl SurfaceEventWatcher {
    pub fn new(event: impl Into<String>, condition: SurfaceCondition) -> Self {
        Self { event: event.into(), condition, fire_once: false, fired: false }
    }

    pub fn once(event: impl Into<String>, condition: SurfaceCondition) -> Self {
        Self { fire_once: true, ..Self::new(event, condition) }
    }

    /// Evaluate the condition, yielding an event on a fresh match.
    pub fn poll(
        &mut self,
        status: &ControllerStatus,
        frame: &EvalFrame,
        query: Option<&dyn CollisionQuery>,
    ) -> Option<SurfaceEvent> {
        match self.condition.evaluate(status, frame, query) {
            Some(index) => {
                if self.fired {
                    return None;
                }
                self.fired = true;
                Some(SurfaceEvent { name: self.event.clone(), surface_index: index })
            }
            None => {
                if !self.fire_once {
                    self.fired = false;
                }
                None
            }
        }
    }

    /// Re-arm a latched `fire_once` watcher.
    pub fn reset(&mut self) {
        self.fired = false;
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
