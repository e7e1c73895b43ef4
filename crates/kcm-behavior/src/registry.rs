//! The priority-sorted behavior registry.

use std::cmp::Reverse;

use tracing::debug;

use kcm_core::{BehaviorIndex, KcmError, KcmResult};

use crate::{ActionBehavior, ActionPhaseInfo, StateBehavior};

struct ActionEntry {
    behavior: Box<dyn ActionBehavior>,
    phase:    ActionPhaseInfo,
}

/// Holds the registered behaviors, sorted descending by priority.
///
/// A [`BehaviorIndex`] always refers to a position in this sorted order;
/// `NONE` (or any stale out-of-range index) makes every lookup return
/// `None` rather than panic.  The sort is **stable**: behaviors of equal
/// priority keep their registration order, so equal-priority tie-breaking
/// is deterministic per registration sequence.
///
/// Action runtime state (the phase countdown) lives here, parallel to the
/// behavior object — behaviors stay free of cross-tick bookkeeping.
#[derive(Default)]
pub struct BehaviorRegistry {
    states:  Vec<Box<dyn StateBehavior>>,
    actions: Vec<ActionEntry>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Register a state behavior; `false` when the name is already taken.
    pub fn add_state(&mut self, behavior: Box<dyn StateBehavior>) -> bool {
        if self.find_state(behavior.name()).is_some() {
            debug!(name = behavior.name(), "state behavior already registered");
            return false;
        }
        self.states.push(behavior);
        self.states.sort_by_key(|b| Reverse(b.priority()));
        true
    }

    /// Register an action behavior; `false` when the name is already taken.
    pub fn add_action(&mut self, behavior: Box<dyn ActionBehavior>) -> bool {
        if self.find_action(behavior.name()).is_some() {
            debug!(name = behavior.name(), "action behavior already registered");
            return false;
        }
        self.actions.push(ActionEntry { behavior, phase: ActionPhaseInfo::default() });
        self.actions.sort_by_key(|e| Reverse(e.behavior.priority()));
        true
    }

    /// Remove the state behavior named `name`; `false` when absent.
    pub fn remove_state(&mut self, name: &str) -> bool {
        match self.states.iter().position(|b| b.name() == name) {
            Some(i) => {
                self.states.remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove the first state behavior of `priority`; `false` when absent.
    pub fn remove_state_by_priority(&mut self, priority: i32) -> bool {
        match self.states.iter().position(|b| b.priority() == priority) {
            Some(i) => {
                self.states.remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove the action behavior named `name`; `false` when absent.
    pub fn remove_action(&mut self, name: &str) -> bool {
        match self.actions.iter().position(|e| e.behavior.name() == name) {
            Some(i) => {
                self.actions.remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove the first action behavior of `priority`; `false` when absent.
    pub fn remove_action_by_priority(&mut self, priority: i32) -> bool {
        match self.actions.iter().position(|e| e.behavior.priority() == priority) {
            Some(i) => {
                self.actions.remove(i);
                true
            }
            None => false,
        }
    }

    // ── Indexed lookup ────────────────────────────────────────────────────

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn state(&self, index: BehaviorIndex) -> Option<&dyn StateBehavior> {
        self.states.get(index.index()?).map(|b| b.as_ref())
    }

    // `&mut` is invariant, so the boxed object's `'static` must be spelled
    // out instead of eliding to the borrow's lifetime.
    pub fn state_mut(&mut self, index: BehaviorIndex) -> Option<&mut (dyn StateBehavior + 'static)> {
        let i = index.index()?;
        self.states.get_mut(i).map(|b| b.as_mut())
    }

    pub fn action(&self, index: BehaviorIndex) -> Option<&dyn ActionBehavior> {
        self.actions.get(index.index()?).map(|e| e.behavior.as_ref())
    }

    pub fn action_mut(&mut self, index: BehaviorIndex) -> Option<&mut (dyn ActionBehavior + 'static)> {
        let i = index.index()?;
        self.actions.get_mut(i).map(|e| e.behavior.as_mut())
    }

    /// Runtime phase state of the action at `index`.
    pub fn phase(&self, index: BehaviorIndex) -> Option<&ActionPhaseInfo> {
        self.actions.get(index.index()?).map(|e| &e.phase)
    }

    pub fn phase_mut(&mut self, index: BehaviorIndex) -> Option<&mut ActionPhaseInfo> {
        let i = index.index()?;
        self.actions.get_mut(i).map(|e| &mut e.phase)
    }

    /// Advance every action's countdown/cooldown by `dt`.
    pub fn update_phases(&mut self, dt: f32) {
        for entry in &mut self.actions {
            entry.phase.update(dt);
        }
    }

    // ── Name / priority lookup ────────────────────────────────────────────

    pub fn find_state(&self, name: &str) -> Option<&dyn StateBehavior> {
        self.states.iter().find(|b| b.name() == name).map(|b| b.as_ref())
    }

    pub fn find_action(&self, name: &str) -> Option<&dyn ActionBehavior> {
        self.actions
            .iter()
            .find(|e| e.behavior.name() == name)
            .map(|e| e.behavior.as_ref())
    }

    pub fn state_by_priority(&self, priority: i32) -> Option<&dyn StateBehavior> {
        self.states.iter().find(|b| b.priority() == priority).map(|b| b.as_ref())
    }

    pub fn action_by_priority(&self, priority: i32) -> Option<&dyn ActionBehavior> {
        self.actions
            .iter()
            .find(|e| e.behavior.priority() == priority)
            .map(|e| e.behavior.as_ref())
    }

    /// Sorted index of the state named `name`; `NONE` when absent.
    pub fn state_index(&self, name: &str) -> BehaviorIndex {
        match self.states.iter().position(|b| b.name() == name) {
            Some(i) => BehaviorIndex::from_usize(i),
            None => BehaviorIndex::NONE,
        }
    }

    /// Sorted index of the action named `name`; `NONE` when absent.
    pub fn action_index(&self, name: &str) -> BehaviorIndex {
        match self.actions.iter().position(|e| e.behavior.name() == name) {
            Some(i) => BehaviorIndex::from_usize(i),
            None => BehaviorIndex::NONE,
        }
    }

    /// Like [`state_index`][Self::state_index], but an absent name is an
    /// error instead of the `NONE` sentinel.  For setup code that treats a
    /// missing behavior as a configuration mistake.
    pub fn require_state(&self, name: &str) -> KcmResult<BehaviorIndex> {
        let index = self.state_index(name);
        if index.is_some() {
            Ok(index)
        } else {
            Err(KcmError::BehaviorNotFound(name.to_owned()))
        }
    }

    /// Like [`action_index`][Self::action_index], erroring on absence.
    pub fn require_action(&self, name: &str) -> KcmResult<BehaviorIndex> {
        let index = self.action_index(name);
        if index.is_some() {
            Ok(index)
        } else {
            Err(KcmError::BehaviorNotFound(name.to_owned()))
        }
    }

    /// Name of the state at `index`, for compatibility checks and logging.
    pub fn state_name(&self, index: BehaviorIndex) -> Option<&str> {
        self.state(index).map(|b| b.name())
    }

    /// Name of the action at `index`.
    pub fn action_name(&self, index: BehaviorIndex) -> Option<&str> {
        self.action(index).map(|b| b.name())
    }
}
