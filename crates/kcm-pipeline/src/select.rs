//! State and action selection.
//!
//! Both routines scan the registry's priority order (descending, stable on
//! ties) and return the winning index plus the winner's candidate status.
//! They never mutate the committed status themselves — the pipeline applies
//! the candidate after handling enter/exit notifications.

use kcm_behavior::{ActionPhase, BehaviorRegistry, CheckReason, MotionContext};
use kcm_core::BehaviorIndex;
use kcm_kinematics::ControllerStatus;

// ── State selection ───────────────────────────────────────────────────────────

/// Outcome of one state-selection pass.
pub struct StateSelection {
    pub index:     BehaviorIndex,
    pub candidate: Option<ControllerStatus>,
}

/// Pick this tick's state: highest priority whose check accepts.
///
/// If the running action freezes the state, the previous index is kept
/// without consulting any checks.  No state accepting yields `NONE`, which
/// makes downstream state processing a passthrough.
pub fn select_state(
    registry: &mut BehaviorRegistry,
    status: &ControllerStatus,
    ctx: &MotionContext,
) -> StateSelection {
    let frozen = registry
        .action(status.action_index)
        .is_some_and(|a| a.freezes_state())
        && registry
            .phase(status.action_index)
            .is_some_and(|p| p.is_running());
    if frozen {
        return StateSelection { index: status.state_index, candidate: None };
    }

    for i in 0..registry.state_count() {
        let index = BehaviorIndex::from_usize(i);
        let was_active = index == status.state_index;
        let Some(state) = registry.state_mut(index) else { continue };
        if let Some(candidate) = state.check(status, ctx, was_active) {
            // The registry is priority-sorted, so the first acceptance is
            // the highest-priority one.
            return StateSelection { index, candidate: Some(candidate) };
        }
    }
    StateSelection { index: BehaviorIndex::NONE, candidate: None }
}

// ── Action selection ──────────────────────────────────────────────────────────

/// Outcome of one action-selection pass.
pub struct ActionSelection {
    pub index:     BehaviorIndex,
    pub candidate: Option<ControllerStatus>,

    /// The incumbent restarted itself from recovery.
    pub repeated: bool,
}

/// Pick this tick's action.
///
/// Order of business: offer the recovering incumbent a self-repeat; clear
/// an expired incumbent; then scan candidates in priority order, skipping
/// any still winding through their own timeline or cooldown.  A challenger
/// needs strictly higher priority than the incumbent — equal priority is
/// enough only while the incumbent is in recovery, letting a same-priority
/// action take over once the previous one winds down.
pub fn select_action(
    registry: &mut BehaviorRegistry,
    status: &ControllerStatus,
    ctx: &MotionContext,
) -> ActionSelection {
    let state_name = registry.state_name(status.state_index).map(str::to_owned);
    let mut incumbent = status.action_index;

    // Self-repeat probe: a recovering incumbent that allows repeats and is
    // still compatible gets first refusal.
    if registry
        .phase(incumbent)
        .is_some_and(|p| p.phase() == ActionPhase::Recovery)
    {
        let permitted = registry.action(incumbent).is_some_and(|a| {
            a.allows_repeat()
                && a.compatibility().permits(state_name.as_deref(), Some(a.name()))
        });
        if permitted
            && let Some(action) = registry.action_mut(incumbent)
            && let Some(candidate) = action.check(status, ctx, CheckReason::Repeat)
        {
            return ActionSelection { index: incumbent, candidate: Some(candidate), repeated: true };
        }
    }

    // An expired incumbent no longer defends its slot.
    if incumbent.is_some() && !registry.phase(incumbent).is_some_and(|p| p.is_running()) {
        incumbent = BehaviorIndex::NONE;
    }

    let incumbent_priority = registry.action(incumbent).map(|a| a.priority());
    let incumbent_recovering = registry
        .phase(incumbent)
        .is_some_and(|p| p.phase() == ActionPhase::Recovery);
    let incumbent_name = registry.action_name(incumbent).map(str::to_owned);

    for i in 0..registry.action_count() {
        let index = BehaviorIndex::from_usize(i);
        if index == incumbent {
            continue;
        }
        let Some(info) = registry.phase(index).copied() else { continue };

        let (allows_repeat, compatible, priority) = match registry.action(index) {
            Some(a) => (
                a.allows_repeat(),
                a.compatibility().permits(state_name.as_deref(), incumbent_name.as_deref()),
                a.priority(),
            ),
            None => continue,
        };

        // Mid-flight or winding down without repeat permission: untouchable.
        match info.phase() {
            ActionPhase::Anticipation | ActionPhase::Active => continue,
            ActionPhase::Recovery if !allows_repeat => continue,
            _ => {}
        }
        if info.is_cooling_down() && !allows_repeat {
            continue;
        }
        if !compatible {
            continue;
        }
        if let Some(p) = incumbent_priority {
            let takeover = priority > p || (priority == p && incumbent_recovering);
            if !takeover {
                continue;
            }
        }
        if let Some(action) = registry.action_mut(index)
            && let Some(candidate) = action.check(status, ctx, CheckReason::Fresh)
        {
            return ActionSelection { index, candidate: Some(candidate), repeated: false };
        }
    }

    ActionSelection { index: incumbent, candidate: None, repeated: false }
}
