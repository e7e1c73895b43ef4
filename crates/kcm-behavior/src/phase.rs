//! Action phase machine.
//!
//! An action runs through anticipation → active → recovery on a **single
//! countdown**: `remaining` starts at the summed duration and the current
//! phase is derived from which band it falls in.  There is no separate
//! per-phase clock; everything (`phase_elapsed`, `normalized_time`, skips)
//! is computed from `remaining` and the stored durations.

/// Which part of its timeline an action is in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionPhase {
    /// Not running (never activated, or expired).
    #[default]
    Undetermined,

    /// Wind-up before the effect lands.
    Anticipation,

    /// The effective part.
    Active,

    /// Wind-down; a same-priority challenger may take over here.
    Recovery,
}

impl ActionPhase {
    /// Small stable discriminant for replication (`phase_flag`).
    pub fn flag(self) -> u8 {
        match self {
            ActionPhase::Undetermined => 0,
            ActionPhase::Anticipation => 1,
            ActionPhase::Active       => 2,
            ActionPhase::Recovery     => 3,
        }
    }
}

/// Configured lengths of the three live phases, seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseDurations {
    pub anticipation: f32,
    pub active:       f32,
    pub recovery:     f32,
}

impl PhaseDurations {
    pub const fn new(anticipation: f32, active: f32, recovery: f32) -> Self {
        Self { anticipation, active, recovery }
    }

    pub fn total(&self) -> f32 {
        self.anticipation + self.active + self.recovery
    }

    /// Configured length of one phase (`Undetermined` has none).
    pub fn of(&self, phase: ActionPhase) -> f32 {
        match phase {
            ActionPhase::Undetermined => 0.0,
            ActionPhase::Anticipation => self.anticipation,
            ActionPhase::Active       => self.active,
            ActionPhase::Recovery     => self.recovery,
        }
    }
}

/// Per-action runtime state: the countdown, the cooldown, and the repeat
/// counter.  Owned by the registry, not the behavior object.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionPhaseInfo {
    pub durations: PhaseDurations,

    /// Seconds left on the whole timeline; `<= 0` means not running.
    pub remaining: f32,

    /// Configured cooldown after expiry/deactivation.
    pub cooldown: f32,

    /// Seconds of cooldown left.
    pub cooldown_remaining: f32,

    /// Consecutive self-repeats without deactivating.
    pub repeats: u8,
}

impl ActionPhaseInfo {
    /// Start a fresh activation.
    pub fn init(&mut self, durations: PhaseDurations, cooldown: f32) {
        self.durations = durations;
        self.remaining = durations.total();
        self.cooldown = cooldown;
        self.cooldown_remaining = 0.0;
        self.repeats = 0;
    }

    /// Restart the timeline as a self-repeat, keeping the repeat count.
    pub fn repeat(&mut self) {
        self.remaining = self.durations.total();
        self.cooldown_remaining = 0.0;
        self.repeats = self.repeats.saturating_add(1);
    }

    /// Advance the countdown (or, once expired, the cooldown) by `dt`.
    pub fn update(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining -= dt;
            if self.remaining <= 0.0 {
                self.remaining = 0.0;
                self.cooldown_remaining = self.cooldown;
            }
        } else if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        }
    }

    /// Current phase, derived purely from `remaining`.
    pub fn phase(&self) -> ActionPhase {
        let d = &self.durations;
        if self.remaining <= 0.0 {
            ActionPhase::Undetermined
        } else if self.remaining > d.active + d.recovery {
            ActionPhase::Anticipation
        } else if self.remaining > d.recovery {
            ActionPhase::Active
        } else {
            ActionPhase::Recovery
        }
    }

    /// Seconds left in `phase`, assuming it is the current one.
    pub fn phase_remaining(&self, phase: ActionPhase) -> f32 {
        let d = &self.durations;
        let later = match phase {
            ActionPhase::Undetermined => return 0.0,
            ActionPhase::Anticipation => d.active + d.recovery,
            ActionPhase::Active       => d.recovery,
            ActionPhase::Recovery     => 0.0,
        };
        (self.remaining - later).clamp(0.0, d.of(phase))
    }

    /// Seconds already spent in `phase`.
    pub fn phase_elapsed(&self, phase: ActionPhase) -> f32 {
        self.durations.of(phase) - self.phase_remaining(phase)
    }

    /// Progress through `phase` in `[0, 1]`; `0` for a zero-length phase.
    pub fn normalized_time(&self, phase: ActionPhase) -> f32 {
        let duration = self.durations.of(phase);
        if duration <= f32::EPSILON {
            0.0
        } else {
            self.phase_elapsed(phase) / duration
        }
    }

    /// Jump the countdown to the start of `phase`.
    ///
    /// Skipping to `Undetermined` expires the action and starts its
    /// cooldown, same as running out naturally.
    pub fn skip_to_phase(&mut self, phase: ActionPhase) {
        let d = &self.durations;
        self.remaining = match phase {
            ActionPhase::Anticipation => d.total(),
            ActionPhase::Active       => d.active + d.recovery,
            ActionPhase::Recovery     => d.recovery,
            ActionPhase::Undetermined => {
                self.cooldown_remaining = self.cooldown;
                0.0
            }
        };
    }

    /// Deactivate, starting the cooldown and clearing the repeat count.
    pub fn reset(&mut self) {
        self.remaining = 0.0;
        self.cooldown_remaining = self.cooldown;
        self.repeats = 0;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    #[inline]
    pub fn is_cooling_down(&self) -> bool {
        self.cooldown_remaining > 0.0
    }
}
