//! combo_trainer — action phase machine demo.
//!
//! A stationary agent chains a repeatable jab while the attack input is
//! held, gets interrupted mid-chain by a higher-priority haymaker, and
//! then sits out both cooldowns.  No movement at all: this exercises the
//! selection and phase machinery in isolation.
//!
//! Input channels are repurposed: `move_input.x` is the jab button,
//! `move_input.y` the haymaker button.

use anyhow::Result;
use glam::Vec3;

use kcm_behavior::{
    ActionBehavior, ActionPhase, CheckReason, Compatibility, MotionContext, PhaseDurations,
    StateBehavior,
};
use kcm_collision::PlaneWorldBuilder;
use kcm_core::{BehaviorIndex, PhysicalProperties};
use kcm_kinematics::ControllerStatus;
use kcm_pipeline::{ControllerPipeline, PipelineBuilder, PipelineObserver, TickInput};

// ── Constants ─────────────────────────────────────────────────────────────────

const TICK_RATE_HZ:   f32 = 60.0;
const SIM_SECONDS:    u32 = 6;
const SAMPLE_EVERY_S: f32 = 0.25;
/// Jab held for the first three seconds.
const JAB_UNTIL_S:    f32 = 3.0;
/// Haymaker pressed for a fifth of a second at the three-second mark.
const HAYMAKER_AT_S:  f32 = 3.0;
const HAYMAKER_FOR_S: f32 = 0.2;

// ── Behaviors ─────────────────────────────────────────────────────────────────

/// The only state: stand still and accept everything.
struct Idle;

impl StateBehavior for Idle {
    fn name(&self) -> &str {
        "idle"
    }

    fn priority(&self) -> i32 {
        1
    }

    fn check(
        &mut self,
        status: &ControllerStatus,
        _ctx: &MotionContext,
        _was_active: bool,
    ) -> Option<ControllerStatus> {
        Some(status.clone())
    }

    fn process(&mut self, status: &mut ControllerStatus, _ctx: &MotionContext) {
        status.components.linear.acceleration = Vec3::ZERO;
    }
}

/// Fast repeatable strike: chains through its recovery while the button
/// is held.
struct Jab;

impl ActionBehavior for Jab {
    fn name(&self) -> &str {
        "jab"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn durations(&self) -> PhaseDurations {
        PhaseDurations::new(0.05, 0.2, 0.15)
    }

    fn cooldown(&self) -> f32 {
        0.4
    }

    fn allows_repeat(&self) -> bool {
        true
    }

    fn compatibility(&self) -> Compatibility {
        Compatibility::States(vec!["idle".into()])
    }

    fn check(
        &mut self,
        status: &ControllerStatus,
        _ctx: &MotionContext,
        _reason: CheckReason,
    ) -> Option<ControllerStatus> {
        (status.move_input.x > 0.5).then(|| status.clone())
    }

    fn process(&mut self, _status: &mut ControllerStatus, _ctx: &MotionContext) {}
}

/// Slow heavy strike: outranks the jab and interrupts it mid-chain.
struct Haymaker;

impl ActionBehavior for Haymaker {
    fn name(&self) -> &str {
        "haymaker"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn durations(&self) -> PhaseDurations {
        PhaseDurations::new(0.3, 0.2, 0.5)
    }

    fn cooldown(&self) -> f32 {
        2.0
    }

    fn compatibility(&self) -> Compatibility {
        Compatibility::States(vec!["idle".into()])
    }

    fn check(
        &mut self,
        status: &ControllerStatus,
        _ctx: &MotionContext,
        _reason: CheckReason,
    ) -> Option<ControllerStatus> {
        (status.move_input.y > 0.5).then(|| status.clone())
    }

    fn process(&mut self, _status: &mut ControllerStatus, _ctx: &MotionContext) {}
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct PhaseLog {
    action_changes: usize,
    phase_changes:  usize,
}

impl PipelineObserver for PhaseLog {
    fn on_action_change(&mut self, _from: BehaviorIndex, _to: BehaviorIndex) {
        self.action_changes += 1;
    }

    fn on_phase_change(&mut self, _action: BehaviorIndex, _phase: ActionPhase) {
        self.phase_changes += 1;
    }
}

fn phase_glyph(flag: u8) -> &'static str {
    match flag {
        1 => "anticipation",
        2 => "active",
        3 => "recovery",
        _ => "-",
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== combo_trainer — kcm action phase demo ===");
    println!("Tick rate: {TICK_RATE_HZ} Hz  |  Duration: {SIM_SECONDS} s");
    println!();

    // 1. A bare floor; the agent never leaves it.
    let mut world = PlaneWorldBuilder::new();
    world.add_plane(Vec3::Y, Vec3::ZERO, PhysicalProperties::default());

    let mut pipeline: ControllerPipeline<_> = PipelineBuilder::new()
        .with_state(Box::new(Idle))?
        .with_action(Box::new(Jab))?
        .with_action(Box::new(Haymaker))?
        .build(world.build())?;
    pipeline.set_position(Vec3::new(0.0, 0.5, 0.0));

    let jab = pipeline.registry().require_action("jab")?;
    let haymaker = pipeline.registry().require_action("haymaker")?;

    // 2. Drive the buttons on a fixed script and sample the timeline.
    let dt = 1.0 / TICK_RATE_HZ;
    let total_ticks = (SIM_SECONDS as f32 * TICK_RATE_HZ) as u32;
    let sample_every = (SAMPLE_EVERY_S * TICK_RATE_HZ) as u32;
    let mut observer = PhaseLog::default();
    let mut max_repeats: u8 = 0;

    println!(
        "{:>6} {:<10} {:<13} {:>8} {:>10} {:>10}",
        "t[s]", "action", "phase", "repeats", "jab cd", "heavy cd"
    );
    println!("{}", "-".repeat(62));

    for tick in 0..total_ticks {
        let t = tick as f32 * dt;
        let input = TickInput {
            move_input: Vec3::new(
                if t < JAB_UNTIL_S { 1.0 } else { 0.0 },
                if t >= HAYMAKER_AT_S && t < HAYMAKER_AT_S + HAYMAKER_FOR_S { 1.0 } else { 0.0 },
                0.0,
            ),
            ..Default::default()
        };
        pipeline.tick(&input, dt, &mut observer);

        let status = pipeline.status();
        max_repeats = max_repeats.max(status.action_repeats);

        if (tick + 1) % sample_every == 0 {
            let action = pipeline
                .registry()
                .action_name(status.action_index)
                .unwrap_or("-");
            let cooldown = |index| {
                pipeline
                    .registry()
                    .phase(index)
                    .map_or(0.0, |p| p.cooldown_remaining)
            };
            println!(
                "{:>6.2} {:<10} {:<13} {:>8} {:>10.2} {:>10.2}",
                t + dt,
                action,
                phase_glyph(status.phase_flag),
                status.action_repeats,
                cooldown(jab),
                cooldown(haymaker),
            );
        }
    }
    println!();

    // 3. Summary.
    println!("action changes : {}", observer.action_changes);
    println!("phase changes  : {}", observer.phase_changes);
    println!("longest combo  : {} repeats", max_repeats);

    Ok(())
}
