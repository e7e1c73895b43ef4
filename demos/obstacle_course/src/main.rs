//! obstacle_course — smallest end-to-end demo for the kcm motion engine.
//!
//! One agent sprints down a corridor at 60 Hz, hops twice, and slides along
//! a slanted wall at the far end.  Everything runs on the analytic
//! `PlaneWorld` backend; swap in a `CollisionQuery` adapter over a real
//! physics engine to drive an actual character.

use std::time::Instant;

use anyhow::Result;
use glam::Vec3;

use kcm_behavior::{
    ActionBehavior, CheckReason, Compatibility, MotionContext, PhaseDurations, StateBehavior,
};
use kcm_collision::{PlaneWorldBuilder, Shape};
use kcm_condition::{SurfaceCondition, SurfaceEvent, SurfaceEventWatcher};
use kcm_core::math::lerp_clamped;
use kcm_core::{BehaviorIndex, PhysicalProperties, Pose};
use kcm_kinematics::ControllerStatus;
use kcm_pipeline::{ControllerPipeline, PipelineBuilder, PipelineObserver, TickInput};

// ── Constants ─────────────────────────────────────────────────────────────────

const TICK_RATE_HZ:  f32 = 60.0;
const SIM_SECONDS:   u32 = 12;
const MAX_RUN_SPEED: f32 = 6.0;
const RUN_ACCEL:     f32 = 5.0;
const HOP_IMPULSE:   f32 = 4.0;
const HOP_AT_SECS:   [u32; 2] = [2, 6];

// ── Behaviors ─────────────────────────────────────────────────────────────────

/// Ground sprint: steer the horizontal velocity toward the input.
struct Run;

impl StateBehavior for Run {
    fn name(&self) -> &str {
        "run"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn check(
        &mut self,
        status: &ControllerStatus,
        _ctx: &MotionContext,
        _was_active: bool,
    ) -> Option<ControllerStatus> {
        status.components.has_active().then(|| status.clone())
    }

    fn process(&mut self, status: &mut ControllerStatus, ctx: &MotionContext) {
        let input = status.move_input;
        let lin = &mut status.components.linear;
        let target = Vec3::new(input.x, 0.0, input.z) * MAX_RUN_SPEED;
        let horizontal = Vec3::new(lin.velocity.x, 0.0, lin.velocity.z);
        let blended = lerp_clamped(horizontal, target, RUN_ACCEL * ctx.dt);
        lin.velocity = Vec3::new(blended.x, lin.velocity.y, blended.z);
        lin.acceleration = Vec3::ZERO;
    }
}

/// Free fall: the external-force referential supplies gravity.
struct Fall;

impl StateBehavior for Fall {
    fn name(&self) -> &str {
        "fall"
    }

    fn priority(&self) -> i32 {
        5
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

/// Hop: upward kick while grounded, gated by a cooldown.
struct Hop;

impl ActionBehavior for Hop {
    fn name(&self) -> &str {
        "hop"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn durations(&self) -> PhaseDurations {
        PhaseDurations::new(0.1, 0.4, 0.2)
    }

    fn cooldown(&self) -> f32 {
        1.0
    }

    fn compatibility(&self) -> Compatibility {
        Compatibility::States(vec!["run".into()])
    }

    fn check(
        &mut self,
        status: &ControllerStatus,
        _ctx: &MotionContext,
        _reason: CheckReason,
    ) -> Option<ControllerStatus> {
        (status.move_input.y > 0.5 && status.components.has_active()).then(|| status.clone())
    }

    fn on_enter(&mut self, status: &mut ControllerStatus, _ctx: &MotionContext) {
        status.components.linear.velocity.y = HOP_IMPULSE;
    }

    fn process(&mut self, _status: &mut ControllerStatus, _ctx: &MotionContext) {}
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct CountingObserver {
    state_changes:  usize,
    action_changes: usize,
    surface_events: usize,
    ticks:          usize,
}

impl PipelineObserver for CountingObserver {
    fn on_state_change(&mut self, _from: BehaviorIndex, _to: BehaviorIndex) {
        self.state_changes += 1;
    }

    fn on_action_change(&mut self, _from: BehaviorIndex, _to: BehaviorIndex) {
        self.action_changes += 1;
    }

    fn on_surface_event(&mut self, _event: &SurfaceEvent) {
        self.surface_events += 1;
    }

    fn on_traversal_event(&mut self, _name: &str, _transforms: &[Pose]) {}

    fn on_tick_end(&mut self, _status: &ControllerStatus) {
        self.ticks += 1;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== obstacle_course — kcm motion engine demo ===");
    println!("Tick rate: {TICK_RATE_HZ} Hz  |  Duration: {SIM_SECONDS} s");
    println!();

    // 1. Build the course: a floor and a slanted wall across the corridor.
    let mut world = PlaneWorldBuilder::new();
    world.add_plane(Vec3::Y, Vec3::ZERO, PhysicalProperties::default());
    world.add_plane(
        Vec3::new(-1.0, 0.0, -0.3),
        Vec3::new(14.0, 0.0, 0.0),
        PhysicalProperties::slick_wall(),
    );
    let world = world.build();

    // 2. Assemble the pipeline: two states, one action, one watcher.
    let mut pipeline: ControllerPipeline<_> = PipelineBuilder::new()
        .shape(Shape::Sphere { radius: 0.5 })
        .mass(80.0)
        .gravity(Vec3::new(0.0, -9.81, 0.0))
        .with_state(Box::new(Run))?
        .with_state(Box::new(Fall))?
        .with_action(Box::new(Hop))?
        .with_watcher(SurfaceEventWatcher::new(
            "landed",
            SurfaceCondition::steppable_ground(45.0),
        ))
        .build(world)?;
    pipeline.set_position(Vec3::new(0.0, 0.5, 0.0));

    // 3. Run, sampling the committed status once per simulated second.
    let dt = 1.0 / TICK_RATE_HZ;
    let total_ticks = (SIM_SECONDS as f32 * TICK_RATE_HZ) as u32;
    let mut observer = CountingObserver::default();
    let mut samples: Vec<(u32, ControllerStatus)> = Vec::new();

    let t0 = Instant::now();
    for tick in 0..total_ticks {
        let second = tick / TICK_RATE_HZ as u32;
        let hop = HOP_AT_SECS.contains(&second) && tick % TICK_RATE_HZ as u32 == 0;
        let input = TickInput {
            move_input: Vec3::new(1.0, if hop { 1.0 } else { 0.0 }, 0.0),
            ..Default::default()
        };
        pipeline.tick(&input, dt, &mut observer);

        if (tick + 1) % TICK_RATE_HZ as u32 == 0 {
            samples.push((second + 1, pipeline.status().clone()));
        }
    }
    let elapsed = t0.elapsed();

    // 4. Trajectory table.
    println!(
        "{:>4} {:>8} {:>8} {:>8} {:>8}  {:<8} {}",
        "t[s]", "x", "y", "z", "|v|", "state", "action"
    );
    println!("{}", "-".repeat(58));
    for (second, status) in &samples {
        let lin = &status.components.linear;
        let state = pipeline
            .registry()
            .state_name(status.state_index)
            .unwrap_or("-");
        let action = pipeline
            .registry()
            .action_name(status.action_index)
            .unwrap_or("-");
        println!(
            "{:>4} {:>8.2} {:>8.2} {:>8.2} {:>8.2}  {:<8} {}",
            second,
            lin.position.x,
            lin.position.y,
            lin.position.z,
            lin.velocity.length(),
            state,
            action,
        );
    }
    println!();

    // 5. Summary.
    println!("Simulated {} ticks in {:.3} s", observer.ticks, elapsed.as_secs_f64());
    println!("  state changes  : {}", observer.state_changes);
    println!("  action changes : {}", observer.action_changes);
    println!("  surface events : {}", observer.surface_events);

    Ok(())
}
