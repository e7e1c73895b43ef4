//! platform_rider — referential-frame throughput demo.
//!
//! 1,000 agents stand on conveyor platforms translating at staggered speeds;
//! quadratic drag against the referential frame carries each agent toward
//! its platform's velocity.  No behaviors are registered at all — carrying
//! is purely a property of the integration stage — so this doubles as a
//! lower-bound throughput measurement of the probe → integrate → resolve
//! core.
//!
//! Run with:
//!   cargo run -p platform_rider --release

use std::time::Instant;

use anyhow::Result;
use glam::Vec3;

use kcm_collision::{PlaneWorld, PlaneWorldBuilder, Shape};
use kcm_core::PhysicalProperties;
use kcm_pipeline::{ControllerPipeline, NoopObserver, PipelineBuilder, TickInput};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:   usize = 1_000;
const TICK_RATE_HZ:  f32   = 60.0;
const SIM_SECONDS:   u32   = 10;
const DRAG_COEFF:    f32   = 50.0;
const MASS_KG:       f32   = 80.0;
/// Conveyor speeds cycle 0.5 … 3.0 m/s across the population.
const SPEED_STEPS:   usize = 6;

// ── World construction ────────────────────────────────────────────────────────

fn conveyor_speed(agent: usize) -> f32 {
    0.5 * (1 + agent % SPEED_STEPS) as f32
}

fn conveyor_world(speed: f32) -> PlaneWorld {
    let mut b = PlaneWorldBuilder::new();
    b.add_moving_plane(
        Vec3::Y,
        Vec3::ZERO,
        PhysicalProperties::default(),
        Vec3::X * speed,
        Vec3::ZERO,
    );
    b.build()
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== platform_rider — kcm referential-frame throughput ===");
    println!(
        "Agents: {AGENT_COUNT}  |  Rate: {TICK_RATE_HZ} Hz  |  Duration: {SIM_SECONDS} s"
    );
    println!();

    // 1. One pipeline per agent, each on its own conveyor.
    let mut pipelines: Vec<ControllerPipeline<PlaneWorld>> = (0..AGENT_COUNT)
        .map(|i| {
            let mut p = PipelineBuilder::new()
                .shape(Shape::Sphere { radius: 0.5 })
                .mass(MASS_KG)
                .gravity(Vec3::new(0.0, -9.81, 0.0))
                .drag(DRAG_COEFF)
                .build(conveyor_world(conveyor_speed(i)))?;
            p.set_position(Vec3::new(0.0, 0.5, 0.0));
            Ok(p)
        })
        .collect::<Result<_>>()?;

    // 2. Tick everything, advancing each conveyor in lockstep.
    let dt = 1.0 / TICK_RATE_HZ;
    let total_ticks = (SIM_SECONDS as f32 * TICK_RATE_HZ) as u32;
    let input = TickInput::default();

    let t0 = Instant::now();
    for _ in 0..total_ticks {
        for pipeline in &mut pipelines {
            pipeline.query_mut().advance(dt);
            pipeline.tick(&input, dt, &mut NoopObserver);
        }
    }
    let elapsed = t0.elapsed();

    // 3. Carried-speed summary per conveyor class.
    println!("{:>10} {:>10} {:>10} {:>8}", "conveyor", "mean |v|", "worst |v|", "agents");
    println!("{}", "-".repeat(42));
    for step in 0..SPEED_STEPS {
        let target = 0.5 * (1 + step) as f32;
        let speeds: Vec<f32> = pipelines
            .iter()
            .enumerate()
            .filter(|(i, _)| i % SPEED_STEPS == step)
            .map(|(_, p)| p.status().components.linear.velocity.length())
            .collect();
        let mean = speeds.iter().sum::<f32>() / speeds.len() as f32;
        let worst = speeds.iter().fold(f32::INFINITY, |a, &b| a.min(b));
        println!("{target:>8.1}  {mean:>10.3} {worst:>10.3} {:>8}", speeds.len());
    }
    println!();

    // 4. Throughput.
    let agent_ticks = AGENT_COUNT as u64 * total_ticks as u64;
    println!(
        "{} agent-ticks in {:.3} s → {:.0} agent-ticks/s",
        agent_ticks,
        elapsed.as_secs_f64(),
        agent_ticks as f64 / elapsed.as_secs_f64(),
    );

    Ok(())
}
