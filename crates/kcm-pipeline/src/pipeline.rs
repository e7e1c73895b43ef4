//! The per-tick controller pipeline.

use glam::Vec3;
use tracing::{debug, trace, warn};

use kcm_behavior::{ActionPhase, BehaviorRegistry, MotionContext};
use kcm_collision::{
    depenetration_offset, resolve_slide, CollisionQuery, Penetration, Shape, SlideConfig,
    SlideOutcome,
};
use kcm_condition::{EvalFrame, SurfaceEventWatcher};
use kcm_core::math::{angle_between_deg, safe_normalize, DEGENERATE_EPSILON};
use kcm_core::{CollidableId, PhysicalProperties, Pose};
use kcm_kinematics::{ActiveSurfaces, ControllerStatus, ProbeOverride};
use kcm_motion::{
    apply_root_motion, drag_acceleration, integrate_angular, integrate_linear,
    referential_from_force, referential_from_surfaces, RootMotionDelta,
};
use kcm_surface::{Surface, SurfaceTracker};

use crate::observer::PipelineObserver;
use crate::select::{select_action, select_state};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Validated pipeline tuning; see [`PipelineBuilder`][crate::PipelineBuilder].
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// The agent's collision shape.
    pub shape: Shape,

    /// Agent mass, kg.
    pub mass: f32,

    /// Gravity acceleration vector.
    pub gravity: Vec3,

    /// Quadratic drag coefficient against the referential frame.
    pub drag_coeff: f32,

    /// Length of the default pre-move probe, along gravity.
    pub probe_distance: f32,

    /// Shape inflation used by the pre-move probe.
    pub probe_inflation: f32,

    /// Maximum normal-to-up angle for a surface to count as active ground.
    pub ground_slope_deg: f32,

    /// Keep the agent's rotation free of twist about the gravity up axis.
    pub align_to_gravity: bool,

    pub slide: SlideConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            shape:            Shape::Sphere { radius: 0.5 },
            mass:             80.0,
            gravity:          Vec3::new(0.0, -9.81, 0.0),
            drag_coeff:       0.0,
            probe_distance:   0.2,
            probe_inflation:  0.1,
            ground_slope_deg: 50.0,
            align_to_gravity: true,
            slide:            SlideConfig::default(),
        }
    }
}

/// Per-tick external inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Raw movement input, agent space.
    pub move_input: Vec3,

    /// Root-motion delta read from the animation source, if any.
    pub root_motion: Option<RootMotionDelta>,

    /// Overrides the default `mass * gravity` external force.
    pub external_force: Option<Vec3>,
}

// ── ControllerPipeline ────────────────────────────────────────────────────────

/// Orchestrates one agent: probe → select → process → integrate → resolve,
/// once per tick, single-threaded and synchronous.
///
/// The committed [`ControllerStatus`] is exclusively owned here; behaviors
/// see it by shared reference during checks and mutate only the working
/// copy handed to `process`.  Action runtime state lives in the registry,
/// surface velocity history in the tracker — behavior objects carry no
/// cross-tick bookkeeping.
pub struct ControllerPipeline<Q: CollisionQuery> {
    pub(crate) query:    Q,
    pub(crate) registry: BehaviorRegistry,
    pub(crate) status:   ControllerStatus,
    pub(crate) tracker:  SurfaceTracker,
    pub(crate) watchers: Vec<SurfaceEventWatcher>,
    pub(crate) config:   PipelineConfig,
}

impl<Q: CollisionQuery> ControllerPipeline<Q> {
    /// The committed status of the last tick.
    pub fn status(&self) -> &ControllerStatus {
        &self.status
    }

    pub fn registry(&self) -> &BehaviorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BehaviorRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    /// Mutable backend access, e.g. to advance a test world between ticks.
    pub fn query_mut(&mut self) -> &mut Q {
        &mut self.query
    }

    /// Teleport the agent, dropping stale contact history.
    pub fn set_position(&mut self, position: Vec3) {
        self.status.components.linear.position = position;
        self.status.components.surfaces.clear();
        self.status.components.active_surfaces.clear();
        self.tracker.retain_live(&[]);
    }

    /// Run one tick.
    pub fn tick(&mut self, input: &TickInput, dt: f32, observer: &mut dyn PipelineObserver) {
        let mut ctx = MotionContext::new(dt, self.config.mass, self.config.gravity);
        if let Some(force) = input.external_force {
            ctx = ctx.with_external_force(force);
        }
        if let Some(delta) = input.root_motion {
            ctx = ctx.with_root_motion(delta);
        }

        // 1. Working copy; inputs in.  The probe override queued by last
        // tick's processing applies to this tick, then expires.
        let mut status = self.status.clone();
        status.move_input = input.move_input;
        let probe_override = status.probe_override.take();

        // 2. Pre-move probe: surface list, tracker update, active set.
        self.probe_surfaces(&mut status, probe_override.as_ref(), dt);

        // 3. State selection.
        let previous_state = status.state_index;
        let selection = select_state(&mut self.registry, &status, &ctx);
        if let Some(candidate) = selection.candidate {
            status = candidate;
        }
        status.state_index = selection.index;
        if status.state_index != previous_state {
            trace!(from = %previous_state, to = %status.state_index, "state change");
            if let Some(prev) = self.registry.state_mut(previous_state) {
                prev.on_exit(&mut status, &ctx);
            }
            if let Some(next) = self.registry.state_mut(status.state_index) {
                next.on_enter(&mut status, &ctx);
            }
            observer.on_state_change(previous_state, status.state_index);
        }

        // 4. Action phases, then selection.
        self.registry.update_phases(dt);
        let previous_action = status.action_index;
        let selection = select_action(&mut self.registry, &status, &ctx);
        if selection.repeated {
            if let Some(candidate) = selection.candidate {
                status = candidate;
            }
            if let Some(phase) = self.registry.phase_mut(status.action_index) {
                phase.repeat();
                status.action_repeats = phase.repeats;
            }
        } else if selection.index != previous_action {
            if let Some(candidate) = selection.candidate {
                status = candidate;
            }
            status.action_index = selection.index;
            status.action_repeats = 0;
            if let Some(prev) = self.registry.action_mut(previous_action) {
                prev.on_exit(&mut status, &ctx);
            }
            if let Some(phase) = self.registry.phase_mut(previous_action) {
                phase.reset();
            }
            let timeline = self
                .registry
                .action(status.action_index)
                .map(|a| (a.durations(), a.cooldown()));
            if let Some((durations, cooldown)) = timeline
                && let Some(phase) = self.registry.phase_mut(status.action_index)
            {
                phase.init(durations, cooldown);
            }
            if let Some(next) = self.registry.action_mut(status.action_index) {
                next.on_enter(&mut status, &ctx);
            }
            observer.on_action_change(previous_action, status.action_index);
        }

        // 5. Process: state first, then the running action on top.
        let state_mode = self
            .registry
            .state(status.state_index)
            .and_then(|s| s.root_motion());
        if let Some(state) = self.registry.state_mut(status.state_index) {
            state.process(&mut status, &ctx);
        }
        let mut action_mode = None;
        if self
            .registry
            .phase(status.action_index)
            .is_some_and(|p| p.is_running())
        {
            action_mode = self
                .registry
                .action(status.action_index)
                .and_then(|a| a.root_motion());
            if let Some(action) = self.registry.action_mut(status.action_index) {
                action.process(&mut status, &ctx);
            }
        }
        if let (Some(mode), Some(delta)) = (action_mode.or(state_mode), ctx.root_motion) {
            let lin = &mut status.components.linear;
            lin.velocity = apply_root_motion(mode, lin.velocity, &delta, 1.0, dt);
        }
        status.phase_flag = self
            .registry
            .phase(status.action_index)
            .map_or(0, |p| p.phase().flag());

        // 6. Referential fold-in → drag → integration.
        let up = safe_normalize(-self.config.gravity, Vec3::Y);
        let start = status.components.linear.position;
        {
            let (ref_velocity, ref_accel) = referential_from_surfaces(&status.components, start)
                .unwrap_or_else(|| referential_from_force(ctx.external_force, ctx.mass));
            let drag_coeff = probe_override
                .as_ref()
                .map_or(self.config.drag_coeff, |o| o.drag);

            let lin = &mut status.components.linear;
            lin.referential_velocity = ref_velocity;
            lin.referential_acceleration = ref_accel;
            let drag = drag_acceleration(lin.velocity, ref_velocity, drag_coeff, ctx.mass);

            // Referential acceleration and drag fold into this step only;
            // the stored acceleration stays behavior-owned.
            let base_accel = lin.acceleration;
            lin.acceleration = base_accel + ref_accel + drag;
            integrate_linear(lin, dt, ctx.external_force);
            lin.acceleration = base_accel;
        }
        integrate_angular(
            &mut status.components.angular,
            dt,
            self.config.align_to_gravity.then_some(up),
        );

        // 7. Collision resolution of the attempted displacement.
        self.resolve_movement(&mut status, start);

        // 8. Post-move bookkeeping and commit.
        let frame = EvalFrame::from_status(&status);
        for watcher in &mut self.watchers {
            if let Some(event) = watcher.poll(&status, &frame, Some(&self.query)) {
                observer.on_surface_event(&event);
            }
        }
        for event in status.events.drain(..) {
            observer.on_traversal_event(&event.name, &event.transforms);
        }
        if status.phase_flag != self.status.phase_flag {
            let phase = self
                .registry
                .phase(status.action_index)
                .map_or(ActionPhase::Undetermined, |p| p.phase());
            observer.on_phase_change(status.action_index, phase);
        }
        self.status = status;
        observer.on_tick_end(&self.status);
    }

    // ── Stage 2: pre-move probe ───────────────────────────────────────────

    /// Rebuild the surface list and active-surface set from geometry.
    fn probe_surfaces(
        &mut self,
        status: &mut ControllerStatus,
        probe_override: Option<&ProbeOverride>,
        dt: f32,
    ) {
        let position = status.components.linear.position;
        let rotation = status.components.angular.orientation;
        let down = safe_normalize(self.config.gravity, Vec3::NEG_Y);
        let direction = probe_override
            .map(|o| o.direction)
            .filter(|d| d.length_squared() > DEGENERATE_EPSILON)
            .map_or(down, |d| d.normalize());

        let mut surfaces: Vec<Surface> = Vec::new();
        let mut live: Vec<CollidableId> = Vec::new();

        let mut push_contact = |id: CollidableId,
                                point: Vec3,
                                normal: Vec3,
                                impact: Vec3,
                                properties: PhysicalProperties,
                                pose: Pose,
                                tracker: &mut SurfaceTracker| {
            if live.contains(&id) {
                return;
            }
            if !point.is_finite() || !normal.is_finite() {
                warn!(%id, "discarding contact with non-finite geometry");
                tracker.forget(id);
                return;
            }
            let measured = tracker.observe(id, None, pose, dt);
            let mut surface = Surface::new(id, point, normal);
            surface.impact_normal = impact;
            surface.properties = properties;
            surface.socket_pose = pose;
            surface.linear_velocity = measured.linear;
            surface.angular_velocity = measured.angular;
            live.push(id);
            surfaces.push(surface);
        };

        for hit in self.query.sweep_multi(
            &self.config.shape,
            position,
            rotation,
            direction * self.config.probe_distance,
            self.config.probe_inflation,
        ) {
            push_contact(
                hit.collidable,
                hit.point,
                hit.normal,
                hit.impact_normal,
                hit.properties,
                hit.collidable_pose,
                &mut self.tracker,
            );
        }
        for overlap in self.query.overlap_multi(&self.config.shape, position, rotation) {
            push_contact(
                overlap.collidable,
                overlap.point,
                overlap.normal,
                overlap.normal,
                overlap.properties,
                overlap.collidable_pose,
                &mut self.tracker,
            );
        }

        self.tracker.retain_live(&live);

        // Active set, recomputed from scratch: steppable contacts whose
        // normal is within the configured slope of up.
        let up = safe_normalize(-self.config.gravity, Vec3::Y);
        let mut active = ActiveSurfaces::NONE;
        for (i, surface) in surfaces.iter().enumerate() {
            if surface.is_steppable()
                && angle_between_deg(surface.contact_normal, up) <= self.config.ground_slope_deg
            {
                active.set(i);
            }
        }

        status.components.surfaces = surfaces;
        status.components.active_surfaces = active;
    }

    // ── Stage 7: collision resolution ─────────────────────────────────────

    fn resolve_movement(&mut self, status: &mut ControllerStatus, start: Vec3) {
        let attempted = status.components.linear.position - start;
        if attempted.length() <= self.config.slide.min_distance {
            return;
        }
        let rotation = status.components.angular.orientation;
        let Some(hit) = self
            .query
            .sweep(&self.config.shape, start, rotation, attempted, 0.0)
        else {
            status.components.last_sweep = None;
            return;
        };

        let result = resolve_slide(
            &self.query,
            &self.config.shape,
            rotation,
            start,
            attempted,
            &hit,
            &self.config.slide,
        );
        status.components.linear.position = result.position;

        if result.outcome == SlideOutcome::Stuck {
            let penetrations: Vec<Penetration> = status
                .components
                .surfaces
                .iter()
                .filter(|s| s.tracked)
                .filter_map(|s| {
                    self.query.compute_penetration(
                        &self.config.shape,
                        result.position,
                        rotation,
                        s.collidable,
                    )
                })
                .collect();
            let offset = depenetration_offset(&penetrations);
            debug!(?offset, "stuck after slide, depenetrating and zeroing velocity");
            status.components.linear.position += offset;
            status.components.linear.velocity = Vec3::ZERO;
        }
        status.components.last_sweep = result.last_hit;
    }
}
