//! Validated pipeline construction.

use glam::Vec3;

use kcm_behavior::{ActionBehavior, BehaviorRegistry, StateBehavior};
use kcm_collision::{CollisionQuery, Shape, SlideConfig};
use kcm_condition::SurfaceEventWatcher;
use kcm_kinematics::ControllerStatus;
use kcm_surface::SurfaceTracker;

use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::{ControllerPipeline, PipelineConfig};

/// Assembles a [`ControllerPipeline`], validating the configuration before
/// any tick can run.
///
/// ```no_run
/// # use kcm_pipeline::PipelineBuilder;
/// # use kcm_collision::PlaneWorldBuilder;
/// let world = PlaneWorldBuilder::new().build();
/// let pipeline = PipelineBuilder::new()
///     .mass(80.0)
///     .drag(0.02)
///     .build(world)
///     .unwrap();
/// # let _ = pipeline;
/// ```
#[derive(Default)]
pub struct PipelineBuilder {
    config:   PipelineConfig,
    registry: BehaviorRegistry,
    watchers: Vec<SurfaceEventWatcher>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Configuration ─────────────────────────────────────────────────────

    pub fn shape(mut self, shape: Shape) -> Self {
        self.config.shape = shape;
        self
    }

    pub fn mass(mut self, mass: f32) -> Self {
        self.config.mass = mass;
        self
    }

    pub fn gravity(mut self, gravity: Vec3) -> Self {
        self.config.gravity = gravity;
        self
    }

    pub fn drag(mut self, coeff: f32) -> Self {
        self.config.drag_coeff = coeff;
        self
    }

    pub fn probe(mut self, distance: f32, inflation: f32) -> Self {
        self.config.probe_distance = distance;
        self.config.probe_inflation = inflation;
        self
    }

    pub fn ground_slope_deg(mut self, degrees: f32) -> Self {
        self.config.ground_slope_deg = degrees;
        self
    }

    pub fn align_to_gravity(mut self, align: bool) -> Self {
        self.config.align_to_gravity = align;
        self
    }

    pub fn slide(mut self, slide: SlideConfig) -> Self {
        self.config.slide = slide;
        self
    }

    // ── Behaviors & watchers ──────────────────────────────────────────────

    pub fn with_state(mut self, behavior: Box<dyn StateBehavior>) -> PipelineResult<Self> {
        let name = behavior.name().to_owned();
        if !self.registry.add_state(behavior) {
            return Err(PipelineError::DuplicateBehavior(name));
        }
        Ok(self)
    }

    pub fn with_action(mut self, behavior: Box<dyn ActionBehavior>) -> PipelineResult<Self> {
        let name = behavior.name().to_owned();
        if !self.registry.add_action(behavior) {
            return Err(PipelineError::DuplicateBehavior(name));
        }
        Ok(self)
    }

    pub fn with_watcher(mut self, watcher: SurfaceEventWatcher) -> Self {
        self.watchers.push(watcher);
        self
    }

    // ── Build ─────────────────────────────────────────────────────────────

    pub fn build<Q: CollisionQuery>(self, query: Q) -> PipelineResult<ControllerPipeline<Q>> {
        if self.config.slide.max_depth < 1 {
            return Err(PipelineError::InvalidSlideDepth(self.config.slide.max_depth));
        }
        if !self.config.shape.is_valid() {
            return Err(PipelineError::Config("degenerate collision shape".into()));
        }
        if !self.config.mass.is_finite() || self.config.mass <= 0.0 {
            return Err(PipelineError::Config(format!(
                "mass must be finite and positive, got {}",
                self.config.mass
            )));
        }
        if !self.config.drag_coeff.is_finite() || self.config.drag_coeff < 0.0 {
            return Err(PipelineError::Config(format!(
                "drag coefficient must be finite and non-negative, got {}",
                self.config.drag_coeff
            )));
        }
        if !self.config.gravity.is_finite() {
            return Err(PipelineError::Config("gravity must be finite".into()));
        }

        Ok(ControllerPipeline {
            query,
            registry: self.registry,
            status:   ControllerStatus::default(),
            tracker:  SurfaceTracker::new(),
            watchers: self.watchers,
            config:   self.config,
        })
    }
}
