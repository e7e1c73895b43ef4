//! The declarative surface-condition predicate engine.

use glam::{Quat, Vec3};

use kcm_collision::{CollisionQuery, Shape};
use kcm_core::math::{angle_between_deg, horizontal_part, safe_normalize};
use kcm_core::CollisionResponse;
use kcm_kinematics::ControllerStatus;
use kcm_surface::Surface;

use crate::ScalarRange;

// ── EvalFrame ─────────────────────────────────────────────────────────────────

/// Agent-side quantities a condition is evaluated against.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvalFrame {
    pub position:    Vec3,
    pub orientation: Quat,
    pub up:          Vec3,
    pub velocity:    Vec3,
}

impl EvalFrame {
    /// Build the frame from a controller status.
    pub fn from_status(status: &ControllerStatus) -> Self {
        let c = &status.components;
        Self {
            position:    c.linear.position,
            orientation: c.angular.orientation,
            up:          c.angular.up(),
            velocity:    c.linear.velocity,
        }
    }

    fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }
}

// ── DepthProbe ────────────────────────────────────────────────────────────────

/// Optional obstruction-thickness sub-check (the "can I vault this" test).
///
/// The probe sweeps `shape` from `reach` past the surface back toward the
/// contact, along the horizontal into-surface direction.  The distance from
/// the far end back to the first hit gives the obstruction's thickness; the
/// check passes when that thickness is at most `max_depth`.  A configured
/// probe with no query backend available fails closed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepthProbe {
    pub shape: Shape,

    /// How far past the contact point to start the back-sweep.
    pub reach: f32,

    /// Maximum obstruction thickness that still passes.
    pub max_depth: f32,
}

impl DepthProbe {
    fn passes(&self, surface: &Surface, frame: &EvalFrame, query: &dyn CollisionQuery) -> bool {
        // Into-surface direction, horizontal.
        let into = safe_normalize(
            horizontal_part(-surface.contact_normal, frame.up),
            frame.forward(),
        );
        let start = surface.contact_point + into * self.reach;
        match query.sweep(&self.shape, start, frame.orientation, -into * self.reach, 0.0) {
            Some(hit) => self.reach - hit.distance <= self.max_depth,
            // Nothing on the back-sweep: the obstruction is thinner than
            // the probe resolution.
            None => true,
        }
    }
}

// ── SurfaceCondition ──────────────────────────────────────────────────────────

/// A declarative predicate over the agent's touched surfaces.
///
/// Every numeric test is a [`ScalarRange`] and disabled by default; a
/// default condition therefore accepts any tracked, blocking surface.  The
/// same predicate engine serves state checks ("is there climbable ground")
/// and the generic event watchers.
///
/// # Evaluation order
///
/// Tests run in a fixed order per surface, cheapest first:
/// response kind, stepability, height, normal angle, impact angle, planar
/// offset ratio, orientation angle, depth probe, linear speed,
/// orientation-aligned speed, surface speed, cosmetic ranges.  The first
/// failing test moves on to the next active surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceCondition {
    /// Required collision-response kind of the surface.
    pub response: CollisionResponse,

    /// Require `can_step_on` on the surface's properties.
    pub require_steppable: bool,

    /// Contact-point height relative to the agent position, along `up`.
    pub height: ScalarRange,

    /// Angle between the contact normal and `up`, degrees.
    pub normal_angle: ScalarRange,

    /// Angle between the impact normal and `up`, degrees.
    pub impact_angle: ScalarRange,

    /// Horizontal share of the agent→contact offset, `0` (directly
    /// above/below) to `1` (level with the agent).
    pub offset_ratio: ScalarRange,

    /// Angle between the agent's horizontal forward axis and the horizontal
    /// direction toward the contact point, degrees.
    pub orientation_angle: ScalarRange,

    /// Optional obstruction-thickness sub-check.
    pub depth_probe: Option<DepthProbe>,

    /// Agent linear speed.
    pub speed: ScalarRange,

    /// Signed agent speed along the forward axis.
    pub oriented_speed: ScalarRange,

    /// Speed of the surface itself at the contact point.
    pub surface_speed: ScalarRange,

    /// Named cosmetic-variable ranges; an unset cosmetic reads `0.0`.
    pub cosmetic_ranges: Vec<(String, ScalarRange)>,
}

impl Default for SurfaceCondition {
    fn default() -> Self {
        Self {
            response:          CollisionResponse::Block,
            require_steppable: false,
            height:            ScalarRange::DISABLED,
            normal_angle:      ScalarRange::DISABLED,
            impact_angle:      ScalarRange::DISABLED,
            offset_ratio:      ScalarRange::DISABLED,
            orientation_angle: ScalarRange::DISABLED,
            depth_probe:       None,
            speed:             ScalarRange::DISABLED,
            oriented_speed:    ScalarRange::DISABLED,
            surface_speed:     ScalarRange::DISABLED,
            cosmetic_ranges:   Vec::new(),
        }
    }
}

impl SurfaceCondition {
    /// A condition accepting any steppable surface whose normal is within
    /// `max_slope_deg` of `up` — the usual "is this ground" shape.
    pub fn steppable_ground(max_slope_deg: f32) -> Self {
        Self {
            require_steppable: true,
            normal_angle:      ScalarRange::at_most(max_slope_deg),
            ..Default::default()
        }
    }

    /// Evaluate the condition against the status' **active** surfaces.
    ///
    /// Returns the index (into `components.surfaces`) of the first active
    /// surface passing every enabled test, or `None` when no surface
    /// matches.
    pub fn evaluate(
        &self,
        status: &ControllerStatus,
        frame: &EvalFrame,
        query: Option<&dyn CollisionQuery>,
    ) -> Option<usize> {
        status
            .components
            .active_iter()
            .find(|(_, surface)| self.matches(surface, status, frame, query))
            .map(|(i, _)| i)
    }

    fn matches(
        &self,
        surface: &Surface,
        status: &ControllerStatus,
        frame: &EvalFrame,
        query: Option<&dyn CollisionQuery>,
    ) -> bool {
        if surface.properties.response != self.response {
            return false;
        }
        if self.require_steppable && !surface.is_steppable() {
            return false;
        }

        let offset = surface.contact_point - frame.position;
        if !self.height.contains(offset.dot(frame.up)) {
            return false;
        }
        if !self.normal_angle.contains(angle_between_deg(surface.contact_normal, frame.up)) {
            return false;
        }
        if !self.impact_angle.contains(angle_between_deg(surface.impact_normal, frame.up)) {
            return false;
        }

        if !self.offset_ratio.is_disabled() {
            let total = offset.length();
            let ratio = if total > 1e-6 {
                horizontal_part(offset, frame.up).length() / total
            } else {
                0.0
            };
            if !self.offset_ratio.contains(ratio) {
                return false;
            }
        }

        if !self.orientation_angle.is_disabled() {
            let heading = horizontal_part(frame.forward(), frame.up);
            let toward = horizontal_part(offset, frame.up);
            if !self.orientation_angle.contains(angle_between_deg(heading, toward)) {
                return false;
            }
        }

        if let Some(probe) = &self.depth_probe {
            match query {
                Some(q) => {
                    if !probe.passes(surface, frame, q) {
                        return false;
                    }
                }
                // A configured probe with no backend fails closed.
                None => {
                    tracing::warn!("depth probe configured but no collision query available");
                    return false;
                }
            }
        }

        if !self.speed.contains(frame.velocity.length()) {
            return false;
        }
        if !self.oriented_speed.contains(frame.velocity.dot(frame.forward())) {
            return false;
        }
        if !self.surface_speed.contains(surface.velocity_at(surface.contact_point).length()) {
            return false;
        }

        self.cosmetic_ranges
            .iter()
            .all(|(name, range)| range.contains(status.cosmetic(name)))
    }
}
