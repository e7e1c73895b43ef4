//! Analytic per-axis motion integration.
//!
//! # Design
//!
//! Integration is closed-form (`x = x0 + v0 t + ½ a t²`, `v = v0 + a t`)
//! rather than sub-stepped.  That keeps the per-tick contract deterministic
//! and cheap at the cost of not resolving mid-step collisions — those are
//! the slide resolver's job, applied against the *intended* endpoint after
//! this integration.

use glam::{Quat, Vec3};
use tracing::debug;

use kcm_core::math::{sanitize_vec3, DEGENERATE_EPSILON};
use kcm_kinematics::{AngularKinematic, KinematicComponents, LinearKinematic};

// ── Drag ──────────────────────────────────────────────────────────────────────

/// Drag as an acceleration opposing the velocity *relative to the
/// referential frame*, scaled by the squared relative speed and inversely
/// by mass.
///
/// An agent standing still on a moving platform has zero relative speed and
/// feels no drag; the same agent sprinting against the platform's motion
/// feels it quadratically.
pub fn drag_acceleration(
    velocity: Vec3,
    referential_velocity: Vec3,
    drag_coeff: f32,
    mass: f32,
) -> Vec3 {
    let relative = velocity - referential_velocity;
    let speed_sq = relative.length_squared();
    if speed_sq <= DEGENERATE_EPSILON || mass <= DEGENERATE_EPSILON {
        return Vec3::ZERO;
    }
    // -normalize(relative) * coeff * speed² / mass, with one sqrt.
    -relative * (drag_coeff * speed_sq.sqrt() / mass)
}

// ── Referential frame ─────────────────────────────────────────────────────────

/// Referential velocity/acceleration from the active contact surfaces,
/// weighted by their friction.
///
/// `None` when no surface is active — the caller falls back to
/// [`referential_from_force`].  Frictionless active surfaces degrade to a
/// uniform average rather than a division by zero.
pub fn referential_from_surfaces(
    components: &KinematicComponents,
    at: Vec3,
) -> Option<(Vec3, Vec3)> {
    let mut velocity = Vec3::ZERO;
    let mut accel = Vec3::ZERO;
    let mut weight_sum = 0.0;
    let mut count = 0u32;

    for (_, surface) in components.active_iter() {
        let w = surface.properties.friction.max(0.0);
        velocity += surface.velocity_at(at) * w;
        accel += surface.acceleration_at(at) * w;
        weight_sum += w;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    if weight_sum <= DEGENERATE_EPSILON {
        let mut velocity = Vec3::ZERO;
        let mut accel = Vec3::ZERO;
        for (_, surface) in components.active_iter() {
            velocity += surface.velocity_at(at);
            accel += surface.acceleration_at(at);
        }
        let n = count as f32;
        return Some((velocity / n, accel / n));
    }
    Some((velocity / weight_sum, accel / weight_sum))
}

/// The no-surface referential fallback: the medium does not move, but raw
/// external forces (gravity, wind) still accelerate the frame contents.
pub fn referential_from_force(force: Vec3, mass: f32) -> (Vec3, Vec3) {
    if mass <= DEGENERATE_EPSILON {
        return (Vec3::ZERO, Vec3::ZERO);
    }
    (Vec3::ZERO, force / mass)
}

// ── Snap displacement ─────────────────────────────────────────────────────────

/// Consume the pending snap displacement and apply it straight to position.
///
/// The snap is **vetoed** (discarded) when it points against the external
/// force: snapping down to ground while gravity has been flipped upward
/// would fight the force that is about to peel the agent off the surface.
pub fn apply_snap(lin: &mut LinearKinematic, external_force: Vec3) {
    let snap = lin.take_snap();
    if snap.length_squared() <= DEGENERATE_EPSILON {
        return;
    }
    if external_force.length_squared() > DEGENERATE_EPSILON
        && snap.dot(external_force.normalize()) < 0.0
    {
        debug!(?snap, "snap displacement vetoed, opposes external force");
        return;
    }
    lin.position += snap;
}

// ── Linear integration ────────────────────────────────────────────────────────

/// Advance the linear condition by one analytic step.
///
/// In order: blend the velocity toward each composite-movement target,
/// sanitize non-finite kinematic inputs to zero, apply the pending snap
/// displacement, then integrate position and velocity in closed form.
pub fn integrate_linear(lin: &mut LinearKinematic, dt: f32, external_force: Vec3) {
    let mut velocity = lin.velocity;
    for composite in &lin.composites {
        velocity = composite.blend(velocity, dt);
    }
    lin.velocity = velocity;

    // NaN must be caught before integration, never propagated through it.
    lin.velocity = sanitize_vec3(lin.velocity, "velocity");
    lin.acceleration = sanitize_vec3(lin.acceleration, "acceleration");

    apply_snap(lin, external_force);

    lin.position += lin.velocity * dt + lin.acceleration * (0.5 * dt * dt);
    lin.velocity += lin.acceleration * dt;
}

/// The initial velocity that reaches `to` from `from` in `dt` under
/// constant `accel` — the inverse of the position half of
/// [`integrate_linear`].
pub fn velocity_to_reach(from: Vec3, to: Vec3, accel: Vec3, dt: f32) -> Vec3 {
    if dt <= DEGENERATE_EPSILON {
        return Vec3::ZERO;
    }
    (to - from - accel * (0.5 * dt * dt)) / dt
}

// ── Angular integration ───────────────────────────────────────────────────────

/// Advance the angular condition by one step.
///
/// Advances the rotation speed by the angular acceleration, applies the
/// axis-angle delta as a rotor, re-normalizes, and — while `align_up` is
/// set — projects the up component out of both angular rates.
pub fn integrate_angular(ang: &mut AngularKinematic, dt: f32, align_up: Option<Vec3>) {
    ang.rotation_speed = sanitize_vec3(ang.rotation_speed, "rotation_speed");
    ang.angular_acceleration = sanitize_vec3(ang.angular_acceleration, "angular_acceleration");

    ang.rotation_speed += ang.angular_acceleration * dt;

    let delta = Quat::from_scaled_axis(ang.rotation_speed.to_radians() * dt);
    ang.orientation = delta * ang.orientation;
    ang.renormalize();

    if let Some(up) = align_up {
        ang.project_out_up(up);
    }
}

// ── Small helpers ─────────────────────────────────────────────────────────────

trait ToRadians {
    fn to_radians(self) -> Vec3;
}

impl ToRadians for Vec3 {
    #[inline]
    fn to_radians(self) -> Vec3 {
        self * (std::f32::consts::PI / 180.0)
    }
}
