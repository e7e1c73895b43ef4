//! Degeneracy-safe vector helpers and NaN guards.
//!
//! # Design
//!
//! Geometric degeneracy (zero-length normals, NaN from upstream queries) is
//! never a hard failure at this layer: every helper falls back to a safe
//! default axis or zeroes the offending component and emits a recoverable
//! `tracing::warn!`.  The worst visible symptom is an agent holding still or
//! sliding imperfectly for one tick.

use glam::{Quat, Vec3};
use tracing::warn;

/// Squared length below which a vector is treated as zero.
pub const DEGENERATE_EPSILON: f32 = 1e-8;

/// Dot-product tolerance for "points in the same direction" tests.
pub const DIRECTION_EPSILON: f32 = 1e-4;

// ── Safe normalization ────────────────────────────────────────────────────────

/// Normalize `v`, falling back to `fallback` when `v` is (near) zero length.
///
/// The fallback path warns once per call site occurrence; it indicates the
/// caller fed degenerate geometry (e.g. a zero hit normal) upstream.
pub fn safe_normalize(v: Vec3, fallback: Vec3) -> Vec3 {
    if v.length_squared() > DEGENERATE_EPSILON {
        v.normalize()
    } else {
        warn!(?v, ?fallback, "normalizing degenerate vector, using fallback axis");
        fallback
    }
}

/// Build an orthonormal tangent/bitangent pair for `normal`.
///
/// `normal` need not be unit length; a degenerate input falls back to the
/// world axes `(X, Z)`.
pub fn orthonormal_basis(normal: Vec3) -> (Vec3, Vec3) {
    let n = safe_normalize(normal, Vec3::Y);
    // Pick the world axis least aligned with n to avoid a degenerate cross.
    let helper = if n.x.abs() < 0.9 { Vec3::X } else { Vec3::Z };
    let tangent = safe_normalize(n.cross(helper), Vec3::X);
    let bitangent = n.cross(tangent);
    (tangent, bitangent)
}

// ── Projections ───────────────────────────────────────────────────────────────

/// Project `v` onto the plane with unit normal `normal`.
#[inline]
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    v - normal * v.dot(normal)
}

/// Component of `v` along the (unit) `up` axis.
#[inline]
pub fn vertical_part(v: Vec3, up: Vec3) -> Vec3 {
    up * v.dot(up)
}

/// Component of `v` perpendicular to the (unit) `up` axis.
#[inline]
pub fn horizontal_part(v: Vec3, up: Vec3) -> Vec3 {
    v - vertical_part(v, up)
}

/// Angle between two vectors in degrees; `0` when either is degenerate.
pub fn angle_between_deg(a: Vec3, b: Vec3) -> f32 {
    if a.length_squared() <= DEGENERATE_EPSILON || b.length_squared() <= DEGENERATE_EPSILON {
        return 0.0;
    }
    let cos = (a.dot(b) / (a.length() * b.length())).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

// ── NaN guards ────────────────────────────────────────────────────────────────

/// Replace non-finite components of `v` with zero.
///
/// `label` names the quantity for the warning (e.g. `"velocity"`).  The
/// numeric-stability invariant requires catching NaN *before* integration, so
/// the integrator calls this on every kinematic input.
pub fn sanitize_vec3(v: Vec3, label: &str) -> Vec3 {
    if v.is_finite() {
        return v;
    }
    warn!(?v, label, "non-finite vector sanitized to finite components");
    Vec3::new(
        if v.x.is_finite() { v.x } else { 0.0 },
        if v.y.is_finite() { v.y } else { 0.0 },
        if v.z.is_finite() { v.z } else { 0.0 },
    )
}

/// Replace a non-finite or non-normalizable rotation with identity.
pub fn sanitize_quat(q: Quat, label: &str) -> Quat {
    if q.is_finite() && q.length_squared() > DEGENERATE_EPSILON {
        q.normalize()
    } else {
        warn!(label, "non-finite rotation sanitized to identity");
        Quat::IDENTITY
    }
}

// ── Interpolation ─────────────────────────────────────────────────────────────

/// Linear interpolation with the factor clamped to `[0, 1]`.
#[inline]
pub fn lerp_clamped(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from + (to - from) * t.clamp(0.0, 1.0)
}
