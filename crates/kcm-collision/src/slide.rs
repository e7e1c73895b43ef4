//! Iterative two-surface slide resolution.
//!
//! # Design
//!
//! Given an attempted displacement and the first blocking hit, slide along
//! the obstruction instead of stopping dead, handling the two-wall
//! (corner/crevice) case by moving along the crease between both surfaces.
//! The loop is an explicit worklist with a fixed depth bound — no recursion,
//! no by-reference depth counter — and the result distinguishes *resolved*,
//! *resolved at the depth limit*, and *stuck* rather than coercing all three
//! to a position value.
//!
//! Exceeding the depth limit is best effort ("stop where you are"), never an
//! error; a stuck agent is recovered by the caller via
//! [`depenetration_offset`] plus velocity zeroing.

use glam::{Quat, Vec3};

use kcm_core::math::{project_on_plane, safe_normalize, DEGENERATE_EPSILON, DIRECTION_EPSILON};

use crate::query::{CollisionQuery, Penetration, SweepHit};
use crate::Shape;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Tuning for one slide resolution.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlideConfig {
    /// Maximum number of slide iterations.  Callers must choose ≥ 1; the
    /// pipeline builder enforces this.
    pub max_depth: u32,

    /// Displacements shorter than this are treated as "no movement".
    pub min_distance: f32,

    /// Gap kept between the shape and any surface it stops against.
    pub skin: f32,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            max_depth:    3,
            min_distance: 1e-4,
            skin:         1e-3,
        }
    }
}

// ── Result ────────────────────────────────────────────────────────────────────

/// How a slide resolution terminated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlideOutcome {
    /// The displacement was fully consumed or sliding stopped making
    /// progress in the intended direction.
    Resolved,

    /// The depth bound was hit; `position` is the last valid sweep position.
    DepthLimited,

    /// The agent started penetrating and sliding produced no meaningful
    /// movement.  The caller should depenetrate and zero velocity.
    Stuck,
}

/// The corrected end state of a slide resolution.
#[derive(Debug, Clone)]
pub struct SlideResult {
    /// Corrected shape-center end position.
    pub position: Vec3,

    /// Displacement that could not be consumed when iteration stopped.
    pub remaining: Vec3,

    pub outcome: SlideOutcome,

    /// Iterations actually used (1-based; 0 only if `max_depth` was 0).
    pub depth_used: u32,

    /// The last surface swept against.
    pub last_hit: Option<SweepHit>,
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Resolve `attempted` displacement from `start` against `first_hit`.
///
/// `first_hit` must be the blocking hit returned by sweeping `attempted`
/// from `start` (the caller has already paid for that sweep).  All further
/// sweeps use the same `shape`/`rotation` with zero inflation.
pub fn resolve_slide(
    query:     &dyn CollisionQuery,
    shape:     &Shape,
    rotation:  Quat,
    start:     Vec3,
    attempted: Vec3,
    first_hit: &SweepHit,
    config:    &SlideConfig,
) -> SlideResult {
    let original_dir = safe_normalize(attempted, Vec3::ZERO);

    // Advance to the first contact, held off by the skin.
    let consumed = (first_hit.distance - config.skin).max(0.0);
    let mut position  = start + original_dir * consumed;
    let mut remaining = attempted - original_dir * consumed;
    let mut normal    = safe_normalize(first_hit.normal, -original_dir);
    let mut last_hit  = first_hit.clone();

    let mut outcome    = SlideOutcome::DepthLimited;
    let mut depth_used = 0;

    for depth in 1..=config.max_depth {
        depth_used = depth;

        // Slide vector: the attempted motion flattened onto the obstruction.
        let slide = project_on_plane(remaining, normal);
        if slide.length() < config.min_distance
            || slide.dot(original_dir) <= DIRECTION_EPSILON
        {
            remaining = Vec3::ZERO;
            outcome = SlideOutcome::Resolved;
            break;
        }

        match query.sweep(shape, position, rotation, slide, 0.0) {
            None => {
                position += slide;
                remaining = Vec3::ZERO;
                outcome = SlideOutcome::Resolved;
                break;
            }
            Some(hit) => {
                let slide_dir = slide / slide.length();
                let step = (hit.distance - config.skin).max(0.0);
                position += slide_dir * step;

                let crease = normal.cross(hit.normal);
                if crease.length_squared() <= DEGENERATE_EPSILON {
                    // (Near-)parallel surfaces: keep sliding along the new one.
                    remaining = slide - slide_dir * step;
                    normal = hit.normal;
                    last_hit = hit;
                    continue;
                }

                // Two-wall case: the only free direction is the crease
                // between both surfaces.  Project the *original* displacement
                // onto it, not the already-clipped remainder.
                let crease = crease.normalize();
                let adjusted = crease * attempted.dot(crease);
                last_hit = hit.clone();

                if adjusted.length() < config.min_distance
                    || adjusted.dot(original_dir) <= DIRECTION_EPSILON
                {
                    remaining = Vec3::ZERO;
                    outcome = SlideOutcome::Resolved;
                    break;
                }

                remaining = adjusted;
                normal = hit.normal;
            }
        }
    }

    // Stuck protection: started penetrating and sliding went nowhere.
    if first_hit.start_penetrating && (position - start).length() < config.min_distance {
        outcome = SlideOutcome::Stuck;
    }

    SlideResult {
        position,
        remaining,
        outcome,
        depth_used,
        last_hit: Some(last_hit),
    }
}

/// Accumulated de-penetration vector over every currently-tracked surface.
///
/// Each entry contributes its penetration depth along its separation normal.
/// The caller applies the sum to position and zeroes velocity.
pub fn depenetration_offset(penetrations: &[Penetration]) -> Vec3 {
    penetrations
        .iter()
        .fold(Vec3::ZERO, |acc, p| acc + p.direction * p.distance.max(0.0))
}
