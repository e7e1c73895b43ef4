//! Physical properties of a touched collidable.

use std::fmt;

// ── CollisionResponse ─────────────────────────────────────────────────────────

/// How the external backend answers queries against a collidable.
///
/// Mirrors the query-response kind reported with every hit: `Block` stops
/// sweeps, `Overlap` is detected but not solid, `Ignore` is invisible to the
/// agent's probes (but may still be reported by broad overlap queries).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionResponse {
    #[default]
    Block,
    Overlap,
    Ignore,
}

impl CollisionResponse {
    /// `true` if sweeps stop against this collidable.
    #[inline]
    pub fn is_blocking(self) -> bool {
        matches!(self, CollisionResponse::Block)
    }
}

impl fmt::Display for CollisionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CollisionResponse::Block   => "block",
            CollisionResponse::Overlap => "overlap",
            CollisionResponse::Ignore  => "ignore",
        };
        f.write_str(s)
    }
}

// ── PhysicalProperties ────────────────────────────────────────────────────────

/// The packed per-collidable property vector reported with every hit.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalProperties {
    /// Surface friction coefficient.  Weights the surface's contribution to
    /// the agent's referential velocity; 0 means the agent slips freely.
    pub friction: f32,

    /// Restitution (bounciness) in `[0, 1]`.
    pub restitution: f32,

    /// Query-response kind of the collidable.
    pub response: CollisionResponse,

    /// `true` if the agent may treat this collidable as standable ground.
    pub can_step_on: bool,
}

impl Default for PhysicalProperties {
    fn default() -> Self {
        Self {
            friction:    1.0,
            restitution: 0.0,
            response:    CollisionResponse::Block,
            can_step_on: true,
        }
    }
}

impl PhysicalProperties {
    /// A frictionless, non-steppable blocker (e.g. a slick wall).
    pub fn slick_wall() -> Self {
        Self {
            friction:    0.0,
            restitution: 0.0,
            response:    CollisionResponse::Block,
            can_step_on: false,
        }
    }
}
