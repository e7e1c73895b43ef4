//! Aggregated kinematic components and the active-surface bit-set.

use kcm_collision::SweepHit;
use kcm_surface::Surface;

use crate::{AngularKinematic, LinearKinematic};

// ── ActiveSurfaces ────────────────────────────────────────────────────────────

/// Bit-set selecting which touched surfaces are "active" for this tick's
/// force/velocity aggregation.
///
/// A `u64` is plenty: an agent touching more than 64 collidables at once is
/// outside anything the probe volume can produce.  The set is **recomputed
/// from scratch every tick** from geometry — never incrementally mutated —
/// and bits beyond the surface list's length are ignored by all consumers,
/// so an empty or invalid set simply reads as "no ground".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSurfaces(pub u64);

impl ActiveSurfaces {
    pub const NONE: ActiveSurfaces = ActiveSurfaces(0);

    #[inline]
    pub fn set(&mut self, index: usize) {
        if index < 64 {
            self.0 |= 1 << index;
        }
    }

    #[inline]
    pub fn contains(self, index: usize) -> bool {
        index < 64 && self.0 & (1 << index) != 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Indices of set bits, ascending.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..64).filter(move |&i| self.contains(i))
    }
}

// ── KinematicComponents ───────────────────────────────────────────────────────

/// Everything the motion stages need about the agent's physical condition.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicComponents {
    pub linear:  LinearKinematic,
    pub angular: AngularKinematic,

    /// Currently-touched surfaces, in backend report order.
    pub surfaces: Vec<Surface>,

    /// Which of `surfaces` participate in this tick's referential
    /// aggregation.  Recomputed every tick.
    pub active_surfaces: ActiveSurfaces,

    /// The last collision-sweep result of the move phase, if any.
    pub last_sweep: Option<SweepHit>,
}

impl KinematicComponents {
    /// Active surfaces, bounds-checked: out-of-range bits yield nothing.
    pub fn active_iter(&self) -> impl Iterator<Item = (usize, &Surface)> {
        self.surfaces
            .iter()
            .enumerate()
            .filter(|(i, _)| self.active_surfaces.contains(*i))
    }

    /// `true` when at least one in-bounds surface is active.
    pub fn has_active(&self) -> bool {
        self.active_iter().next().is_some()
    }

    /// The first active surface, by convention the primary ground contact.
    pub fn primary_surface(&self) -> Option<&Surface> {
        self.active_iter().next().map(|(_, s)| s)
    }
}
