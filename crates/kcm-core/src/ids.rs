//! Strongly typed identifier wrappers.
//!
//! `CollidableId` is a stable integer handle standing in for a reference to a
//! collidable owned by the external physics engine.  The collision backend
//! issues them; the engine only compares and hashes them, so the inner
//! integer is opaque.
//!
//! `BehaviorIndex` is the index of a behavior in the sorted registry, with
//! `-1` as the replicated "none" sentinel.  It is signed on purpose: the
//! value travels through status snapshots and the sentinel must round-trip
//! exactly.

use std::fmt;

// ── CollidableId ──────────────────────────────────────────────────────────────

/// Stable handle to a collidable owned by the external collision backend.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollidableId(pub u64);

impl CollidableId {
    /// Sentinel meaning "no collidable".
    pub const INVALID: CollidableId = CollidableId(u64::MAX);

    #[inline(always)]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for CollidableId {
    /// Returns the `INVALID` sentinel so uninitialized ids are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for CollidableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CollidableId({})", self.0)
    }
}

// ── BehaviorIndex ─────────────────────────────────────────────────────────────

/// Index of a behavior in the sorted registry.
///
/// `NONE` (`-1`) means "no state selected" / "no action selected" and is the
/// value consumers see after a failed lookup — registry lookups are nullable,
/// never panicking.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorIndex(pub i32);

impl BehaviorIndex {
    /// The "no behavior" sentinel.
    pub const NONE: BehaviorIndex = BehaviorIndex(-1);

    /// Wrap a registry position.
    #[inline(always)]
    pub fn from_usize(i: usize) -> Self {
        BehaviorIndex(i as i32)
    }

    /// Convert to a `Vec` index; `None` for the sentinel (or any negative).
    #[inline(always)]
    pub fn index(self) -> Option<usize> {
        (self.0 >= 0).then_some(self.0 as usize)
    }

    #[inline(always)]
    pub fn is_none(self) -> bool {
        self.0 < 0
    }

    #[inline(always)]
    pub fn is_some(self) -> bool {
        self.0 >= 0
    }
}

impl Default for BehaviorIndex {
    /// Returns `NONE` so uninitialized indices are visibly unselected.
    #[inline(always)]
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for BehaviorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "BehaviorIndex(none)")
        } else {
            write!(f, "BehaviorIndex({})", self.0)
        }
    }
}
