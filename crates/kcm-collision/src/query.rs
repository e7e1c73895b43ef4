//! The collision query facade consumed by the motion pipeline.
//!
//! All queries are synchronous, blocking calls expected to return within the
//! current tick — there is no async suspension point inside the engine.

use glam::{Quat, Vec3};

use kcm_core::{CollidableId, PhysicalProperties, Pose};

use crate::Shape;

// ── Hit types ─────────────────────────────────────────────────────────────────

/// The first blocking contact found by a shape sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepHit {
    /// The collidable that was struck.
    pub collidable: CollidableId,

    /// Distance travelled along the sweep before contact.
    pub distance: f32,

    /// Shape-center position at the moment of contact.
    pub safe_position: Vec3,

    /// Contact point on the struck collidable, world space.
    pub point: Vec3,

    /// Contact normal at the final resting contact.
    pub normal: Vec3,

    /// Normal of the original impact; differs from `normal` on edges.
    pub impact_normal: Vec3,

    /// `true` when the sweep started already intersecting the collidable.
    /// `distance` is zero in that case.
    pub start_penetrating: bool,

    /// Physical properties of the struck collidable.
    pub properties: PhysicalProperties,

    /// The collidable's own pose this tick, so the surface tracker can
    /// measure its velocity without a second backend round-trip.
    pub collidable_pose: Pose,
}

/// One collidable found overlapping the probe volume.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlapHit {
    pub collidable: CollidableId,

    /// Closest point on the collidable to the probe center.
    pub point: Vec3,

    /// Outward normal at `point`.
    pub normal: Vec3,

    pub properties: PhysicalProperties,

    /// The collidable's own pose this tick (see [`SweepHit::collidable_pose`]).
    pub collidable_pose: Pose,
}

/// Minimum translation to separate the shape from one collidable.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Penetration {
    /// Unit direction to translate the shape along.
    pub direction: Vec3,

    /// Depth of the overlap along `direction`.
    pub distance: f32,
}

// ── CollisionQuery ────────────────────────────────────────────────────────────

/// Pluggable geometry-query backend.
///
/// Implement this to connect the engine to a physics engine's scene queries.
/// The engine only ever calls these four operations; it never inspects
/// backend state directly.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one backend can serve many
/// agents; the engine itself issues queries from a single thread per agent.
pub trait CollisionQuery: Send + Sync {
    /// Sweep `shape` from `start` along `delta`, inflated by `inflation`.
    ///
    /// Returns the first *blocking* hit, or `None` for a clear path.
    fn sweep(
        &self,
        shape:     &Shape,
        start:     Vec3,
        rotation:  Quat,
        delta:     Vec3,
        inflation: f32,
    ) -> Option<SweepHit>;

    /// Like [`sweep`][Self::sweep] but returns every blocking hit along the
    /// path, nearest first.
    fn sweep_multi(
        &self,
        shape:     &Shape,
        start:     Vec3,
        rotation:  Quat,
        delta:     Vec3,
        inflation: f32,
    ) -> Vec<SweepHit>;

    /// All collidables overlapping `shape` placed at `position`.
    ///
    /// Includes `Overlap`-response collidables; `Ignore` ones are omitted.
    fn overlap_multi(&self, shape: &Shape, position: Vec3, rotation: Quat) -> Vec<OverlapHit>;

    /// Minimum translation separating `shape` at `position` from `against`.
    ///
    /// `None` when the pair is not intersecting (or `against` is unknown).
    fn compute_penetration(
        &self,
        shape:    &Shape,
        position: Vec3,
        rotation: Quat,
        against:  CollidableId,
    ) -> Option<Penetration>;
}
