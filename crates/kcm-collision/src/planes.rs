//! Analytic half-space backend.
//!
//! # Why this exists
//!
//! The slide resolver is the most failure-prone piece of the engine and must
//! be testable against synthetic corner geometry without a real physics
//! engine.  `PlaneWorld` answers every [`CollisionQuery`] operation exactly
//! (closed form, no tolerance iteration) for the shape's bounding sphere —
//! exact for spheres, conservative for capsules and cuboids.
//!
//! Planes may carry a linear velocity and a spin rate; [`PlaneWorld::advance`]
//! moves them between ticks so moving/rotating-platform behavior is
//! reproducible in tests.

use glam::{Quat, Vec3};

use kcm_core::math::{safe_normalize, DEGENERATE_EPSILON};
use kcm_core::{CollidableId, CollisionResponse, PhysicalProperties, Pose};

use crate::query::{CollisionQuery, OverlapHit, Penetration, SweepHit};
use crate::Shape;

// ── Plane ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Plane {
    id:         CollidableId,
    /// Unit outward normal; the solid occupies `normal · x < offset`.
    normal:     Vec3,
    /// Signed plane offset: points `x` with `normal · x = offset` lie on it.
    offset:     f32,
    properties: PhysicalProperties,
    /// Linear velocity applied by [`PlaneWorld::advance`].
    velocity:   Vec3,
    /// Spin rate (deg/s, axis-angle) applied to the reference pose only.
    spin:       Vec3,
    /// Reference-point pose reported back with hits (what the surface
    /// tracker measures).
    pose:       Pose,
}

impl Plane {
    /// Signed clearance of a sphere of radius `r` centered at `p`.
    #[inline]
    fn clearance(&self, p: Vec3, r: f32) -> f32 {
        self.normal.dot(p) - self.offset - r
    }

}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Incrementally assemble a [`PlaneWorld`].
#[derive(Default)]
pub struct PlaneWorldBuilder {
    planes: Vec<Plane>,
}

impl PlaneWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a static half-space through `point` with outward `normal`.
    ///
    /// Returns the id the backend will report for this plane.  A degenerate
    /// normal falls back to `+Y`.
    pub fn add_plane(
        &mut self,
        normal: Vec3,
        point: Vec3,
        properties: PhysicalProperties,
    ) -> CollidableId {
        self.add_moving_plane(normal, point, properties, Vec3::ZERO, Vec3::ZERO)
    }

    /// Add a half-space that translates at `velocity` and spins at
    /// `spin` deg/s when the world is advanced.
    pub fn add_moving_plane(
        &mut self,
        normal:     Vec3,
        point:      Vec3,
        properties: PhysicalProperties,
        velocity:   Vec3,
        spin:       Vec3,
    ) -> CollidableId {
        let id = CollidableId(self.planes.len() as u64);
        let normal = safe_normalize(normal, Vec3::Y);
        self.planes.push(Plane {
            id,
            normal,
            offset: normal.dot(point),
            properties,
            velocity,
            spin,
            pose: Pose::from_position(point),
        });
        id
    }

    pub fn build(self) -> PlaneWorld {
        PlaneWorld { planes: self.planes }
    }
}

// ── PlaneWorld ────────────────────────────────────────────────────────────────

/// A set of half-spaces answering collision queries in closed form.
pub struct PlaneWorld {
    planes: Vec<Plane>,
}

impl PlaneWorld {
    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /// Advance moving planes by one timestep.
    ///
    /// Translating planes shift their offset and reference pose; spinning
    /// planes rotate the reference pose only (an infinite plane spinning
    /// about its own normal is geometrically unchanged, but the pose motion
    /// is what the surface tracker measures).
    pub fn advance(&mut self, dt: f32) {
        for plane in &mut self.planes {
            if plane.velocity != Vec3::ZERO {
                plane.offset += plane.normal.dot(plane.velocity) * dt;
                plane.pose.position += plane.velocity * dt;
            }
            if plane.spin != Vec3::ZERO {
                let delta = Quat::from_scaled_axis(plane.spin.to_radians_vec() * dt);
                plane.pose.rotation = (delta * plane.pose.rotation).normalize();
            }
        }
    }

    fn sweep_one(
        plane:     &Plane,
        start:     Vec3,
        delta:     Vec3,
        r:         f32,
    ) -> Option<SweepHit> {
        if !plane.properties.response.is_blocking() {
            return None;
        }
        let c0 = plane.clearance(start, r);
        if c0 < 0.0 {
            // Already inside: report a zero-distance penetrating hit.
            return Some(make_hit(plane, start, 0.0, true));
        }
        let closing = plane.normal.dot(delta);
        if closing >= -DEGENERATE_EPSILON {
            return None; // moving parallel or away
        }
        let f = c0 / -closing;
        if f > 1.0 {
            return None; // contact beyond this sweep
        }
        let position = start + delta * f;
        Some(make_hit(plane, position, delta.length() * f, false))
    }
}

fn make_hit(plane: &Plane, position: Vec3, distance: f32, start_penetrating: bool) -> SweepHit {
    let point = position - plane.normal * (plane.normal.dot(position) - plane.offset);
    SweepHit {
        collidable:      plane.id,
        distance,
        safe_position:   position,
        point,
        normal:          plane.normal,
        impact_normal:   plane.normal,
        start_penetrating,
        properties:      plane.properties,
        collidable_pose: plane.pose,
    }
}

impl CollisionQuery for PlaneWorld {
    fn sweep(
        &self,
        shape:     &Shape,
        start:     Vec3,
        _rotation: Quat,
        delta:     Vec3,
        inflation: f32,
    ) -> Option<SweepHit> {
        let r = shape.bounding_radius() + inflation;
        self.planes
            .iter()
            .filter_map(|p| Self::sweep_one(p, start, delta, r))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn sweep_multi(
        &self,
        shape:     &Shape,
        start:     Vec3,
        _rotation: Quat,
        delta:     Vec3,
        inflation: f32,
    ) -> Vec<SweepHit> {
        let r = shape.bounding_radius() + inflation;
        let mut hits: Vec<SweepHit> = self
            .planes
            .iter()
            .filter_map(|p| Self::sweep_one(p, start, delta, r))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn overlap_multi(&self, shape: &Shape, position: Vec3, _rotation: Quat) -> Vec<OverlapHit> {
        let r = shape.bounding_radius();
        self.planes
            .iter()
            .filter(|p| p.properties.response != CollisionResponse::Ignore)
            .filter(|p| p.clearance(position, r) < 0.0)
            .map(|p| OverlapHit {
                collidable:      p.id,
                point:           position - p.normal * (p.normal.dot(position) - p.offset),
                normal:          p.normal,
                properties:      p.properties,
                collidable_pose: p.pose,
            })
            .collect()
    }

    fn compute_penetration(
        &self,
        shape:     &Shape,
        position:  Vec3,
        _rotation: Quat,
        against:   CollidableId,
    ) -> Option<Penetration> {
        let plane = self.planes.iter().find(|p| p.id == against)?;
        let depth = -plane.clearance(position, shape.bounding_radius());
        (depth > 0.0).then_some(Penetration {
            direction: plane.normal,
            distance:  depth,
        })
    }
}

// ── Small helpers ─────────────────────────────────────────────────────────────

trait ToRadiansVec {
    fn to_radians_vec(self) -> Vec3;
}

impl ToRadiansVec for Vec3 {
    #[inline]
    fn to_radians_vec(self) -> Vec3 {
        self * (std::f32::consts::PI / 180.0)
    }
}
