//! Unit tests for kcm-collision.

use glam::{Quat, Vec3};

use kcm_core::math::project_on_plane;
use kcm_core::{CollisionResponse, PhysicalProperties};

use crate::{
    depenetration_offset, resolve_slide, CollisionQuery, Penetration, PlaneWorldBuilder, Shape,
    SlideConfig, SlideOutcome,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const AGENT: Shape = Shape::Sphere { radius: 0.5 };

/// Flat floor: solid below y = 0.
fn floor_world() -> crate::PlaneWorld {
    let mut b = PlaneWorldBuilder::new();
    b.add_plane(Vec3::Y, Vec3::ZERO, PhysicalProperties::default());
    b.build()
}

/// Floor at y = 0 plus a wall at x = 2 (solid beyond).
fn corner_world() -> crate::PlaneWorld {
    let mut b = PlaneWorldBuilder::new();
    b.add_plane(Vec3::Y, Vec3::ZERO, PhysicalProperties::default());
    b.add_plane(Vec3::NEG_X, Vec3::new(2.0, 0.0, 0.0), PhysicalProperties::slick_wall());
    b.build()
}

/// Zero-skin config so geometric assertions are exact.
fn exact_config(max_depth: u32) -> SlideConfig {
    SlideConfig { max_depth, min_distance: 1e-4, skin: 0.0 }
}

// ── Shape ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod shape {
    use super::*;

    #[test]
    fn bounding_radii() {
        assert_eq!(Shape::Sphere { radius: 0.5 }.bounding_radius(), 0.5);
        let capsule = Shape::Capsule { radius: 0.3, half_height: 0.6 };
        assert!((capsule.bounding_radius() - 0.9).abs() < 1e-6);
        let c = Shape::Cuboid { half_extents: Vec3::new(1.0, 2.0, 2.0) };
        assert!((c.bounding_radius() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn validity() {
        assert!(AGENT.is_valid());
        assert!(!Shape::Sphere { radius: 0.0 }.is_valid());
        assert!(!Shape::Sphere { radius: f32::NAN }.is_valid());
    }
}

// ── PlaneWorld ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod plane_world {
    use super::*;

    #[test]
    fn clear_sweep_misses() {
        let world = floor_world();
        let hit = world.sweep(&AGENT, Vec3::new(0.0, 5.0, 0.0), Quat::IDENTITY, Vec3::X, 0.0);
        assert!(hit.is_none());
    }

    #[test]
    fn downward_sweep_stops_at_floor() {
        let world = floor_world();
        let hit = world
            .sweep(&AGENT, Vec3::new(0.0, 5.0, 0.0), Quat::IDENTITY, Vec3::NEG_Y * 10.0, 0.0)
            .unwrap();
        // Sphere center rests at y = radius.
        assert!((hit.distance - 4.5).abs() < 1e-5);
        assert!((hit.safe_position.y - 0.5).abs() < 1e-5);
        assert!(hit.point.y.abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
        assert!(!hit.start_penetrating);
    }

    #[test]
    fn start_penetrating_reported_at_zero_distance() {
        let world = floor_world();
        let hit = world
            .sweep(&AGENT, Vec3::new(0.0, 0.2, 0.0), Quat::IDENTITY, Vec3::NEG_Y, 0.0)
            .unwrap();
        assert!(hit.start_penetrating);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn inflation_extends_the_hit_radius() {
        let world = floor_world();
        let hit = world
            .sweep(&AGENT, Vec3::new(0.0, 5.0, 0.0), Quat::IDENTITY, Vec3::NEG_Y * 10.0, 0.5)
            .unwrap();
        assert!((hit.safe_position.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn sweep_multi_sorted_nearest_first() {
        let world = corner_world();
        // Diagonal into the corner from high up.
        let hits = world.sweep_multi(
            &AGENT,
            Vec3::new(0.0, 5.0, 0.0),
            Quat::IDENTITY,
            Vec3::new(5.0, -10.0, 0.0),
            0.0,
        );
        assert_eq!(hits.len(), 2);
        assert!(hits[0].distance <= hits[1].distance);
    }

    #[test]
    fn overlap_detects_intersection_only() {
        let world = floor_world();
        assert!(world
            .overlap_multi(&AGENT, Vec3::new(0.0, 0.2, 0.0), Quat::IDENTITY)
            .len() == 1);
        // Exactly resting is not overlapping.
        assert!(world
            .overlap_multi(&AGENT, Vec3::new(0.0, 0.5, 0.0), Quat::IDENTITY)
            .is_empty());
    }

    #[test]
    fn penetration_depth_matches_overlap() {
        let world = floor_world();
        let pen = world
            .compute_penetration(&AGENT, Vec3::new(0.0, 0.2, 0.0), Quat::IDENTITY, kcm_core::CollidableId(0))
            .unwrap();
        assert_eq!(pen.direction, Vec3::Y);
        assert!((pen.distance - 0.3).abs() < 1e-5);
        // Not intersecting → None.
        assert!(world
            .compute_penetration(&AGENT, Vec3::new(0.0, 2.0, 0.0), Quat::IDENTITY, kcm_core::CollidableId(0))
            .is_none());
    }

    #[test]
    fn non_blocking_planes_do_not_stop_sweeps() {
        let mut b = PlaneWorldBuilder::new();
        let mut overlap_props = PhysicalProperties::default();
        overlap_props.response = CollisionResponse::Overlap;
        b.add_plane(Vec3::Y, Vec3::ZERO, overlap_props);
        let world = b.build();

        let from = Vec3::new(0.0, 5.0, 0.0);
        assert!(world.sweep(&AGENT, from, Quat::IDENTITY, Vec3::NEG_Y * 10.0, 0.0).is_none());
        // ... but they are reported by overlap queries.
        assert_eq!(world.overlap_multi(&AGENT, Vec3::new(0.0, 0.1, 0.0), Quat::IDENTITY).len(), 1);
    }

    #[test]
    fn advance_moves_translating_planes() {
        let mut b = PlaneWorldBuilder::new();
        b.add_moving_plane(
            Vec3::Y,
            Vec3::ZERO,
            PhysicalProperties::default(),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::ZERO,
        );
        let mut world = b.build();
        world.advance(0.5);
        // Floor rose by 1 m: a sweep from y = 5 now stops at y = 1.5.
        let hit = world
            .sweep(&AGENT, Vec3::new(0.0, 5.0, 0.0), Quat::IDENTITY, Vec3::NEG_Y * 10.0, 0.0)
            .unwrap();
        assert!((hit.safe_position.y - 1.5).abs() < 1e-5);
        assert!((hit.collidable_pose.position.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn advance_spins_reference_pose() {
        let mut b = PlaneWorldBuilder::new();
        b.add_moving_plane(
            Vec3::Y,
            Vec3::ZERO,
            PhysicalProperties::default(),
            Vec3::ZERO,
            Vec3::new(0.0, 90.0, 0.0),
        );
        let mut world = b.build();
        world.advance(1.0);
        let hit = world
            .sweep(&AGENT, Vec3::new(0.0, 5.0, 0.0), Quat::IDENTITY, Vec3::NEG_Y * 10.0, 0.0)
            .unwrap();
        let expected = Quat::from_rotation_y(90f32.to_radians());
        assert!(hit.collidable_pose.rotation.dot(expected).abs() > 0.999);
    }
}

// ── Slide resolution ──────────────────────────────────────────────────────────

#[cfg(test)]
mod slide {
    use super::*;

    #[test]
    fn single_plane_slides_to_projection() {
        // Resting on the floor, pushing diagonally into it: the corrected
        // displacement is exactly the attempted displacement flattened onto
        // the plane — no penetration, full tangential distance.
        let world = floor_world();
        let start = Vec3::new(0.0, 0.5, 0.0);
        let attempted = Vec3::new(3.0, -4.0, 0.0);
        let first = world.sweep(&AGENT, start, Quat::IDENTITY, attempted, 0.0).unwrap();

        let result =
            resolve_slide(&world, &AGENT, Quat::IDENTITY, start, attempted, &first, &exact_config(3));

        let displacement = result.position - start;
        assert_eq!(result.outcome, SlideOutcome::Resolved);
        assert!(displacement.dot(Vec3::Y).abs() < 1e-5, "penetrated: {displacement:?}");
        let expected = project_on_plane(attempted, Vec3::Y);
        assert!((displacement.length() - expected.length()).abs() < 1e-4);
    }

    #[test]
    fn corner_follows_the_crease() {
        // Floor + wall: the slide first flattens onto the floor, hits the
        // wall, then continues along the floor/wall crease (the z axis).
        let world = corner_world();
        let start = Vec3::new(0.0, 0.5, 0.0);
        let attempted = Vec3::new(3.0, -1.0, 1.0);
        let first = world.sweep(&AGENT, start, Quat::IDENTITY, attempted, 0.0).unwrap();

        let result =
            resolve_slide(&world, &AGENT, Quat::IDENTITY, start, attempted, &first, &exact_config(4));

        assert_eq!(result.outcome, SlideOutcome::Resolved);
        // Never through the wall (center stays ≤ 2 − radius) or the floor.
        assert!(result.position.x <= 1.5 + 1e-4, "through wall: {:?}", result.position);
        assert!((result.position.y - 0.5).abs() < 1e-4);
        // The crease component survived: 0.5 consumed approaching the wall
        // plus the full original z projected onto the crease.
        assert!((result.position.z - 1.5).abs() < 1e-3, "got {:?}", result.position);
        assert!(result.depth_used >= 2);
    }

    #[test]
    fn depth_limit_stops_at_last_valid_position() {
        let world = corner_world();
        let start = Vec3::new(0.0, 0.5, 0.0);
        let attempted = Vec3::new(3.0, -1.0, 1.0);
        let first = world.sweep(&AGENT, start, Quat::IDENTITY, attempted, 0.0).unwrap();

        let result =
            resolve_slide(&world, &AGENT, Quat::IDENTITY, start, attempted, &first, &exact_config(1));

        assert_eq!(result.outcome, SlideOutcome::DepthLimited);
        assert_eq!(result.depth_used, 1);
        // Stopped where the wall sweep ended, not beyond it.
        assert!(result.position.x <= 1.5 + 1e-4);
    }

    #[test]
    fn head_on_into_wall_resolves_with_no_movement() {
        // Straight into the wall: the slide vector opposes nothing useful,
        // so resolution stops immediately with near-zero displacement.
        let world = corner_world();
        let start = Vec3::new(1.4, 0.5, 0.0);
        let attempted = Vec3::new(1.0, 0.0, 0.0);
        let first = world.sweep(&AGENT, start, Quat::IDENTITY, attempted, 0.0).unwrap();

        let result =
            resolve_slide(&world, &AGENT, Quat::IDENTITY, start, attempted, &first, &exact_config(3));

        assert_eq!(result.outcome, SlideOutcome::Resolved);
        assert!((result.position - Vec3::new(1.5, 0.5, 0.0)).length() < 1e-4);
    }

    #[test]
    fn start_penetrating_without_progress_is_stuck() {
        let world = floor_world();
        let start = Vec3::new(0.0, 0.2, 0.0); // embedded in the floor
        let attempted = Vec3::new(0.0, -1.0, 0.0);
        let first = world.sweep(&AGENT, start, Quat::IDENTITY, attempted, 0.0).unwrap();
        assert!(first.start_penetrating);

        let result =
            resolve_slide(&world, &AGENT, Quat::IDENTITY, start, attempted, &first, &exact_config(3));

        assert_eq!(result.outcome, SlideOutcome::Stuck);
        assert!((result.position - start).length() < 1e-4);
    }

    #[test]
    fn depenetration_accumulates_all_surfaces() {
        let offset = depenetration_offset(&[
            Penetration { direction: Vec3::Y, distance: 0.3 },
            Penetration { direction: Vec3::X, distance: 0.1 },
            // Negative depths are ignored rather than pulling inward.
            Penetration { direction: Vec3::Z, distance: -1.0 },
        ]);
        assert!((offset - Vec3::new(0.1, 0.3, 0.0)).length() < 1e-6);
    }
}
