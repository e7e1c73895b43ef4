//! Unit tests for kcm-surface.

use glam::{Quat, Vec3};

use kcm_core::{CollidableId, Pose};

use crate::{Surface, SurfaceTracker};

fn id(n: u64) -> CollidableId {
    CollidableId(n)
}

// ── SurfaceTracker ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tracker {
    use super::*;

    #[test]
    fn first_observation_seeds_history() {
        let mut t = SurfaceTracker::new();
        let v = t.observe(id(1), None, Pose::from_position(Vec3::new(5.0, 0.0, 0.0)), 0.1);
        assert_eq!(v.linear, Vec3::ZERO);
        assert_eq!(v.angular, Vec3::ZERO);
        assert!(t.is_tracking(id(1)));
    }

    #[test]
    fn constant_velocity_measured_after_two_ticks() {
        // A collidable moving at constant V yields exactly V on the second tick.
        let mut t = SurfaceTracker::new();
        let v_true = Vec3::new(2.0, 0.0, -1.0);
        let dt = 0.1;

        t.observe(id(1), None, Pose::from_position(Vec3::ZERO), dt);
        let v = t.observe(id(1), None, Pose::from_position(v_true * dt), dt);

        assert!((v.linear - v_true).length() < 1e-5, "got {:?}", v.linear);
        assert_eq!(v.angular, Vec3::ZERO);
    }

    #[test]
    fn rotation_rate_measured_in_degrees() {
        let mut t = SurfaceTracker::new();
        let dt = 0.5;
        t.observe(id(1), None, Pose::IDENTITY, dt);
        // 45° about Y over half a second = 90 deg/s.
        let rotated = Pose::new(Vec3::ZERO, Quat::from_rotation_y(45f32.to_radians()));
        let v = t.observe(id(1), None, rotated, dt);
        assert!((v.angular - Vec3::new(0.0, 90.0, 0.0)).length() < 1e-3, "got {:?}", v.angular);
    }

    #[test]
    fn shortest_arc_avoids_long_way_round() {
        let mut t = SurfaceTracker::new();
        t.observe(id(1), None, Pose::IDENTITY, 1.0);
        // -10° measured as a small negative rate, not a 350° positive one.
        let v = t.observe(
            id(1),
            None,
            Pose::new(Vec3::ZERO, Quat::from_rotation_y(-10f32.to_radians())),
            1.0,
        );
        assert!(v.angular.length() < 11.0, "got {:?}", v.angular);
    }

    #[test]
    fn socket_change_resets_history() {
        let mut t = SurfaceTracker::new();
        t.observe(id(1), Some("base"), Pose::from_position(Vec3::ZERO), 0.1);
        // Same collidable, different bone, far-away position: no spike.
        let v = t.observe(id(1), Some("hand"), Pose::from_position(Vec3::splat(100.0)), 0.1);
        assert_eq!(v.linear, Vec3::ZERO);
        // Next tick with the new socket measures normally.
        let v = t.observe(id(1), Some("hand"), Pose::from_position(Vec3::splat(100.1)), 0.1);
        assert!(v.linear.length() > 0.0);
    }

    #[test]
    fn non_finite_pose_resets_instead_of_propagating() {
        let mut t = SurfaceTracker::new();
        t.observe(id(1), None, Pose::from_position(Vec3::ZERO), 0.1);
        let bad = Pose::from_position(Vec3::new(f32::NAN, 0.0, 0.0));
        let v = t.observe(id(1), None, bad, 0.1);
        assert_eq!(v.linear, Vec3::ZERO);
        // Recovery: the record was reseeded, so the next good pose is a
        // "first" observation again.
        let v = t.observe(id(1), None, Pose::from_position(Vec3::splat(3.0)), 0.1);
        assert_eq!(v.linear, Vec3::ZERO);
    }

    #[test]
    fn zero_dt_yields_zero() {
        let mut t = SurfaceTracker::new();
        t.observe(id(1), None, Pose::from_position(Vec3::ZERO), 0.1);
        let v = t.observe(id(1), None, Pose::from_position(Vec3::X), 0.0);
        assert_eq!(v.linear, Vec3::ZERO);
    }

    #[test]
    fn retain_live_prunes_departed() {
        let mut t = SurfaceTracker::new();
        t.observe(id(1), None, Pose::IDENTITY, 0.1);
        t.observe(id(2), None, Pose::IDENTITY, 0.1);
        t.retain_live(&[id(2)]);
        assert!(!t.is_tracking(id(1)));
        assert!(t.is_tracking(id(2)));
        assert_eq!(t.len(), 1);
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod surface {
    use super::*;

    #[test]
    fn velocity_at_center_is_linear() {
        let mut s = Surface::new(id(1), Vec3::ZERO, Vec3::Y);
        s.linear_velocity = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(s.velocity_at(s.socket_pose.position), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn velocity_at_off_center_adds_tangential_term() {
        // Platform spinning at 90 deg/s about +Y; a point 2 m out on +X moves
        // tangentially along -Z at ω·r = (π/2)·2 m/s.
        let mut s = Surface::new(id(1), Vec3::ZERO, Vec3::Y);
        s.angular_velocity = Vec3::new(0.0, 90.0, 0.0);
        let v = s.velocity_at(Vec3::new(2.0, 0.0, 0.0));
        let expected = Vec3::new(0.0, 0.0, -std::f32::consts::PI);
        assert!((v - expected).length() < 1e-4, "got {v:?}");
    }

    #[test]
    fn acceleration_at_points_inward() {
        // Centripetal acceleration points from the orbit point toward the axis.
        let mut s = Surface::new(id(1), Vec3::ZERO, Vec3::Y);
        s.angular_velocity = Vec3::new(0.0, 90.0, 0.0);
        let a = s.acceleration_at(Vec3::new(2.0, 0.0, 0.0));
        assert!(a.x < 0.0);
        assert!(a.y.abs() < 1e-5 && a.z.abs() < 1e-5, "got {a:?}");
    }

    #[test]
    fn untracked_surface_is_not_steppable() {
        let mut s = Surface::new(id(1), Vec3::ZERO, Vec3::Y);
        assert!(s.is_steppable());
        s.tracked = false;
        assert!(!s.is_steppable());
    }
}
