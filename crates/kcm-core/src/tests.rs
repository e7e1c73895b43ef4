//! Unit tests for kcm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{BehaviorIndex, CollidableId};

    #[test]
    fn collidable_invalid_sentinel() {
        assert_eq!(CollidableId::INVALID.0, u64::MAX);
        assert!(!CollidableId::INVALID.is_valid());
        assert!(CollidableId(0).is_valid());
        assert_eq!(CollidableId::default(), CollidableId::INVALID);
    }

    #[test]
    fn behavior_index_none_is_minus_one() {
        assert_eq!(BehaviorIndex::NONE.0, -1);
        assert!(BehaviorIndex::NONE.is_none());
        assert_eq!(BehaviorIndex::NONE.index(), None);
        assert_eq!(BehaviorIndex::default(), BehaviorIndex::NONE);
    }

    #[test]
    fn behavior_index_roundtrip() {
        let idx = BehaviorIndex::from_usize(3);
        assert!(idx.is_some());
        assert_eq!(idx.index(), Some(3));
    }

    #[test]
    fn negative_indices_are_none() {
        // Any negative value behaves as the sentinel.
        assert_eq!(BehaviorIndex(-7).index(), None);
        assert!(BehaviorIndex(-7).is_none());
    }

    #[test]
    fn display() {
        assert_eq!(BehaviorIndex(2).to_string(), "BehaviorIndex(2)");
        assert_eq!(BehaviorIndex::NONE.to_string(), "BehaviorIndex(none)");
        assert_eq!(CollidableId(7).to_string(), "CollidableId(7)");
    }
}

#[cfg(test)]
mod pose {
    use crate::Pose;
    use glam::{Quat, Vec3};

    #[test]
    fn identity_transform_is_noop() {
        let p = Pose::IDENTITY;
        assert_eq!(p.transform_point(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn transform_point_rotates_then_translates() {
        let pose = Pose::new(
            Vec3::new(10.0, 0.0, 0.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        // +X rotates to -Z under a +90° yaw.
        let out = pose.transform_point(Vec3::X);
        assert!((out - Vec3::new(10.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn finite_check_catches_nan() {
        let mut p = Pose::from_position(Vec3::ZERO);
        assert!(p.is_finite());
        p.position.x = f32::NAN;
        assert!(!p.is_finite());
    }
}

#[cfg(test)]
mod math {
    use crate::math::{
        angle_between_deg, horizontal_part, lerp_clamped, orthonormal_basis, project_on_plane,
        safe_normalize, sanitize_quat, sanitize_vec3, vertical_part,
    };
    use glam::{Quat, Vec3};

    #[test]
    fn safe_normalize_passthrough() {
        let v = safe_normalize(Vec3::new(0.0, 3.0, 4.0), Vec3::X);
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn safe_normalize_degenerate_falls_back() {
        assert_eq!(safe_normalize(Vec3::ZERO, Vec3::Y), Vec3::Y);
        assert_eq!(safe_normalize(Vec3::splat(1e-10), Vec3::Z), Vec3::Z);
    }

    #[test]
    fn basis_is_orthonormal() {
        for n in [Vec3::Y, Vec3::X, Vec3::new(1.0, 2.0, -0.5)] {
            let (t, b) = orthonormal_basis(n);
            let n = n.normalize();
            assert!(t.dot(n).abs() < 1e-5);
            assert!(b.dot(n).abs() < 1e-5);
            assert!(t.dot(b).abs() < 1e-5);
            assert!((t.length() - 1.0).abs() < 1e-5);
            assert!((b.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn basis_degenerate_normal_uses_world_axes() {
        let (t, b) = orthonormal_basis(Vec3::ZERO);
        assert!(t.dot(b).abs() < 1e-5);
    }

    #[test]
    fn plane_projection_removes_normal_component() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let p = project_on_plane(v, Vec3::Y);
        assert_eq!(p, Vec3::new(1.0, 0.0, 3.0));
        assert!(p.dot(Vec3::Y).abs() < 1e-6);
    }

    #[test]
    fn horizontal_vertical_split_recomposes() {
        let v = Vec3::new(3.0, -2.0, 0.5);
        let up = Vec3::Y;
        assert!((horizontal_part(v, up) + vertical_part(v, up) - v).length() < 1e-6);
        assert!(horizontal_part(v, up).dot(up).abs() < 1e-6);
    }

    #[test]
    fn angle_between_axes() {
        assert!((angle_between_deg(Vec3::X, Vec3::Y) - 90.0).abs() < 1e-3);
        assert!(angle_between_deg(Vec3::X, Vec3::X).abs() < 1e-3);
        assert!((angle_between_deg(Vec3::X, -Vec3::X) - 180.0).abs() < 1e-3);
    }

    #[test]
    fn angle_between_degenerate_is_zero() {
        assert_eq!(angle_between_deg(Vec3::ZERO, Vec3::Y), 0.0);
    }

    #[test]
    fn sanitize_vec3_zeroes_nan() {
        let v = sanitize_vec3(Vec3::new(f32::NAN, 1.0, f32::INFINITY), "test");
        assert_eq!(v, Vec3::new(0.0, 1.0, 0.0));
        // Finite input is untouched.
        assert_eq!(sanitize_vec3(Vec3::X, "test"), Vec3::X);
    }

    #[test]
    fn sanitize_quat_recovers_identity() {
        assert_eq!(sanitize_quat(Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0), "q"), Quat::IDENTITY);
        let q = Quat::from_rotation_y(1.0);
        assert!((sanitize_quat(q, "q").dot(q) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_clamps_factor() {
        let a = Vec3::ZERO;
        let b = Vec3::splat(10.0);
        assert_eq!(lerp_clamped(a, b, 2.0), b);
        assert_eq!(lerp_clamped(a, b, -1.0), a);
        assert!((lerp_clamped(a, b, 0.3) - Vec3::splat(3.0)).length() < 1e-5);
    }
}

#[cfg(test)]
mod properties {
    use crate::{CollisionResponse, PhysicalProperties};

    #[test]
    fn block_is_blocking() {
        assert!(CollisionResponse::Block.is_blocking());
        assert!(!CollisionResponse::Overlap.is_blocking());
        assert!(!CollisionResponse::Ignore.is_blocking());
    }

    #[test]
    fn default_is_standable_ground() {
        let p = PhysicalProperties::default();
        assert!(p.can_step_on);
        assert!(p.response.is_blocking());
        assert_eq!(p.friction, 1.0);
    }

    #[test]
    fn slick_wall_is_frictionless() {
        let p = PhysicalProperties::slick_wall();
        assert_eq!(p.friction, 0.0);
        assert!(!p.can_step_on);
    }

    #[test]
    fn display() {
        assert_eq!(CollisionResponse::Block.to_string(), "block");
        assert_eq!(CollisionResponse::Ignore.to_string(), "ignore");
    }
}
