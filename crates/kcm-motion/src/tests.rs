//! Unit tests for kcm-motion.

use glam::{Quat, Vec3};

use kcm_core::CollidableId;
use kcm_kinematics::{AngularKinematic, KinematicComponents, LinearKinematic};
use kcm_surface::Surface;

use crate::{
    apply_root_motion, apply_snap, drag_acceleration, integrate_angular, integrate_linear,
    referential_from_force, referential_from_surfaces, velocity_to_reach, RootMotionDelta,
    RootMotionMode,
};

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

// ── Drag ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod drag {
    use super::*;

    #[test]
    fn opposes_relative_velocity() {
        let a = drag_acceleration(Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO, 0.5, 1.0);
        assert!(a.x < 0.0);
        assert_eq!(a.y, 0.0);
    }

    #[test]
    fn scales_with_squared_relative_speed() {
        let slow = drag_acceleration(Vec3::X, Vec3::ZERO, 0.5, 1.0);
        let fast = drag_acceleration(Vec3::X * 2.0, Vec3::ZERO, 0.5, 1.0);
        assert!((fast.length() / slow.length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn scales_inversely_with_mass() {
        let light = drag_acceleration(Vec3::X * 3.0, Vec3::ZERO, 0.5, 1.0);
        let heavy = drag_acceleration(Vec3::X * 3.0, Vec3::ZERO, 0.5, 4.0);
        assert!((light.length() / heavy.length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn riding_the_frame_feels_no_drag() {
        // Same velocity as the referential frame: zero relative speed.
        let a = drag_acceleration(Vec3::X * 5.0, Vec3::X * 5.0, 0.5, 1.0);
        assert_eq!(a, Vec3::ZERO);
    }
}

// ── Referential frame ─────────────────────────────────────────────────────────

#[cfg(test)]
mod referential {
    use super::*;

    fn moving_surface(id: u64, velocity: Vec3, friction: f32) -> Surface {
        let mut s = Surface::new(CollidableId(id), Vec3::ZERO, Vec3::Y);
        s.linear_velocity = velocity;
        s.properties.friction = friction;
        s
    }

    #[test]
    fn none_without_active_surfaces() {
        let comps = KinematicComponents::default();
        assert!(referential_from_surfaces(&comps, Vec3::ZERO).is_none());
    }

    #[test]
    fn single_surface_passes_through() {
        let mut comps = KinematicComponents::default();
        comps.surfaces.push(moving_surface(1, Vec3::X * 3.0, 1.0));
        comps.active_surfaces.set(0);
        let (v, a) = referential_from_surfaces(&comps, Vec3::ZERO).unwrap();
        assert!(approx(v, Vec3::X * 3.0));
        assert!(approx(a, Vec3::ZERO));
    }

    #[test]
    fn aggregation_is_friction_weighted() {
        let mut comps = KinematicComponents::default();
        comps.surfaces.push(moving_surface(1, Vec3::X * 4.0, 3.0));
        comps.surfaces.push(moving_surface(2, Vec3::ZERO, 1.0));
        comps.active_surfaces.set(0);
        comps.active_surfaces.set(1);
        let (v, _) = referential_from_surfaces(&comps, Vec3::ZERO).unwrap();
        // (4*3 + 0*1) / (3+1) = 3
        assert!(approx(v, Vec3::X * 3.0));
    }

    #[test]
    fn frictionless_surfaces_average_uniformly() {
        let mut comps = KinematicComponents::default();
        comps.surfaces.push(moving_surface(1, Vec3::X * 4.0, 0.0));
        comps.surfaces.push(moving_surface(2, Vec3::ZERO, 0.0));
        comps.active_surfaces.set(0);
        comps.active_surfaces.set(1);
        let (v, _) = referential_from_surfaces(&comps, Vec3::ZERO).unwrap();
        assert!(approx(v, Vec3::X * 2.0));
    }

    #[test]
    fn rotating_surface_contributes_tangential_velocity() {
        let mut comps = KinematicComponents::default();
        let mut s = moving_surface(1, Vec3::ZERO, 1.0);
        s.angular_velocity = Vec3::new(0.0, 90.0, 0.0); // deg/s about Y
        comps.surfaces.push(s);
        comps.active_surfaces.set(0);
        // One unit out along +X from the pivot: tangential speed π/2 along -Z.
        let (v, a) = referential_from_surfaces(&comps, Vec3::X).unwrap();
        assert!(approx(v, Vec3::new(0.0, 0.0, -std::f32::consts::FRAC_PI_2)));
        // Centripetal acceleration points back at the pivot.
        assert!(a.x < 0.0);
    }

    #[test]
    fn force_fallback_accelerates_only() {
        let (v, a) = referential_from_force(Vec3::new(0.0, -98.1, 0.0), 10.0);
        assert_eq!(v, Vec3::ZERO);
        assert!(approx(a, Vec3::new(0.0, -9.81, 0.0)));
    }
}

// ── Linear integration ────────────────────────────────────────────────────────

#[cfg(test)]
mod linear {
    use super::*;

    #[test]
    fn zero_acceleration_moves_exactly_velocity_times_t() {
        let mut lin = LinearKinematic::default();
        lin.velocity = Vec3::new(3.0, 0.0, -1.0);
        integrate_linear(&mut lin, 0.5, Vec3::ZERO);
        assert_eq!(lin.position, Vec3::new(1.5, 0.0, -0.5));
        assert_eq!(lin.velocity, Vec3::new(3.0, 0.0, -1.0));
    }

    #[test]
    fn constant_acceleration_closed_form() {
        let mut lin = LinearKinematic::default();
        lin.velocity = Vec3::X * 2.0;
        lin.acceleration = Vec3::X * 4.0;
        integrate_linear(&mut lin, 1.0, Vec3::ZERO);
        // x = 2*1 + 0.5*4*1 = 4 ; v = 2 + 4 = 6
        assert!(approx(lin.position, Vec3::X * 4.0));
        assert!(approx(lin.velocity, Vec3::X * 6.0));
    }

    #[test]
    fn inverse_formula_recovers_velocity() {
        let accel = Vec3::new(0.0, -9.8, 0.0);
        let v0 = Vec3::new(2.0, 5.0, -1.0);
        let dt = 0.35;

        let mut lin = LinearKinematic::default();
        lin.velocity = v0;
        lin.acceleration = accel;
        integrate_linear(&mut lin, dt, Vec3::ZERO);

        let recovered = velocity_to_reach(Vec3::ZERO, lin.position, accel, dt);
        assert!(approx(recovered, v0));
    }

    #[test]
    fn velocity_to_reach_degenerate_dt() {
        assert_eq!(velocity_to_reach(Vec3::ZERO, Vec3::X, Vec3::ZERO, 0.0), Vec3::ZERO);
    }

    #[test]
    fn nan_velocity_is_zeroed_before_integration() {
        let mut lin = LinearKinematic::default();
        lin.position = Vec3::X;
        lin.velocity = Vec3::new(f32::NAN, 1.0, 0.0);
        integrate_linear(&mut lin, 0.1, Vec3::ZERO);
        assert!(lin.position.is_finite());
        assert!(lin.velocity.is_finite());
        // The finite component survives.
        assert!((lin.velocity.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn composites_blend_before_integration() {
        let mut lin = LinearKinematic::default();
        lin.set_composite("input", Vec3::X * 10.0, 2.0);
        integrate_linear(&mut lin, 0.1, Vec3::ZERO);
        // blend: v = 0 + (10-0)*0.2 = 2 ; then x += v*dt
        assert!(approx(lin.velocity, Vec3::X * 2.0));
        assert!(approx(lin.position, Vec3::X * 0.2));
    }

    #[test]
    fn snap_moves_position_not_velocity() {
        let mut lin = LinearKinematic::default();
        lin.add_snap(Vec3::new(0.0, -0.25, 0.0));
        apply_snap(&mut lin, Vec3::new(0.0, -9.8, 0.0));
        assert!(approx(lin.position, Vec3::new(0.0, -0.25, 0.0)));
        assert_eq!(lin.velocity, Vec3::ZERO);
        assert_eq!(lin.snap_displacement, Vec3::ZERO);
    }

    #[test]
    fn snap_vetoed_against_external_force() {
        let mut lin = LinearKinematic::default();
        // Downward snap while the external force points up.
        lin.add_snap(Vec3::new(0.0, -0.25, 0.0));
        apply_snap(&mut lin, Vec3::new(0.0, 9.8, 0.0));
        assert_eq!(lin.position, Vec3::ZERO);
        // The snap is consumed either way.
        assert_eq!(lin.snap_displacement, Vec3::ZERO);
    }

    #[test]
    fn snap_allowed_without_external_force() {
        let mut lin = LinearKinematic::default();
        lin.add_snap(Vec3::Y);
        apply_snap(&mut lin, Vec3::ZERO);
        assert_eq!(lin.position, Vec3::Y);
    }
}

// ── Angular integration ───────────────────────────────────────────────────────

#[cfg(test)]
mod angular {
    use super::*;

    #[test]
    fn rotates_at_configured_rate() {
        let mut ang = AngularKinematic::default();
        ang.rotation_speed = Vec3::new(0.0, 90.0, 0.0); // deg/s
        integrate_angular(&mut ang, 1.0, None);
        let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        assert!(ang.orientation.angle_between(expected) < 1e-3);
    }

    #[test]
    fn acceleration_advances_rotation_speed() {
        let mut ang = AngularKinematic::default();
        ang.angular_acceleration = Vec3::new(0.0, 30.0, 0.0);
        integrate_angular(&mut ang, 0.5, None);
        assert!(approx(ang.rotation_speed, Vec3::new(0.0, 15.0, 0.0)));
    }

    #[test]
    fn orientation_stays_unit() {
        let mut ang = AngularKinematic::default();
        ang.rotation_speed = Vec3::new(17.0, -4.0, 90.0);
        for _ in 0..1000 {
            integrate_angular(&mut ang, 0.016, None);
        }
        assert!((ang.orientation.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn align_up_strips_the_up_rate() {
        let mut ang = AngularKinematic::default();
        ang.rotation_speed = Vec3::new(10.0, 90.0, 0.0);
        integrate_angular(&mut ang, 0.1, Some(Vec3::Y));
        assert_eq!(ang.rotation_speed.y, 0.0);
        assert!((ang.rotation_speed.x - 10.0).abs() < 1e-5);
    }
}

// ── Root motion ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod root_motion {
    use super::*;

    fn delta(translation: Vec3) -> RootMotionDelta {
        RootMotionDelta { translation, rotation: Quat::IDENTITY }
    }

    #[test]
    fn additive_adds_on_top() {
        let v = apply_root_motion(
            RootMotionMode::Additive,
            Vec3::X * 2.0,
            &delta(Vec3::Z * 0.1), // 1 m/s over dt = 0.1
            1.0,
            0.1,
        );
        assert!(approx(v, Vec3::new(2.0, 0.0, 1.0)));
    }

    #[test]
    fn override_replaces_weighted() {
        let full = apply_root_motion(
            RootMotionMode::Override,
            Vec3::X * 2.0,
            &delta(Vec3::Z * 0.1),
            1.0,
            0.1,
        );
        assert!(approx(full, Vec3::Z));

        let half = apply_root_motion(
            RootMotionMode::Override,
            Vec3::X * 2.0,
            &delta(Vec3::Z * 0.1),
            0.5,
            0.1,
        );
        assert!(approx(half, Vec3::new(1.0, 0.0, 0.5)));
    }

    #[test]
    fn zero_dt_contributes_nothing() {
        assert_eq!(delta(Vec3::X).velocity(0.0), Vec3::ZERO);
    }
}
