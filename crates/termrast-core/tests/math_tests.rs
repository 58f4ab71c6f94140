//! Tests for the projection/transform conventions the pipeline relies on.

use glam::{Mat4, Vec3, Vec4};
use termrast_core::math;
use termrast_core::Camera;

fn camera_at(pos: Vec3) -> Camera {
    let mut cam = Camera::default();
    cam.position = pos;
    cam.update_rotation();
    cam
}

mod projection {
    use super::*;

    #[test]
    fn clip_w_equals_camera_distance() {
        let cam = camera_at(Vec3::new(0.0, 0.0, 5.0));
        let m = cam.camera_matrix();
        for &(point, expected) in &[
            (Vec3::new(0.0, 0.0, 0.0), 5.0),
            (Vec3::new(0.3, -0.7, 2.0), 3.0),
            (Vec3::new(-2.0, 1.0, -10.0), 15.0),
        ] {
            let clip = m * point.extend(1.0);
            assert!(
                (clip.w - expected).abs() < 1e-4,
                "w for {point}: {} vs {expected}",
                clip.w
            );
        }
    }

    #[test]
    fn near_plane_maps_to_zero_near_distance() {
        let near = 0.25f32;
        let p = math::perspective(70.0, 1.0, near, 500.0);
        // View-space point exactly on the near plane.
        let clip = p * Vec4::new(0.1, 0.2, -near, 1.0);
        assert!((clip.z + clip.w).abs() < 1e-5, "z+w = {}", clip.z + clip.w);
        // In front of it: positive; behind it: negative.
        let front = p * Vec4::new(0.0, 0.0, -1.0, 1.0);
        assert!(front.z + front.w > 0.0);
        let behind = p * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert!(behind.z + behind.w < 0.0);
    }

    #[test]
    fn ndc_depth_increases_with_distance() {
        let p = math::perspective(70.0, 1.0, 0.2, 500.0);
        let z_at = |dist: f32| {
            let clip = p * Vec4::new(0.0, 0.0, -dist, 1.0);
            clip.z / clip.w
        };
        assert!(z_at(1.0) < z_at(10.0));
        assert!(z_at(10.0) < z_at(400.0));
        // Near plane lands at NDC z = -1.
        assert!((z_at(0.2) + 1.0).abs() < 1e-5);
    }

    #[test]
    fn aspect_scales_x_only() {
        let square = math::perspective(70.0, 1.0, 0.2, 500.0);
        let wide = math::perspective(70.0, 2.0, 0.2, 500.0);
        let v = Vec4::new(1.0, 1.0, -5.0, 1.0);
        let a = square * v;
        let b = wide * v;
        assert!((a.x / b.x - 2.0).abs() < 1e-5);
        assert!((a.y - b.y).abs() < 1e-6);
    }
}

mod rotation {
    use super::*;

    #[test]
    fn yaw_turns_the_camera_left() {
        // Positive yaw must swing the forward vector toward -X.
        let mut cam = Camera::default();
        cam.yaw = 0.3;
        cam.update_rotation();
        let fwd = cam.forward();
        assert!(fwd.x < 0.0, "forward after +yaw: {fwd}");
        assert!(fwd.z < 0.0);
    }

    #[test]
    fn pitch_then_yaw_composition() {
        let mut cam = Camera::default();
        cam.yaw = 0.4;
        cam.pitch = -0.2;
        cam.update_rotation();
        let expected = math::rotate_x(-0.2) * math::rotate_y(0.4);
        assert!((cam.rotation - expected).abs_diff_eq(Mat4::ZERO, 1e-6));
    }

    #[test]
    fn full_turn_is_identity() {
        let m = math::rotate_z(core::f32::consts::TAU);
        assert!((m - Mat4::IDENTITY).abs_diff_eq(Mat4::ZERO, 1e-5));
    }
}

mod normal_matrix {
    use super::*;

    #[test]
    fn axis_normals_survive_nonuniform_scale() {
        // An axis-aligned cube scaled by (2, 1, 0.5) keeps axis-aligned
        // face normals.
        let nm = math::normal_matrix(&math::scale(Vec3::new(2.0, 1.0, 0.5)));
        for axis in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::NEG_X, Vec3::NEG_Y, Vec3::NEG_Z] {
            let n = (nm * axis).normalize();
            assert!((n - axis).length() < 1e-6, "{axis} became {n}");
        }
    }

    #[test]
    fn tilted_plane_normal_is_corrected() {
        // The plane x + y = 1 under scale (2, 1, 0.5) becomes x/2 + y = 1,
        // whose unit normal is (0.5, 1, 0) normalized. Plain rotation of
        // the old normal would give the wrong answer.
        let nm = math::normal_matrix(&math::scale(Vec3::new(2.0, 1.0, 0.5)));
        let n = (nm * Vec3::new(1.0, 1.0, 0.0).normalize()).normalize();
        let expected = Vec3::new(0.5, 1.0, 0.0).normalize();
        assert!((n - expected).length() < 1e-6, "{n} vs {expected}");
    }

    #[test]
    fn rotation_leaves_normals_rotated() {
        let m = math::rotate_y(0.8);
        let nm = math::normal_matrix(&m);
        let n = Vec3::new(0.0, 0.0, 1.0);
        let via_nm = (nm * n).normalize();
        let via_m = (m * n.extend(0.0)).truncate().normalize();
        assert!((via_nm - via_m).length() < 1e-6);
    }
}

mod screen_mapping {
    use super::*;

    #[test]
    fn ndc_origin_hits_the_center() {
        let p = math::ndc_to_screen(Vec3::ZERO, 100, 50);
        assert_eq!((p.x, p.y), (50.0, 25.0));
    }

    #[test]
    fn y_axis_points_down() {
        let top = math::ndc_to_screen(Vec3::new(0.0, 1.0, 0.0), 100, 50);
        let bottom = math::ndc_to_screen(Vec3::new(0.0, -1.0, 0.0), 100, 50);
        assert!(top.y < bottom.y);
        assert_eq!(top.y, 0.0);
        assert_eq!(bottom.y, 50.0);
    }
}
