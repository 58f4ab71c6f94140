//! Unit tests for near-plane clipping in homogeneous clip space.

use glam::{Vec2, Vec3};
use termrast_core::render::clip::{clip_near, fan};
use termrast_core::render::ClipVertex;
use termrast_core::Camera;

/// Camera at (0, 0, 5) looking down -Z, defaults otherwise (near 0.2).
fn camera() -> Camera {
    let mut cam = Camera::default();
    cam.position = Vec3::new(0.0, 0.0, 5.0);
    cam.update_rotation();
    cam
}

fn clip_vertex(cam: &Camera, world: Vec3) -> ClipVertex {
    ClipVertex {
        clip: cam.camera_matrix() * world.extend(1.0),
        world,
        normal: Vec3::Z,
        uv: Vec2::ZERO,
    }
}

fn clip_triangle(cam: &Camera, a: Vec3, b: Vec3, c: Vec3) -> [ClipVertex; 3] {
    [
        clip_vertex(cam, a),
        clip_vertex(cam, b),
        clip_vertex(cam, c),
    ]
}

fn near_distance(v: &ClipVertex) -> f32 {
    v.clip.z + v.clip.w
}

mod fully_inside {
    use super::*;

    #[test]
    fn returns_the_input_triangle() {
        let cam = camera();
        let tri = clip_triangle(
            &cam,
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let poly = clip_near(&tri);
        assert_eq!(poly.len(), 3);
        // Output may be a rotation of the input; match every vertex.
        for v in poly.iter() {
            assert!(
                tri.iter().any(|t| (t.world - v.world).length() < 1e-6),
                "unexpected vertex at {}",
                v.world
            );
        }
        assert_eq!(fan(&poly).len(), 1);
    }

    #[test]
    fn vertex_on_the_plane_counts_as_inside() {
        // Hand-built clip coordinates so z + w is exactly zero.
        let v = |clip: glam::Vec4| ClipVertex {
            clip,
            world: Vec3::ZERO,
            normal: Vec3::Z,
            uv: Vec2::ZERO,
        };
        let tri = [
            v(glam::Vec4::new(0.0, 0.0, -2.0, 2.0)),
            v(glam::Vec4::new(1.0, 0.0, 0.0, 3.0)),
            v(glam::Vec4::new(0.0, 1.0, 0.0, 3.0)),
        ];
        assert_eq!(near_distance(&tri[0]), 0.0);
        assert_eq!(clip_near(&tri).len(), 3);
    }
}

mod fully_outside {
    use super::*;

    #[test]
    fn returns_nothing() {
        let cam = camera();
        // Entirely behind the camera plane.
        let poly = clip_near(&clip_triangle(
            &cam,
            Vec3::new(-1.0, -1.0, 6.0),
            Vec3::new(1.0, -1.0, 6.0),
            Vec3::new(0.0, 1.0, 5.5),
        ));
        assert!(poly.is_empty());
        assert!(fan(&poly).is_empty());
    }
}

mod crossing {
    use super::*;

    /// One vertex between the camera and the near plane, two in front.
    fn crossing_triangle(cam: &Camera) -> [ClipVertex; 3] {
        clip_triangle(
            cam,
            Vec3::new(0.0, 1.0, 4.9),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
        )
    }

    #[test]
    fn one_clipped_vertex_yields_a_quad() {
        let cam = camera();
        let poly = clip_near(&crossing_triangle(&cam));
        assert_eq!(poly.len(), 4);
        assert_eq!(fan(&poly).len(), 2);
    }

    #[test]
    fn boundary_vertices_sit_on_the_plane() {
        let cam = camera();
        let poly = clip_near(&crossing_triangle(&cam));
        let boundary: Vec<_> = poly
            .iter()
            .filter(|v| near_distance(v).abs() < 1e-4)
            .collect();
        assert_eq!(boundary.len(), 2, "expected two plane intersections");
    }

    #[test]
    fn attributes_interpolate_linearly() {
        let cam = camera();
        let mut tri = crossing_triangle(&cam);
        tri[0].uv = Vec2::new(1.0, 0.0);
        tri[1].uv = Vec2::new(0.0, 1.0);
        tri[2].uv = Vec2::new(0.0, 0.0);
        let poly = clip_near(&tri);

        for v in poly.iter().filter(|v| near_distance(v).abs() < 1e-4) {
            // Each boundary vertex lies on an edge from the clipped corner;
            // its world position and uv must agree on the same parameter.
            let t_world = (v.world - tri[0].world).length()
                / (if (v.uv.y - 0.0).abs() > 1e-6 {
                    tri[1].world - tri[0].world
                } else {
                    tri[2].world - tri[0].world
                })
                .length();
            let t_uv = 1.0 - v.uv.x;
            assert!(
                (t_world - t_uv).abs() < 1e-4,
                "world t {t_world} vs uv t {t_uv}"
            );
        }
    }

    #[test]
    fn two_clipped_vertices_yield_a_triangle() {
        let cam = camera();
        let poly = clip_near(&clip_triangle(
            &cam,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, 4.9),
            Vec3::new(1.0, -1.0, 4.9),
        ));
        assert_eq!(poly.len(), 3);
        assert_eq!(fan(&poly).len(), 1);
    }
}
