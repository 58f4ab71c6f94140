//! Matrix builders and coordinate mappings with the renderer's conventions.
//!
//! Everything here acts on column vectors (`result = M * v`). Rotation
//! builders negate the angle before applying sin/cos, so a positive yaw
//! turns the camera left; callers rely on that sign.

use glam::{Mat3, Mat4, Vec3, Vec4};

/// Perspective projection matrix.
///
/// `fov_deg` is the vertical field of view in degrees. With `t =
/// tan(fov * pi / 360)` the matrix scales x by `1/(aspect*t)`, y by `1/t`,
/// and maps view-space z into clip z with `w = -z`, so depth survives the
/// perspective divide.
pub fn perspective(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let t = (fov_deg * core::f32::consts::PI / 360.0).tan();
    Mat4::from_cols(
        Vec4::new(1.0 / (aspect * t), 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0 / t, 0.0, 0.0),
        Vec4::new(0.0, 0.0, (far + near) / (near - far), -1.0),
        Vec4::new(0.0, 0.0, 2.0 * far * near / (near - far), 0.0),
    )
}

/// Rotation around the X axis by `theta` radians (inverse-angle convention).
pub fn rotate_x(theta: f32) -> Mat4 {
    Mat4::from_rotation_x(-theta)
}

/// Rotation around the Y axis by `theta` radians (inverse-angle convention).
pub fn rotate_y(theta: f32) -> Mat4 {
    Mat4::from_rotation_y(-theta)
}

/// Rotation around the Z axis by `theta` radians (inverse-angle convention).
pub fn rotate_z(theta: f32) -> Mat4 {
    Mat4::from_rotation_z(-theta)
}

/// Affine translation matrix.
pub fn translate(offset: Vec3) -> Mat4 {
    Mat4::from_translation(offset)
}

/// Affine scale matrix.
pub fn scale(factors: Vec3) -> Mat4 {
    Mat4::from_scale(factors)
}

/// Inverse-transpose of the upper-left 3x3 of an affine transform.
///
/// This is the matrix that keeps normals perpendicular to surfaces under
/// non-uniform scaling. The caller guarantees the linear part is invertible;
/// a singular input yields an undefined result.
pub fn normal_matrix(m: &Mat4) -> Mat3 {
    Mat3::from_mat4(*m).inverse().transpose()
}

/// Map an NDC point to pixel coordinates, preserving z for depth testing.
///
/// NDC x/y in [-1, 1] map to `[0, width]` / `[0, height]` with y flipped so
/// +y in NDC is up on screen.
pub fn ndc_to_screen(ndc: Vec3, width: u32, height: u32) -> Vec3 {
    Vec3::new(
        (ndc.x + 1.0) * 0.5 * width as f32,
        (1.0 - ndc.y) * 0.5 * height as f32,
        ndc.z,
    )
}

/// Normalize a vector, leaving zero-length input untouched.
pub fn normalize_safe(v: Vec3) -> Vec3 {
    let len = v.length();
    if len == 0.0 {
        v
    } else {
        v / len
    }
}
