use glam::{Mat4, Vec3, Vec4};

/// Depth epsilon used by the shadow-volume extrusion matrix.
const EXTRUDE_EPSILON: f32 = 0.001;

/// Below this length a look-at direction is treated as degenerate.
const MIN_LOOK_DISTANCE_SQ: f32 = 1e-12;

#[inline]
#[must_use]
pub fn identity() -> Mat4 {
    Mat4::IDENTITY
}

#[inline]
#[must_use]
pub fn scale(sx: f32, sy: f32, sz: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(sx, sy, sz))
}

#[inline]
#[must_use]
pub fn uniform_scale(s: f32) -> Mat4 {
    Mat4::from_scale(Vec3::splat(s))
}

#[inline]
#[must_use]
pub fn translate(tx: f32, ty: f32, tz: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(tx, ty, tz))
}

/// Euler rotation from angles in **degrees**.
///
/// The X rotation is applied first, then Y, then Z: `R = Rz · Ry · Rx`.
#[must_use]
pub fn rotate(rx: f32, ry: f32, rz: f32) -> Mat4 {
    Mat4::from_rotation_z(rz.to_radians())
        * Mat4::from_rotation_y(ry.to_radians())
        * Mat4::from_rotation_x(rx.to_radians())
}

/// Symmetric perspective projection with an OpenGL depth range (`[-1, 1]`).
///
/// `fovy` is the full vertical field of view in degrees.
#[inline]
#[must_use]
pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh_gl(fovy.to_radians(), aspect, near, far)
}

/// Off-axis (asymmetric) perspective projection, OpenGL depth range.
#[must_use]
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;

    Mat4::from_cols(
        Vec4::new(2.0 * near / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / height, 0.0, 0.0),
        Vec4::new(
            (right + left) / width,
            (top + bottom) / height,
            -(far + near) / depth,
            -1.0,
        ),
        Vec4::new(0.0, 0.0, -2.0 * far * near / depth, 0.0),
    )
}

/// Infinite projection used to push shadow-volume caps towards infinity.
///
/// Identical to [`perspective`] in X/Y; the far plane is replaced by a
/// slightly-less-than-one depth mapping so extruded vertices stay inside the
/// clip volume.
#[must_use]
pub fn extrude(fovy: f32, aspect: f32, near: f32) -> Mat4 {
    let h = near * (fovy * std::f32::consts::PI / 360.0).tan();
    let w = h * aspect;

    Mat4::from_cols(
        Vec4::new(near / w, 0.0, 0.0, 0.0),
        Vec4::new(0.0, near / h, 0.0, 0.0),
        Vec4::new(0.0, 0.0, EXTRUDE_EPSILON - 1.0, -1.0),
        Vec4::new(0.0, 0.0, near * (EXTRUDE_EPSILON - 2.0), 0.0),
    )
}

/// Right-handed view matrix.
///
/// A degenerate configuration (eye on the target, or viewing direction
/// parallel to `up`) falls back to a pure translation so the result never
/// contains NaN.
#[must_use]
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let forward = target - eye;
    if forward.length_squared() < MIN_LOOK_DISTANCE_SQ
        || forward.cross(up).length_squared() < MIN_LOOK_DISTANCE_SQ
    {
        return Mat4::from_translation(-eye);
    }
    Mat4::look_at_rh(eye, target, up)
}

#[inline]
#[must_use]
pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
    *a * *b
}

/// Column-major float layout (GL `uniformMatrix4fv` with `transpose = false`).
#[inline]
#[must_use]
pub fn to_column_array(m: &Mat4) -> [f32; 16] {
    m.to_cols_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn mat_approx(a: &Mat4, b: &Mat4) -> bool {
        a.to_cols_array()
            .iter()
            .zip(b.to_cols_array().iter())
            .all(|(x, y)| (x - y).abs() < EPSILON)
    }

    #[test]
    fn rotate_matches_legacy_column_layout() {
        let (rx, ry, rz) = (30.0_f32, 45.0_f32, 60.0_f32);
        let m = rotate(rx, ry, rz).to_cols_array();

        let (s0, c0) = rx.to_radians().sin_cos();
        let (s1, c1) = ry.to_radians().sin_cos();
        let (s2, c2) = rz.to_radians().sin_cos();

        let expected = [
            c1 * c2,
            c1 * s2,
            -s1,
            0.0,
            -c0 * s2 + s0 * s1 * c2,
            c0 * c2 + s0 * s1 * s2,
            s0 * c1,
            0.0,
            s0 * s2 + c0 * s1 * c2,
            -s0 * c2 + c0 * s1 * s2,
            c0 * c1,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ];
        for (i, (a, b)) in m.iter().zip(expected.iter()).enumerate() {
            assert!((a - b).abs() < EPSILON, "element {i}: {a} vs {b}");
        }
    }

    #[test]
    fn symmetric_frustum_equals_perspective() {
        let (near, far) = (0.1, 40.0);
        let h = near * (45.0_f32 * std::f32::consts::PI / 360.0).tan();
        let w = h * 1.5;
        let off_axis = frustum(-w, w, -h, h, near, far);
        assert!(mat_approx(&off_axis, &perspective(45.0, 1.5, near, far)));
    }

    #[test]
    fn extrude_keeps_far_points_inside_clip_volume() {
        let m = extrude(45.0, 1.0, 0.1);
        let clip = m * Vec4::new(0.0, 0.0, -1.0e6, 1.0);
        let ndc_z = clip.z / clip.w;
        assert!(ndc_z < 1.0 && ndc_z > 0.99, "got {ndc_z}");
    }

    #[test]
    fn look_at_degenerate_is_finite() {
        let v = look_at(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert!(v.is_finite());
        let v = look_at(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(v.is_finite());
    }
}
