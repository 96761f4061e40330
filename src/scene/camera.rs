use glam::{Mat4, Vec3};

use crate::math;
use crate::scene::frustum::Frustum;

/// Perspective viewer driven by a position and a look-at target.
#[derive(Debug, Clone)]
pub struct Camera {
    // === 投影属性 ===
    pub fov: f32, // degrees
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub up: Vec3,

    position: Vec3,
    target: Vec3,

    // 缓存的矩阵
    view_matrix: Mat4,
    projection_matrix: Mat4,
    view_projection_matrix: Mat4,
    frustum: Frustum,
}

impl Camera {
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov,
            aspect,
            near,
            far,
            up: Vec3::Y,

            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,

            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
            frustum: Frustum::default(),
        };

        cam.update_projection_matrix();
        cam.look_at(cam.position, cam.target);
        cam
    }

    /// Rebuilds the projection after `fov`, `aspect`, `near` or `far` changed.
    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = math::perspective(self.fov, self.aspect, self.near, self.far);
        self.update_view_projection();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn look_at(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
        self.view_matrix = math::look_at(position, target, self.up);
        self.update_view_projection();
    }

    fn update_view_projection(&mut self) {
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
        self.frustum = Frustum::from_matrix(self.view_projection_matrix);
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }
}

// ============================================================================
// Point light with an omnidirectional (cube map) shadow
// ============================================================================

/// One face of the light's shadow cube map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveZ,
    PositiveX,
    NegativeZ,
    NegativeX,
    PositiveY,
    NegativeY,
}

impl CubeFace {
    /// Render order of the shadow faces.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveZ,
        CubeFace::PositiveX,
        CubeFace::NegativeZ,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
    ];

    /// Euler angles (degrees) that turn the light's view onto this face.
    #[must_use]
    pub fn rotation_degrees(self) -> Vec3 {
        match self {
            CubeFace::PositiveZ => Vec3::ZERO,
            CubeFace::PositiveX => Vec3::new(0.0, 90.0, 0.0),
            CubeFace::NegativeZ => Vec3::new(0.0, 180.0, 0.0),
            CubeFace::NegativeX => Vec3::new(0.0, -90.0, 0.0),
            CubeFace::PositiveY => Vec3::new(90.0, 0.0, 0.0),
            CubeFace::NegativeY => Vec3::new(-90.0, 0.0, 0.0),
        }
    }

    #[must_use]
    pub fn rotation_matrix(self) -> Mat4 {
        let r = self.rotation_degrees();
        math::rotate(r.x, r.y, r.z)
    }
}

/// Shadow-casting point light.
///
/// The light view is a pure translation by `-position`; each cube face adds
/// its own rotation in front of it and shares a square 90° projection.
#[derive(Debug, Clone)]
pub struct ShadowLight {
    position: Vec3,
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl ShadowLight {
    #[must_use]
    pub fn new(fov: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: math::perspective(fov, 1.0, near, far),
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.view_matrix = math::translate(-position.x, -position.y, -position.z);
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// `rotation(face) × light_view`, the matrix uploaded as the face's view.
    #[must_use]
    pub fn face_view_matrix(&self, face: CubeFace) -> Mat4 {
        face.rotation_matrix() * self.view_matrix
    }

    #[must_use]
    pub fn face_view_projection(&self, face: CubeFace) -> Mat4 {
        self.projection_matrix * self.face_view_matrix(face)
    }

    #[must_use]
    pub fn face_frustum(&self, face: CubeFace) -> Frustum {
        Frustum::from_matrix(self.face_view_projection(face))
    }
}
