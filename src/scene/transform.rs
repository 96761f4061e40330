use glam::{Mat4, Vec3, Vec4};

use crate::math;

/// Half-diagonal of the unit cube face (vertices at ±1), the radius every
/// cube starts with.
pub const UNIT_CUBE_RADIUS: f32 = std::f32::consts::SQRT_2;

/// Conservative (center, radius) proxy used by the visibility test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    #[must_use]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Packed `center.xyz + radius` form.
    #[inline]
    #[must_use]
    pub fn to_vec4(self) -> Vec4 {
        self.center.extend(self.radius)
    }
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::new(Vec3::ZERO, UNIT_CUBE_RADIUS)
    }
}

/// Per-object transform component.
///
/// Owns the scale / rotation / translation sub-matrices of a single object and
/// a lazily rebuilt model matrix:
///
/// ```text
/// local = translation × (rotation × scale)
/// model = parent × local          (parent optional)
/// ```
///
/// Both stages carry their own dirty flag. A parent change only re-applies
/// the parent product; the local product is rebuilt only after a local
/// mutation. Reading the model matrix twice without a mutation in between
/// returns the same bits without recomputing anything.
#[derive(Debug, Clone)]
pub struct Transform {
    scale: Mat4,
    rotation: Mat4,
    translation: Mat4,
    parent: Option<Mat4>,

    // === 矩阵缓存 ===
    local_matrix: Mat4,
    model_matrix: Mat4,

    // === 脏检查状态 ===
    local_dirty: bool,
    parent_dirty: bool,

    bounding_sphere: BoundingSphere,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scale: Mat4::IDENTITY,
            rotation: Mat4::IDENTITY,
            translation: Mat4::IDENTITY,
            parent: None,

            local_matrix: Mat4::IDENTITY,
            model_matrix: Mat4::IDENTITY,

            local_dirty: false,
            parent_dirty: false,

            bounding_sphere: BoundingSphere::default(),
        }
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Non-uniform scale. The bounding radius follows the largest axis.
    pub fn set_scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.scale = math::scale(sx, sy, sz);
        let largest = sx.abs().max(sy.abs()).max(sz.abs());
        self.bounding_sphere.radius = UNIT_CUBE_RADIUS * largest;
        self.local_dirty = true;
    }

    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = math::uniform_scale(s);
        self.bounding_sphere.radius = UNIT_CUBE_RADIUS * s.abs();
        self.local_dirty = true;
    }

    /// Euler rotation in degrees, applied X then Y then Z.
    pub fn set_rotate(&mut self, rx: f32, ry: f32, rz: f32) {
        self.rotation = math::rotate(rx, ry, rz);
        self.local_dirty = true;
    }

    /// Moves the object and its bounding-sphere center.
    pub fn set_translate(&mut self, tx: f32, ty: f32, tz: f32) {
        self.translation = math::translate(tx, ty, tz);
        self.bounding_sphere.center = Vec3::new(tx, ty, tz);
        self.local_dirty = true;
    }

    /// Stores an external matrix that is applied on top of the local product.
    pub fn set_parent_model(&mut self, parent: Mat4) {
        self.parent = Some(parent);
        self.parent_dirty = true;
    }

    pub fn clear_parent_model(&mut self) {
        if self.parent.take().is_some() {
            self.parent_dirty = true;
        }
    }

    // ========================================================================
    // 核心逻辑：惰性更新
    // ========================================================================

    /// Brings the cached model matrix up to date.
    ///
    /// Returns `true` when anything was recomputed.
    pub fn update_model_matrix(&mut self) -> bool {
        if !self.local_dirty && !self.parent_dirty {
            return false;
        }

        if self.local_dirty {
            self.local_matrix = self.translation * (self.rotation * self.scale);
            self.local_dirty = false;
        }

        self.model_matrix = match &self.parent {
            Some(parent) => *parent * self.local_matrix,
            None => self.local_matrix,
        };
        self.parent_dirty = false;

        true
    }

    /// Current model matrix, recomputed only if a mutator ran since the last read.
    pub fn model_matrix(&mut self) -> &Mat4 {
        self.update_model_matrix();
        &self.model_matrix
    }

    /// Cached matrix without triggering a rebuild. May be stale.
    #[inline]
    #[must_use]
    pub fn cached_model_matrix(&self) -> &Mat4 {
        &self.model_matrix
    }

    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.local_dirty || self.parent_dirty
    }

    #[inline]
    #[must_use]
    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.bounding_sphere
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.bounding_sphere.center
    }

    #[inline]
    #[must_use]
    pub fn parent_model(&self) -> Option<&Mat4> {
        self.parent.as_ref()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
