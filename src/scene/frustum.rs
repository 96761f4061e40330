//! View-frustum extraction and sphere classification.
//!
//! Planes are pulled straight out of a combined view-projection matrix
//! (Gribb-Hartmann). Each plane is stored as `(a, b, c, d)` with the normal
//! pointing into the frustum, so `a·x + b·y + c·z + d` is positive for points
//! on the visible side.

use glam::{Mat4, Vec3, Vec4};

use crate::scene::transform::BoundingSphere;

/// Lengths below this are a degenerate input matrix.
const MIN_PLANE_LENGTH: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    Left = 0,
    Right = 1,
    Bottom = 2,
    Top = 3,
    Near = 4,
    Far = 5,
}

impl PlaneSide {
    pub const ALL: [PlaneSide; 6] = [
        PlaneSide::Left,
        PlaneSide::Right,
        PlaneSide::Bottom,
        PlaneSide::Top,
        PlaneSide::Near,
        PlaneSide::Far,
    ];
}

/// Result of testing a bounding sphere against the frustum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Entirely behind at least one plane.
    Outside,
    /// Straddles a plane (reported as soon as the first straddled plane is met).
    Intersecting,
    /// In front of every plane.
    Inside,
}

impl Visibility {
    #[inline]
    #[must_use]
    pub fn is_visible(self) -> bool {
        !matches!(self, Visibility::Outside)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frustum {
    planes: [Vec4; 6], // Left, Right, Bottom, Top, Near, Far
}

impl Frustum {
    /// Extracts the six clip planes of `view_projection`.
    ///
    /// Each plane is divided by the length of its full `(a, b, c, d)` vector,
    /// not only the normal part. Signs are preserved, distances are scaled
    /// down, which only ever makes the sphere test more permissive.
    #[must_use]
    pub fn from_matrix(m: Mat4) -> Self {
        let rows = [m.row(0), m.row(1), m.row(2), m.row(3)];

        let planes = [
            rows[3] + rows[0], // Left
            rows[3] - rows[0], // Right
            rows[3] + rows[1], // Bottom
            rows[3] - rows[1], // Top
            rows[3] + rows[2], // Near
            rows[3] - rows[2], // Far
        ]
        .map(normalize_plane);

        Self { planes }
    }

    #[inline]
    #[must_use]
    pub fn planes(&self) -> &[Vec4; 6] {
        &self.planes
    }

    #[inline]
    #[must_use]
    pub fn plane(&self, side: PlaneSide) -> Vec4 {
        self.planes[side as usize]
    }

    /// Signed distance of `point` to the plane on `side` (positive = inside).
    #[inline]
    #[must_use]
    pub fn signed_distance(&self, side: PlaneSide, point: Vec3) -> f32 {
        plane_distance(self.planes[side as usize], point)
    }

    /// Classifies a sphere with early exit.
    ///
    /// Planes are visited in [`PlaneSide::ALL`] order: left, right, bottom,
    /// top, near, far. The first plane that rejects the sphere yields
    /// [`Visibility::Outside`], the first plane the sphere straddles yields
    /// [`Visibility::Intersecting`] without looking at the remaining planes.
    /// A large sphere that straddles an early plane while lying behind a
    /// later one is therefore kept. The test may keep invisible spheres but
    /// never drops a visible one.
    #[must_use]
    pub fn classify_sphere(&self, center: Vec3, radius: f32) -> Visibility {
        for plane in &self.planes {
            let dist = plane_distance(*plane, center);
            if dist <= -radius {
                return Visibility::Outside;
            }
            if dist.abs() < radius {
                return Visibility::Intersecting;
            }
        }
        Visibility::Inside
    }

    #[inline]
    #[must_use]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.classify_sphere(center, radius).is_visible()
    }

    #[inline]
    #[must_use]
    pub fn intersects(&self, sphere: &BoundingSphere) -> bool {
        self.intersects_sphere(sphere.center, sphere.radius)
    }
}

#[inline]
fn plane_distance(plane: Vec4, point: Vec3) -> f32 {
    plane.truncate().dot(point) + plane.w
}

/// Scales a plane to unit `(a, b, c, d)` length.
///
/// A zero-length plane means the view-projection matrix was degenerate. Debug
/// builds stop here; release builds clamp the divisor and keep going.
fn normalize_plane(plane: Vec4) -> Vec4 {
    let length = plane.length();
    debug_assert!(
        length >= MIN_PLANE_LENGTH,
        "degenerate frustum plane {plane:?} (length {length})"
    );
    if length < MIN_PLANE_LENGTH {
        log::warn!("Degenerate frustum plane {plane:?}, clamping normalization");
        return plane / MIN_PLANE_LENGTH;
    }
    plane / length
}
