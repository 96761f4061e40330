//! Per-frame driver.
//!
//! [`SceneAnimator::tick`] runs the whole CPU side of a frame: evaluate the
//! timeline, advance the active object set, point the camera and the light,
//! refresh model matrices and cull against the camera frustum (and, for
//! shadow maps, against each of the six light faces). The result is a
//! [`FrameState`] that a draw backend can consume without touching the scene.

use glam::{Mat4, Vec3};

use crate::animation::{Timeline, TimelineState};
use crate::renderer::RendererSettings;
use crate::scene::camera::{Camera, CubeFace, ShadowLight};
use crate::scene::cube_set::CubeSet;
use crate::scene::frustum::Frustum;

/// Everything the draw passes need for one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameState {
    pub time: f32,
    pub timeline: TimelineState,
    /// Index of the object set being drawn, if any.
    pub active_set: Option<usize>,

    // === 相机矩阵 ===
    pub view_matrix: Mat4,
    pub projection_matrix: Mat4,
    pub view_projection_matrix: Mat4,

    // === 光源矩阵 ===
    pub light_view_matrix: Mat4,
    pub light_projection_matrix: Mat4,

    /// Model matrix of every object in the active set.
    pub models: Vec<Mat4>,
    /// Indices into `models` that pass the camera frustum test.
    pub visible: Vec<usize>,
    /// Per shadow face, indices into `models` inside that face's frustum.
    /// Empty unless the shadow-map technique is active.
    pub shadow_visible: [Vec<usize>; 6],
}

impl FrameState {
    /// Model matrices of the camera-visible objects, in draw order.
    pub fn visible_models(&self) -> impl Iterator<Item = &Mat4> {
        self.visible.iter().map(|&i| &self.models[i])
    }

    #[must_use]
    pub fn shadow_face_models(&self, face: CubeFace) -> impl Iterator<Item = &Mat4> {
        self.shadow_visible[face as usize]
            .iter()
            .map(|&i| &self.models[i])
    }
}

/// Owns the timeline, the object sets and the view state.
#[derive(Debug, Clone)]
pub struct SceneAnimator {
    timeline: Timeline,
    object_sets: Vec<CubeSet>,
    camera: Camera,
    light: ShadowLight,
    cull_shadow_faces: bool,
    active_set: Option<usize>,
    /// Last model id that had no object set, so the warning fires once.
    unknown_model: Option<i32>,
    frame: FrameState,
}

impl SceneAnimator {
    #[must_use]
    pub fn new(timeline: Timeline, object_sets: Vec<CubeSet>, settings: &RendererSettings) -> Self {
        let camera = Camera::new_perspective(settings.fov, settings.aspect(), settings.near, settings.far);
        let light = ShadowLight::new(settings.light_fov, settings.near, settings.far);
        let active_set = if object_sets.is_empty() { None } else { Some(0) };

        Self {
            timeline,
            object_sets,
            camera,
            light,
            cull_shadow_faces: settings.shadow.uses_cube_faces(),
            active_set,
            unknown_model: None,
            frame: FrameState::default(),
        }
    }

    /// Builds one object set per configured layout, all from the settings seed.
    #[must_use]
    pub fn from_settings(timeline: Timeline, settings: &RendererSettings) -> Self {
        let sets = settings
            .layouts
            .iter()
            .map(|layout| CubeSet::from_layout(layout, settings.seed))
            .collect();
        Self::new(timeline, sets, settings)
    }

    /// Advances everything to `time` seconds and returns the frame.
    pub fn tick(&mut self, time: f32) -> &FrameState {
        self.frame.time = time;
        self.timeline.interpolate(time, &mut self.frame.timeline);
        let state = self.frame.timeline;

        self.select_set(state.model_id);
        self.frame.active_set = self.active_set;

        self.camera.look_at(state.camera_position, state.camera_look_at);
        self.light.set_position(state.light_position);

        self.frame.view_matrix = *self.camera.view_matrix();
        self.frame.projection_matrix = *self.camera.projection_matrix();
        self.frame.view_projection_matrix = *self.camera.view_projection_matrix();
        self.frame.light_view_matrix = *self.light.view_matrix();
        self.frame.light_projection_matrix = *self.light.projection_matrix();

        match self.active_set.and_then(|i| self.object_sets.get_mut(i)) {
            Some(set) => {
                set.set_interpolation(state.model_progress);
                set.collect_model_matrices(&mut self.frame.models);
            }
            None => self.frame.models.clear(),
        }

        self.cull();
        &self.frame
    }

    fn select_set(&mut self, model_id: i32) {
        let index = usize::try_from(model_id).ok().filter(|&i| i < self.object_sets.len());
        match index {
            Some(i) => {
                self.active_set = Some(i);
                self.unknown_model = None;
            }
            None => {
                if self.unknown_model != Some(model_id) {
                    log::warn!(
                        "Model id {model_id} has no object set ({} loaded), keeping the previous set",
                        self.object_sets.len()
                    );
                    self.unknown_model = Some(model_id);
                }
            }
        }
    }

    fn cull(&mut self) {
        let spheres: Vec<(Vec3, f32)> = match self.active_set.and_then(|i| self.object_sets.get(i)) {
            Some(set) => set
                .bounding_spheres()
                .map(|sphere| (sphere.center, sphere.radius))
                .collect(),
            None => Vec::new(),
        };

        fill_visible(self.camera.frustum(), &spheres, &mut self.frame.visible);

        for face in CubeFace::ALL {
            let out = &mut self.frame.shadow_visible[face as usize];
            if self.cull_shadow_faces {
                fill_visible(&self.light.face_frustum(face), &spheres, out);
            } else {
                out.clear();
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn frame(&self) -> &FrameState {
        &self.frame
    }

    #[inline]
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[inline]
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    #[must_use]
    pub fn light(&self) -> &ShadowLight {
        &self.light
    }

    #[must_use]
    pub fn object_sets(&self) -> &[CubeSet] {
        &self.object_sets
    }

    #[inline]
    #[must_use]
    pub fn active_set(&self) -> Option<usize> {
        self.active_set
    }

    /// Updates the camera aspect after a viewport resize.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let aspect = if height == 0 { 1.0 } else { width as f32 / height as f32 };
        self.camera.set_aspect(aspect);
    }
}

fn fill_visible(frustum: &Frustum, spheres: &[(Vec3, f32)], out: &mut Vec<usize>) {
    out.clear();
    out.extend(
        spheres
            .iter()
            .enumerate()
            .filter(|(_, (center, radius))| frustum.intersects_sphere(*center, *radius))
            .map(|(i, _)| i),
    );
}
