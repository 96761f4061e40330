use glam::Mat4;

use crate::scene::layout::{ModelLayout, ObjectInitialState};
use crate::scene::transform::{BoundingSphere, Transform};

/// One cube of a set: its authored curves plus its live transform.
#[derive(Debug, Clone)]
pub struct CubeObject {
    pub initial: ObjectInitialState,
    pub transform: Transform,
}

impl CubeObject {
    #[must_use]
    pub fn new(initial: ObjectInitialState) -> Self {
        let mut object = Self {
            initial,
            transform: Transform::new(),
        };
        object.set_interpolation(0.0);
        object
    }

    /// Places the cube at set progress `t`.
    pub fn set_interpolation(&mut self, t: f32) {
        let time = t * (1.0 - self.initial.delay);

        let mut position = [0.0_f32; 3];
        let mut rotation = [0.0_f32; 3];
        let mut scale = [0.0_f32; 1];
        self.initial.position.sample_into(time, &mut position);
        self.initial.rotation.sample_into(time, &mut rotation);
        self.initial.scale.sample_into(time, &mut scale);

        self.transform.set_uniform_scale(scale[0]);
        self.transform.set_rotate(rotation[0], rotation[1], rotation[2]);
        self.transform
            .set_translate(position[0], position[1], position[2]);
    }
}

/// A set of cubes produced by one [`ModelLayout`].
#[derive(Debug, Clone, Default)]
pub struct CubeSet {
    name: String,
    objects: Vec<CubeObject>,
}

impl CubeSet {
    #[must_use]
    pub fn from_layout(layout: &ModelLayout, seed: u64) -> Self {
        let states = layout.layout(seed);
        log::debug!(
            "Built '{}' cube set with {} objects (seed {seed})",
            layout.name(),
            states.len()
        );
        Self::from_states(layout.name(), states)
    }

    #[must_use]
    pub fn from_states(name: impl Into<String>, states: Vec<ObjectInitialState>) -> Self {
        Self {
            name: name.into(),
            objects: states.into_iter().map(CubeObject::new).collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[must_use]
    pub fn objects(&self) -> &[CubeObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [CubeObject] {
        &mut self.objects
    }

    /// Advances every cube to set progress `t`.
    pub fn set_interpolation(&mut self, t: f32) {
        for object in &mut self.objects {
            object.set_interpolation(t);
        }
    }

    /// Refreshes every model matrix and copies them into `out`.
    pub fn collect_model_matrices(&mut self, out: &mut Vec<Mat4>) {
        out.clear();
        out.extend(
            self.objects
                .iter_mut()
                .map(|object| *object.transform.model_matrix()),
        );
    }

    pub fn bounding_spheres(&self) -> impl Iterator<Item = BoundingSphere> + '_ {
        self.objects
            .iter()
            .map(|object| object.transform.bounding_sphere())
    }
}
