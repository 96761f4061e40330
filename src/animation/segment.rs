use serde::Deserialize;
use smallvec::SmallVec;

use crate::animation::values::{bezier2_into, hold_into, lerp_into, smoothstep};

/// Inline storage for a control point; every authored channel fits in four floats.
pub type ControlVector = SmallVec<[f32; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMode {
    /// Holds `control0` for the whole window.
    Constant,
    /// Blends on the raw normalized time.
    #[default]
    Linear,
    /// Blends on the smoothstep-remapped normalized time.
    Hermite,
}

impl InterpolationMode {
    /// Parses the markup flag. Unknown or missing flags fall back to linear.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("hermite") => InterpolationMode::Hermite,
            Some("constant") => InterpolationMode::Constant,
            _ => InterpolationMode::Linear,
        }
    }
}

/// An authored time window with one to three control points.
///
/// The number of non-empty control vectors selects the blend: one point is
/// held, two are blended linearly, three follow a quadratic Bézier.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSegment {
    pub id: i32,
    pub interpolation: InterpolationMode,
    pub time_start: f32,
    pub time_end: f32,
    pub control0: ControlVector,
    pub control1: ControlVector,
    pub control2: ControlVector,
}

impl ControlSegment {
    /// Single-point segment. Use [`with_control1`](Self::with_control1) and
    /// [`with_control2`](Self::with_control2) to add blend points.
    #[must_use]
    pub fn new(
        id: i32,
        interpolation: InterpolationMode,
        time_start: f32,
        time_end: f32,
        control0: &[f32],
    ) -> Self {
        Self {
            id,
            interpolation,
            time_start,
            time_end,
            control0: ControlVector::from_slice(control0),
            control1: ControlVector::new(),
            control2: ControlVector::new(),
        }
    }

    #[must_use]
    pub fn with_control1(mut self, control1: &[f32]) -> Self {
        self.control1 = ControlVector::from_slice(control1);
        self
    }

    #[must_use]
    pub fn with_control2(mut self, control2: &[f32]) -> Self {
        self.control2 = ControlVector::from_slice(control2);
        self
    }

    /// Inclusive on both ends.
    #[inline]
    #[must_use]
    pub fn contains(&self, time: f32) -> bool {
        self.time_start <= time && time <= self.time_end
    }

    #[must_use]
    pub fn control_point_count(&self) -> usize {
        if !self.control2.is_empty() {
            3
        } else if !self.control1.is_empty() {
            2
        } else {
            1
        }
    }

    /// Position of `time` inside the window, remapped by the interpolation mode.
    ///
    /// A zero-length window yields `0`.
    #[must_use]
    pub fn normalized_t(&self, time: f32) -> f32 {
        let span = self.time_end - self.time_start;
        let t = if span > 0.0 {
            (time - self.time_start) / span
        } else {
            0.0
        };

        match self.interpolation {
            InterpolationMode::Hermite => smoothstep(t),
            InterpolationMode::Linear | InterpolationMode::Constant => t,
        }
    }

    /// Blends the control points at an already normalized `t`.
    pub fn blend_into(&self, t: f32, out: &mut [f32]) {
        if self.interpolation == InterpolationMode::Constant {
            hold_into(out, &self.control0);
            return;
        }

        match self.control_point_count() {
            3 => bezier2_into(out, &self.control0, &self.control1, &self.control2, t),
            2 => lerp_into(out, &self.control0, &self.control1, t),
            _ => hold_into(out, &self.control0),
        }
    }

    /// Evaluates the segment at an absolute `time`.
    pub fn sample_into(&self, time: f32, out: &mut [f32]) {
        self.blend_into(self.normalized_t(time), out);
    }
}
