#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! Timeline-driven animation core for a field of cubes.
//!
//! Each frame, [`SceneAnimator::tick`] evaluates the keyframe [`Timeline`],
//! advances the active [`CubeSet`], composes model matrices through
//! [`Transform`] and culls bounding spheres against the camera [`Frustum`].
//! The resulting [`FrameState`] is played back on a graphics API through the
//! [`DrawBackend`] trait by a [`FrameRecorder`].

pub mod animation;
pub mod app;
pub mod errors;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod utils;

pub use animation::{ChannelKind, ControlSegment, InterpolationMode, Timeline, TimelineState};
pub use app::AnimationThread;
pub use errors::{CubismError, Result};
pub use renderer::{
    BloomParams, DrawBackend, FrameRecorder, ProgramKind, RendererSettings, ShaderHandle,
    ShaderHandleCache, ShadowTechnique,
};
pub use scene::{
    BoundingSphere, Camera, CubeSet, FrameState, Frustum, ModelLayout, SceneAnimator, Transform,
    Visibility,
};
pub use utils::{ManualClock, PlaybackClock, Timer};
