//! Rendering glue.
//!
//! The crate does not talk to a graphics API itself. It prepares everything a
//! backend needs and hands it over through [`DrawBackend`]:
//!
//! - [`RendererSettings`]: startup configuration
//! - [`ShaderHandleCache`] / [`ProgramLibrary`]: name → location memo per program
//! - [`BloomParams`]: blur kernel uniforms for the current viewport
//! - [`FrameRecorder`]: shadow, scene and bloom passes for one [`FrameState`](crate::scene::FrameState)

pub mod bloom;
pub mod pass;
pub mod programs;
pub mod settings;
pub mod shader_handles;

pub use bloom::BloomParams;
pub use pass::{DrawBackend, FrameRecorder, RenderTarget, TextureSource, UniformValue, VertexStream};
pub use programs::{ProgramKind, ProgramLibrary};
pub use settings::{RendererSettings, ShadowTechnique};
pub use shader_handles::{HandleResolver, ShaderHandle, ShaderHandleCache};
