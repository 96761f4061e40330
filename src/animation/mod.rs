//! Keyframe curve engine.
//!
//! - [`ControlSegment`]: a time window with one to three control vectors
//! - [`Channel`]: segments of one animated value, scanned in authoring order
//! - [`Timeline`]: the five channels that drive a frame (model selector,
//!   camera position, look-at, light position, foreground color)
//! - [`values`]: the blend kernels (hold, linear, quadratic Bézier, smoothstep)

mod document;
pub mod channel;
pub mod segment;
pub mod timeline;
pub mod values;

pub use channel::Channel;
pub use segment::{ControlSegment, ControlVector, InterpolationMode};
pub use timeline::{ChannelKind, Timeline, TimelineState};
