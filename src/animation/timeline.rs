use std::path::Path;

use glam::{Vec3, Vec4};

use crate::animation::channel::Channel;
use crate::animation::segment::ControlSegment;
use crate::animation::values::hold_into;
use crate::errors::Result;

/// The fixed set of channels a timeline drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Discrete selector of the active object set; its first output
    /// component is the set's interpolation progress.
    Model = 0,
    CameraPosition = 1,
    CameraLookAt = 2,
    LightPosition = 3,
    ForegroundColor = 4,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 5] = [
        ChannelKind::Model,
        ChannelKind::CameraPosition,
        ChannelKind::CameraLookAt,
        ChannelKind::LightPosition,
        ChannelKind::ForegroundColor,
    ];

    /// Element name used by timeline documents.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            ChannelKind::Model => "m",
            ChannelKind::CameraPosition => "cp",
            ChannelKind::CameraLookAt => "la",
            ChannelKind::LightPosition => "lp",
            ChannelKind::ForegroundColor => "fg",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    #[must_use]
    pub fn dimension(self) -> usize {
        match self {
            ChannelKind::Model => 1,
            ChannelKind::CameraPosition | ChannelKind::CameraLookAt | ChannelKind::LightPosition => 3,
            ChannelKind::ForegroundColor => 4,
        }
    }
}

/// Per-tick channel outputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimelineState {
    pub camera_position: Vec3,
    pub camera_look_at: Vec3,
    pub light_position: Vec3,
    pub foreground_color: Vec4,
    /// Id of the last matched model-selector segment.
    pub model_id: i32,
    /// Progress handed to the active object set.
    pub model_progress: f32,
}

/// Keyframe timeline: one [`Channel`] per [`ChannelKind`].
#[derive(Debug, Clone)]
pub struct Timeline {
    channels: [Channel; 5],
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self {
            channels: ChannelKind::ALL.map(|kind| Channel::new(kind.dimension())),
        }
    }

    /// Appends a segment; authoring order is preserved per channel.
    pub fn push(&mut self, kind: ChannelKind, segment: ControlSegment) {
        self.channels[kind as usize].push(segment);
    }

    #[inline]
    #[must_use]
    pub fn channel(&self, kind: ChannelKind) -> &Channel {
        &self.channels[kind as usize]
    }

    #[inline]
    pub fn channel_mut(&mut self, kind: ChannelKind) -> &mut Channel {
        &mut self.channels[kind as usize]
    }

    /// Evaluates every channel once at `time` and writes the results into `state`.
    ///
    /// Channels without a segment covering `time` keep their previous value.
    /// Non-monotonic time (seeking) needs no special handling since nothing
    /// is cached between calls besides the outputs.
    pub fn interpolate(&mut self, time: f32, state: &mut TimelineState) {
        let model = &mut self.channels[ChannelKind::Model as usize];
        if let Some(id) = model.evaluate(time) {
            state.model_id = id;
            state.model_progress = model.output().first().copied().unwrap_or(0.0);
        }

        state.camera_position = self.evaluate_vec3(ChannelKind::CameraPosition, time);
        state.camera_look_at = self.evaluate_vec3(ChannelKind::CameraLookAt, time);
        state.light_position = self.evaluate_vec3(ChannelKind::LightPosition, time);

        let fg = &mut self.channels[ChannelKind::ForegroundColor as usize];
        fg.evaluate(time);
        let mut color = [0.0_f32; 4];
        hold_into(&mut color, fg.output());
        state.foreground_color = Vec4::from_array(color);
    }

    fn evaluate_vec3(&mut self, kind: ChannelKind, time: f32) -> Vec3 {
        let channel = &mut self.channels[kind as usize];
        channel.evaluate(time);
        let mut value = [0.0_f32; 3];
        hold_into(&mut value, channel.output());
        Vec3::from_array(value)
    }

    /// Latest segment end over all channels.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.channels
            .iter()
            .map(Channel::end_time)
            .fold(0.0_f32, f32::max)
    }

    /// Parses a timeline document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        crate::animation::document::parse_timeline(json)
    }

    /// Reads and parses a timeline document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
