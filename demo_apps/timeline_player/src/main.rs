//! Timeline Player
//! Headless playback of a cube-field timeline.
//!
//! Usage:
//!   timeline_player [timeline.json] [settings.json]
//!
//! Steps the animator at a fixed rate from 0 to the end of the timeline,
//! records every frame into a counting backend and logs what would be drawn.
//! Run with `RUST_LOG=info` (or `debug`) to see the output.

use anyhow::Context;
use cubism::renderer::{
    DrawBackend, FrameRecorder, ProgramKind, RenderTarget, TextureSource, UniformValue, VertexStream,
};
use cubism::utils::{ManualClock, PlaybackClock};
use cubism::{RendererSettings, SceneAnimator, Timeline};

const DEFAULT_TIMELINE: &str = "demo_apps/timeline_player/assets/timeline.json";
const FRAMES_PER_SECOND: f32 = 30.0;

/// Pretends every program exposes every name and counts the calls.
#[derive(Default)]
struct CountingBackend {
    draws: usize,
    uniforms: usize,
}

impl DrawBackend for CountingBackend {
    fn attribute_location(&self, _program: ProgramKind, name: &str) -> Option<u32> {
        name.starts_with('a').then_some(0)
    }

    fn uniform_location(&self, program: ProgramKind, name: &str) -> Option<u32> {
        program
            .handle_names()
            .iter()
            .position(|n| *n == name)
            .map(|i| i as u32)
    }

    fn bind_target(&mut self, _target: RenderTarget, _size: (u32, u32)) {}

    fn bind_texture(&mut self, _unit: u32, _source: TextureSource) {}

    fn use_program(&mut self, _program: ProgramKind) {}

    fn set_uniform(&mut self, _location: u32, _value: UniformValue) {
        self.uniforms += 1;
    }

    fn bind_attribute(&mut self, _location: u32, _stream: VertexStream) {}

    fn draw(&mut self, _stream: VertexStream) {
        self.draws += 1;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let timeline_path = args.next().unwrap_or_else(|| DEFAULT_TIMELINE.to_string());
    let settings = match args.next() {
        Some(path) => RendererSettings::load(&path)
            .with_context(|| format!("Failed to load settings from {path}"))?,
        None => RendererSettings::default(),
    };

    let timeline = Timeline::load(&timeline_path)
        .with_context(|| format!("Failed to load timeline from {timeline_path}"))?;
    let end_time = timeline.end_time();

    let mut animator = SceneAnimator::from_settings(timeline, &settings);
    let mut recorder = FrameRecorder::new(&settings);
    let mut backend = CountingBackend::default();

    log::info!(
        "Playing {timeline_path}: {end_time:.2}s, {} object sets, shadow {:?}, bloom {}",
        animator.object_sets().len(),
        settings.shadow,
        settings.bloom
    );

    let mut clock = ManualClock::new(0.0);
    let frame_count = (end_time * FRAMES_PER_SECOND).ceil() as u32 + 1;

    for index in 0..frame_count {
        let time = clock.current_time();
        let frame = animator.tick(time);
        recorder.record(frame, &mut backend);

        if index % FRAMES_PER_SECOND as u32 == 0 {
            log::info!(
                "t = {time:6.2}s  set {:?}  progress {:.3}  visible {}/{}",
                frame.active_set,
                frame.timeline.model_progress,
                frame.visible.len(),
                frame.models.len()
            );
        }
        clock.advance(1.0 / FRAMES_PER_SECOND);
    }

    log::info!(
        "Recorded {frame_count} frames: {} draws, {} uniform uploads",
        backend.draws,
        backend.uniforms
    );
    Ok(())
}
