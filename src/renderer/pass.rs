//! Pass recording.
//!
//! [`FrameRecorder`] turns a [`FrameState`] into a sequence of backend calls:
//!
//! ```text
//! ShadowMap:     6 × depth face ─► main ─► bloom (h, v, combine) | present
//! ShadowVolume:  main ─► stencil volumes ─► stencil mask ─► bloom | present
//! ```
//!
//! Handles come from the [`ProgramLibrary`]; a binding whose handle is
//! [`ShaderHandle::NOT_FOUND`] is skipped, never sent to the backend.

use glam::{Mat4, Vec3};

use crate::math;
use crate::renderer::bloom::BloomParams;
use crate::renderer::programs::{ProgramKind, ProgramLibrary};
use crate::renderer::settings::{RendererSettings, ShadowTechnique};
use crate::renderer::shader_handles::ShaderHandle;
use crate::scene::{CubeFace, FrameState};

/// Base tint of the lit cubes.
pub const CUBE_COLOR: [f32; 3] = [0.4, 0.6, 1.0];

/// Tint of the room walls.
pub const ROOM_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

/// Uniform scale of the room cube. Negative turns it inside out.
pub const ROOM_SCALE: f32 = -10.0;

/// Model matrix of the room enclosing the scene.
#[must_use]
pub fn room_model_matrix() -> Mat4 {
    math::uniform_scale(ROOM_SCALE)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    /// Column-major.
    Mat4([f32; 16]),
}

impl From<Mat4> for UniformValue {
    fn from(m: Mat4) -> Self {
        UniformValue::Mat4(math::to_column_array(&m))
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Vec3(v.to_array())
    }
}

/// Static vertex data the backend owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexStream {
    CubePositions,
    CubeNormals,
    /// Cube normals pointing inward, for the room.
    CubeNormalsInverted,
    /// Cube with degenerate edge quads, `w = 0` marks extruded vertices.
    ShadowVolumePositions,
    ShadowVolumeNormals,
    FullscreenQuad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTarget {
    ShadowFace(CubeFace),
    /// Full-resolution scene color.
    Scene,
    /// Quarter-resolution blur ping-pong targets.
    BloomHorizontal,
    BloomVertical,
    Screen,
}

/// A texture a pass samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSource {
    /// All six shadow faces as one cube map.
    ShadowCube,
    /// Color output of an earlier pass.
    Target(RenderTarget),
}

/// What a graphics API has to provide to play back a frame.
pub trait DrawBackend {
    fn attribute_location(&self, program: ProgramKind, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: ProgramKind, name: &str) -> Option<u32>;

    /// Binds a render target; `size` is its pixel extent.
    fn bind_target(&mut self, target: RenderTarget, size: (u32, u32));
    fn bind_texture(&mut self, unit: u32, source: TextureSource);
    fn use_program(&mut self, program: ProgramKind);
    fn set_uniform(&mut self, location: u32, value: UniformValue);
    fn bind_attribute(&mut self, location: u32, stream: VertexStream);
    /// Draws the primitive behind `stream` with the current bindings.
    fn draw(&mut self, stream: VertexStream);
}

fn set_uniform<B: DrawBackend + ?Sized>(backend: &mut B, handle: ShaderHandle, value: impl Into<UniformValue>) {
    if let Some(location) = handle.location() {
        backend.set_uniform(location, value.into());
    }
}

fn bind_attribute<B: DrawBackend + ?Sized>(backend: &mut B, handle: ShaderHandle, stream: VertexStream) {
    if let Some(location) = handle.location() {
        backend.bind_attribute(location, stream);
    }
}

/// Records the passes of one frame.
#[derive(Debug, Clone)]
pub struct FrameRecorder {
    programs: ProgramLibrary,
    shadow: ShadowTechnique,
    bloom_enabled: bool,
    bloom: BloomParams,
    viewport: (u32, u32),
    shadow_map_size: u32,
    fov: f32,
    aspect: f32,
    near: f32,
}

impl FrameRecorder {
    #[must_use]
    pub fn new(settings: &RendererSettings) -> Self {
        Self {
            programs: ProgramLibrary::new(),
            shadow: settings.shadow,
            bloom_enabled: settings.bloom,
            bloom: BloomParams::for_viewport(settings.viewport_width, settings.viewport_height),
            viewport: (settings.viewport_width, settings.viewport_height),
            shadow_map_size: settings.shadow_map_size,
            fov: settings.fov,
            aspect: settings.aspect(),
            near: settings.near,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.bloom = BloomParams::for_viewport(width, height);
        self.viewport = (width, height);
        self.aspect = if height == 0 { 1.0 } else { width as f32 / height as f32 };
    }

    #[must_use]
    pub fn programs(&self) -> &ProgramLibrary {
        &self.programs
    }

    pub fn programs_mut(&mut self) -> &mut ProgramLibrary {
        &mut self.programs
    }

    #[must_use]
    pub fn bloom_params(&self) -> &BloomParams {
        &self.bloom
    }

    /// Pixel extent of `target`: square shadow faces, quarter-size blur
    /// targets, full viewport otherwise.
    #[must_use]
    pub fn target_size(&self, target: RenderTarget) -> (u32, u32) {
        match target {
            RenderTarget::ShadowFace(_) => (self.shadow_map_size, self.shadow_map_size),
            RenderTarget::BloomHorizontal | RenderTarget::BloomVertical => {
                (self.bloom.target_width, self.bloom.target_height)
            }
            RenderTarget::Scene | RenderTarget::Screen => self.viewport,
        }
    }

    fn bind_target<B: DrawBackend + ?Sized>(&self, backend: &mut B, target: RenderTarget) {
        backend.bind_target(target, self.target_size(target));
    }

    pub fn record<B: DrawBackend + ?Sized>(&mut self, frame: &FrameState, backend: &mut B) {
        match self.shadow {
            ShadowTechnique::ShadowMap => {
                for face in CubeFace::ALL {
                    self.record_shadow_face(frame, face, backend);
                }
                self.bind_target(backend, RenderTarget::Scene);
                self.record_scene(frame, backend);
            }
            ShadowTechnique::ShadowVolume => {
                self.bind_target(backend, RenderTarget::Scene);
                self.record_scene(frame, backend);
                self.record_shadow_volumes(frame, backend);
                self.record_stencil_mask(backend);
            }
        }

        if self.bloom_enabled {
            self.record_bloom(frame, backend);
        } else {
            self.record_present(frame, backend);
        }
    }

    /// Depth of the visible cubes and the room into one shadow face.
    pub fn record_shadow_face<B: DrawBackend + ?Sized>(
        &mut self,
        frame: &FrameState,
        face: CubeFace,
        backend: &mut B,
    ) {
        let [u_model, u_view, u_proj, a_position] = self.programs.resolve_all(
            &*backend,
            ProgramKind::Depth,
            ["uModelM", "uViewM", "uProjM", "aPosition"],
        );

        self.bind_target(backend, RenderTarget::ShadowFace(face));
        backend.use_program(ProgramKind::Depth);
        set_uniform(backend, u_view, face.rotation_matrix() * frame.light_view_matrix);
        set_uniform(backend, u_proj, frame.light_projection_matrix);
        bind_attribute(backend, a_position, VertexStream::CubePositions);

        for model in frame.shadow_face_models(face) {
            set_uniform(backend, u_model, *model);
            backend.draw(VertexStream::CubePositions);
        }

        set_uniform(backend, u_model, room_model_matrix());
        backend.draw(VertexStream::CubePositions);
    }

    /// Lit cubes, then the room with inward normals. The room is never culled.
    pub fn record_scene<B: DrawBackend + ?Sized>(&mut self, frame: &FrameState, backend: &mut B) {
        let [u_model, u_view, u_proj, u_light_pos, u_color, a_position, a_normal] =
            self.programs.resolve_all(
                &*backend,
                ProgramKind::Main,
                ["uModelM", "uViewM", "uProjM", "uLightPos", "uColor", "aPosition", "aNormal"],
            );

        backend.use_program(ProgramKind::Main);
        if self.shadow.uses_cube_faces() {
            backend.bind_texture(0, TextureSource::ShadowCube);
        }
        set_uniform(backend, u_light_pos, frame.timeline.light_position);
        set_uniform(backend, u_view, frame.view_matrix);
        set_uniform(backend, u_proj, frame.projection_matrix);
        set_uniform(backend, u_color, UniformValue::Vec3(CUBE_COLOR));
        bind_attribute(backend, a_position, VertexStream::CubePositions);
        bind_attribute(backend, a_normal, VertexStream::CubeNormals);

        for model in frame.visible_models() {
            set_uniform(backend, u_model, *model);
            backend.draw(VertexStream::CubePositions);
        }

        set_uniform(backend, u_model, room_model_matrix());
        set_uniform(backend, u_color, UniformValue::Vec3(ROOM_COLOR));
        bind_attribute(backend, a_normal, VertexStream::CubeNormalsInverted);
        backend.draw(VertexStream::CubePositions);
    }

    /// Volumes are not culled: a cube outside the view can still shadow it.
    pub fn record_shadow_volumes<B: DrawBackend + ?Sized>(&mut self, frame: &FrameState, backend: &mut B) {
        let [u_model, u_view_proj, u_view_extrude, u_light_pos, a_position, a_normal] =
            self.programs.resolve_all(
                &*backend,
                ProgramKind::ShadowVolume,
                [
                    "uModelM",
                    "uViewProjectionM",
                    "uViewExtrudeM",
                    "uLightPosition",
                    "aPosition",
                    "aNormal",
                ],
            );

        let extrude = math::extrude(self.fov, self.aspect, self.near);

        backend.use_program(ProgramKind::ShadowVolume);
        set_uniform(backend, u_light_pos, frame.timeline.light_position);
        set_uniform(backend, u_view_proj, frame.view_projection_matrix);
        set_uniform(backend, u_view_extrude, extrude * frame.view_matrix);
        bind_attribute(backend, a_position, VertexStream::ShadowVolumePositions);
        bind_attribute(backend, a_normal, VertexStream::ShadowVolumeNormals);

        for model in &frame.models {
            set_uniform(backend, u_model, *model);
            backend.draw(VertexStream::ShadowVolumePositions);
        }
    }

    /// Fullscreen quad over the scene target. The backend draws it with the
    /// stencil test `!= 0` and alpha blending, darkening the shadowed pixels.
    pub fn record_stencil_mask<B: DrawBackend + ?Sized>(&mut self, backend: &mut B) {
        let [a_position] = self
            .programs
            .resolve_all(&*backend, ProgramKind::StencilMask, ["aPosition"]);

        backend.use_program(ProgramKind::StencilMask);
        bind_attribute(backend, a_position, VertexStream::FullscreenQuad);
        backend.draw(VertexStream::FullscreenQuad);
    }

    pub fn record_bloom<B: DrawBackend + ?Sized>(&mut self, frame: &FrameState, backend: &mut B) {
        let bloom = self.bloom;
        let passes = [
            (
                ProgramKind::BloomHorizontal,
                RenderTarget::BloomHorizontal,
                RenderTarget::Scene,
                [bloom.blur_offset_h, 0.0],
            ),
            (
                ProgramKind::BloomVertical,
                RenderTarget::BloomVertical,
                RenderTarget::BloomHorizontal,
                [0.0, bloom.blur_offset_v],
            ),
        ];

        for (program, target, source, offset) in passes {
            let [u_gaussian, u_pixels, u_offset, a_position] = self.programs.resolve_all(
                &*backend,
                program,
                ["uIncrementalGaussian", "uNumBlurPixelsPerSide", "uBlurOffset", "aPosition"],
            );

            self.bind_target(backend, target);
            backend.use_program(program);
            backend.bind_texture(0, TextureSource::Target(source));
            set_uniform(backend, u_gaussian, UniformValue::Vec3(bloom.incremental_gaussian));
            set_uniform(backend, u_pixels, UniformValue::Float(bloom.pixels_per_side as f32));
            set_uniform(backend, u_offset, UniformValue::Vec2(offset));
            bind_attribute(backend, a_position, VertexStream::FullscreenQuad);
            backend.draw(VertexStream::FullscreenQuad);
        }

        let [s_bloom, s_source, u_foreground, a_position] = self.programs.resolve_all(
            &*backend,
            ProgramKind::BloomCombine,
            ["sTextureBloom", "sTextureSource", "uForegroundColor", "aPosition"],
        );

        self.bind_target(backend, RenderTarget::Screen);
        backend.use_program(ProgramKind::BloomCombine);
        backend.bind_texture(0, TextureSource::Target(RenderTarget::BloomVertical));
        set_uniform(backend, s_bloom, UniformValue::Int(0));
        backend.bind_texture(1, TextureSource::Target(RenderTarget::Scene));
        set_uniform(backend, s_source, UniformValue::Int(1));
        set_uniform(
            backend,
            u_foreground,
            UniformValue::Vec4(frame.timeline.foreground_color.to_array()),
        );
        bind_attribute(backend, a_position, VertexStream::FullscreenQuad);
        backend.draw(VertexStream::FullscreenQuad);
    }

    /// Copies the scene to the screen, still tinted by the foreground color.
    pub fn record_present<B: DrawBackend + ?Sized>(&mut self, frame: &FrameState, backend: &mut B) {
        let [s_source, u_foreground, a_position] = self.programs.resolve_all(
            &*backend,
            ProgramKind::Present,
            ["sTextureSource", "uForegroundColor", "aPosition"],
        );

        self.bind_target(backend, RenderTarget::Screen);
        backend.use_program(ProgramKind::Present);
        backend.bind_texture(0, TextureSource::Target(RenderTarget::Scene));
        set_uniform(backend, s_source, UniformValue::Int(0));
        set_uniform(
            backend,
            u_foreground,
            UniformValue::Vec4(frame.timeline.foreground_color.to_array()),
        );
        bind_attribute(backend, a_position, VertexStream::FullscreenQuad);
        backend.draw(VertexStream::FullscreenQuad);
    }
}
