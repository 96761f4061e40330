//! Shader program contracts.
//!
//! Each [`ProgramKind`] names the attributes and uniforms its passes bind.
//! [`ProgramLibrary`] keeps one [`ShaderHandleCache`] per program so handle
//! lookups hit the backend only once per name and link.

use crate::renderer::pass::DrawBackend;
use crate::renderer::shader_handles::{HandleResolver, ShaderHandle, ShaderHandleCache};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramKind {
    /// Lit cube pass.
    Main,
    /// Shadow cube-map face pass.
    Depth,
    /// Stencil shadow-volume extrusion.
    ShadowVolume,
    /// Darkens stencil-marked pixels after the volumes are drawn.
    StencilMask,
    BloomHorizontal,
    BloomVertical,
    /// Adds the blurred image over the scene.
    BloomCombine,
    /// Copies the scene to the screen when bloom is off.
    Present,
}

impl ProgramKind {
    pub const ALL: [ProgramKind; 8] = [
        ProgramKind::Main,
        ProgramKind::Depth,
        ProgramKind::ShadowVolume,
        ProgramKind::StencilMask,
        ProgramKind::BloomHorizontal,
        ProgramKind::BloomVertical,
        ProgramKind::BloomCombine,
        ProgramKind::Present,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProgramKind::Main => "main",
            ProgramKind::Depth => "depth",
            ProgramKind::ShadowVolume => "shadow_volume",
            ProgramKind::StencilMask => "stencil_mask",
            ProgramKind::BloomHorizontal => "bloom_horizontal",
            ProgramKind::BloomVertical => "bloom_vertical",
            ProgramKind::BloomCombine => "bloom_combine",
            ProgramKind::Present => "present",
        }
    }

    /// Attribute and uniform names the program's pass binds.
    #[must_use]
    pub fn handle_names(self) -> &'static [&'static str] {
        match self {
            ProgramKind::Main => &[
                "uModelM", "uViewM", "uProjM", "uLightPos", "uColor", "aPosition", "aNormal",
            ],
            ProgramKind::Depth => &["uModelM", "uViewM", "uProjM", "aPosition"],
            ProgramKind::ShadowVolume => &[
                "uModelM",
                "uViewProjectionM",
                "uViewExtrudeM",
                "uLightPosition",
                "aPosition",
                "aNormal",
            ],
            ProgramKind::StencilMask => &["aPosition"],
            ProgramKind::BloomHorizontal | ProgramKind::BloomVertical => &[
                "uIncrementalGaussian",
                "uNumBlurPixelsPerSide",
                "uBlurOffset",
                "aPosition",
            ],
            ProgramKind::BloomCombine => &[
                "sTextureBloom",
                "sTextureSource",
                "uForegroundColor",
                "aPosition",
            ],
            ProgramKind::Present => &["sTextureSource", "uForegroundColor", "aPosition"],
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Adapts a backend to the resolver interface of a single program.
struct ProgramResolver<'a, B: ?Sized> {
    backend: &'a B,
    program: ProgramKind,
}

impl<B: DrawBackend + ?Sized> HandleResolver for ProgramResolver<'_, B> {
    fn attribute_location(&self, name: &str) -> Option<u32> {
        self.backend.attribute_location(self.program, name)
    }

    fn uniform_location(&self, name: &str) -> Option<u32> {
        self.backend.uniform_location(self.program, name)
    }
}

/// One handle cache per program.
#[derive(Debug, Clone)]
pub struct ProgramLibrary {
    caches: [ShaderHandleCache; ProgramKind::ALL.len()],
}

impl Default for ProgramLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self {
            caches: ProgramKind::ALL.map(|kind| ShaderHandleCache::new(kind.label())),
        }
    }

    pub fn resolve<B: DrawBackend + ?Sized>(
        &mut self,
        backend: &B,
        program: ProgramKind,
        name: &str,
    ) -> ShaderHandle {
        let resolver = ProgramResolver { backend, program };
        self.caches[program.index()].resolve(&resolver, name)
    }

    pub fn resolve_all<B: DrawBackend + ?Sized, const N: usize>(
        &mut self,
        backend: &B,
        program: ProgramKind,
        names: [&str; N],
    ) -> [ShaderHandle; N] {
        let resolver = ProgramResolver { backend, program };
        self.caches[program.index()].resolve_all(&resolver, names)
    }

    /// Forgets the handles of a relinked program.
    pub fn reload(&mut self, program: ProgramKind) {
        log::debug!("Program '{}' reloaded, clearing handles", program.label());
        self.caches[program.index()].invalidate();
    }

    pub fn reload_all(&mut self) {
        for program in ProgramKind::ALL {
            self.reload(program);
        }
    }

    #[must_use]
    pub fn cache(&self, program: ProgramKind) -> &ShaderHandleCache {
        &self.caches[program.index()]
    }
}
