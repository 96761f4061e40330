//! Renderer Settings
//!
//! Startup configuration for the viewer: projection parameters, viewport,
//! shadow technique, bloom toggle, the object-set layouts and the seed used to
//! expand them.
//!
//! Every field has a default, so a settings file only needs the values it
//! changes:
//!
//! ```rust,ignore
//! use cubism::renderer::RendererSettings;
//!
//! let settings = RendererSettings::from_json_str(r#"{ "shadow": "shadow_volume", "seed": 7 }"#)?;
//! assert_eq!(settings.fov, 45.0);
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::errors::Result;
use crate::scene::ModelLayout;

// ---------------------------------------------------------------------------
// ShadowTechnique
// ---------------------------------------------------------------------------

/// How shadows are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowTechnique {
    /// Six-face depth cube rendered from the light.
    #[default]
    ShadowMap,
    /// Stencil volumes built from extruded silhouettes.
    ShadowVolume,
}

impl ShadowTechnique {
    /// Returns `true` when the frame needs per-face light culling.
    #[inline]
    #[must_use]
    pub fn uses_cube_faces(&self) -> bool {
        matches!(self, Self::ShadowMap)
    }
}

// ---------------------------------------------------------------------------
// RendererSettings
// ---------------------------------------------------------------------------

/// Global configuration, read once at startup.
///
/// | Field              | Description                          | Default        |
/// |--------------------|--------------------------------------|----------------|
/// | `fov`              | Camera vertical field of view (deg)  | `45`           |
/// | `near` / `far`     | Clip distances                       | `0.1` / `40`   |
/// | `light_fov`        | Shadow face field of view (deg)      | `90`           |
/// | `viewport_width`   | Framebuffer width in pixels          | `1280`         |
/// | `viewport_height`  | Framebuffer height in pixels         | `720`          |
/// | `shadow`           | Shadow technique                     | `ShadowMap`    |
/// | `shadow_map_size`  | Edge of each shadow face target (px) | `512`          |
/// | `bloom`            | Bloom post-process enabled           | `true`         |
/// | `seed`             | Seed for layout randomness           | `0`            |
/// | `layouts`          | Object sets, indexed by model id     | two shells     |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    // === Projection ===
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub light_fov: f32,

    // === Framebuffer ===
    pub viewport_width: u32,
    pub viewport_height: u32,

    // === Effects ===
    pub shadow: ShadowTechnique,
    pub shadow_map_size: u32,
    pub bloom: bool,

    // === Scene ===
    pub seed: u64,
    pub layouts: Vec<ModelLayout>,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 40.0,
            light_fov: 90.0,
            viewport_width: 1280,
            viewport_height: 720,
            shadow: ShadowTechnique::default(),
            shadow_map_size: 512,
            bloom: true,
            seed: 0,
            layouts: vec![
                ModelLayout::Explosion { cube_size: 10 },
                ModelLayout::RandomScatter { cube_size: 10 },
            ],
        }
    }
}

impl RendererSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Width over height. A zero height reports a square viewport.
    #[inline]
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.viewport_height == 0 {
            1.0
        } else {
            self.viewport_width as f32 / self.viewport_height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let settings = RendererSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, RendererSettings::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let settings = RendererSettings::from_json_str(
            r#"{
                "shadow": "shadow_volume",
                "viewport_width": 800,
                "viewport_height": 600,
                "layouts": [{ "kind": "random_scatter", "cube_size": 4 }]
            }"#,
        )
        .unwrap();

        assert_eq!(settings.shadow, ShadowTechnique::ShadowVolume);
        assert!(!settings.shadow.uses_cube_faces());
        assert!((settings.aspect() - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(
            settings.layouts,
            vec![ModelLayout::RandomScatter { cube_size: 4 }]
        );
        assert!((settings.far - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn silhouette_mask_rows_are_validated() {
        let err = RendererSettings::from_json_str(
            r###"{ "layouts": [{ "kind": "silhouette", "mask": { "rows": ["##", "#"] } }] }"###,
        );
        assert!(err.is_err());
    }
}
