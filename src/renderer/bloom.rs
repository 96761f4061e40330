//! Bloom Parameters
//!
//! The bloom pass blurs a quarter-resolution copy of the scene with a
//! separable gaussian (horizontal, then vertical) and adds it back over the
//! full-resolution image, tinted by the timeline's foreground color.
//!
//! The blur kernel is evaluated incrementally on the GPU. The shader starts
//! from `g = (1/(√(2π)σ), e^(−0.5/σ²), e^(−0.5/σ²)²)` and for each further tap
//! multiplies `g.xy *= g.yz`, so only these three numbers are uploaded.

/// Fraction of the blur target's short side covered by one kernel half.
const BLUR_RADIUS_FRACTION: f32 = 0.05;

/// Uniform values for the two blur passes, derived from the viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomParams {
    /// Quarter-resolution blur target size.
    pub target_width: u32,
    pub target_height: u32,
    /// One texel of the blur target in UV units.
    pub blur_offset_h: f32,
    pub blur_offset_v: f32,
    /// Kernel half-width in texels.
    pub pixels_per_side: u32,
    pub sigma: f32,
    /// Starting coefficients for the incremental gaussian.
    pub incremental_gaussian: [f32; 3],
}

impl BloomParams {
    #[must_use]
    pub fn for_viewport(width: u32, height: u32) -> Self {
        let target_width = (width / 4).max(1);
        let target_height = (height / 4).max(1);

        let short_side = target_width.min(target_height) as f32;
        let pixels_per_side = ((BLUR_RADIUS_FRACTION * short_side) as u32).max(1);
        let sigma = 1.0 + pixels_per_side as f32 * 0.5;

        let g0 = 1.0 / ((2.0 * std::f64::consts::PI).sqrt() * f64::from(sigma));
        let g1 = (-0.5 / (f64::from(sigma) * f64::from(sigma))).exp();
        let g2 = g1 * g1;

        Self {
            target_width,
            target_height,
            blur_offset_h: 1.0 / target_width as f32,
            blur_offset_v: 1.0 / target_height as f32,
            pixels_per_side,
            sigma,
            incremental_gaussian: [g0 as f32, g1 as f32, g2 as f32],
        }
    }
}

impl Default for BloomParams {
    fn default() -> Self {
        Self::for_viewport(1, 1)
    }
}
