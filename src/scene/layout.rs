//! Object-set generators.
//!
//! A [`ModelLayout`] describes how a set of cubes is arranged and how each cube
//! travels while the set's progress goes from `0` to `1`. Layouts are picked
//! by configuration and expanded with a seed, so the same configuration always
//! produces the same set.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::Deserialize;

use crate::animation::{ControlSegment, InterpolationMode};
use crate::errors::{CubismError, Result};

/// Point the explosion layout sorts its cubes away from.
const EXPLOSION_GRAVITY: Vec3 = Vec3::new(3.0, 3.0, 3.0);

/// Half-extent of the scatter volume for random targets.
const SCATTER_EXTENT: f32 = 3.0;

/// Range of random rotation targets, in degrees.
const ROTATION_EXTENT: f32 = 360.0;

/// Starting state and per-cube curves, all parameterized over `t ∈ [0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInitialState {
    /// Position curve, two or three control points.
    pub position: ControlSegment,
    /// Euler rotation curve in degrees.
    pub rotation: ControlSegment,
    /// One-dimensional uniform scale curve.
    pub scale: ControlSegment,
    /// Stagger fraction: the cube sees `t · (1 − delay)`.
    pub delay: f32,
}

impl ObjectInitialState {
    /// Straight flight from `source` to `target`, no stagger.
    #[must_use]
    pub fn linear(source: Vec3, target: Vec3, rotation_target: Vec3, scale: f32) -> Self {
        Self {
            position: unit_segment(InterpolationMode::Linear, &source.to_array())
                .with_control1(&target.to_array()),
            rotation: unit_segment(InterpolationMode::Linear, &[0.0; 3])
                .with_control1(&rotation_target.to_array()),
            scale: unit_segment(InterpolationMode::Constant, &[scale]),
            delay: 0.0,
        }
    }

    /// Position at `t = 0`.
    #[must_use]
    pub fn source_position(&self) -> Vec3 {
        let mut p = [0.0_f32; 3];
        self.position.sample_into(0.0, &mut p);
        Vec3::from_array(p)
    }
}

fn unit_segment(mode: InterpolationMode, control0: &[f32]) -> ControlSegment {
    ControlSegment::new(0, mode, 0.0, 1.0, control0)
}

// ============================================================================
// Silhouette mask
// ============================================================================

/// Binary alpha mask, row-major, `y = 0` at the top.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "MaskRows")]
pub struct SilhouetteMask {
    width: u32,
    height: u32,
    opaque: Vec<bool>,
}

#[derive(Debug, Deserialize)]
struct MaskRows {
    rows: Vec<String>,
}

impl TryFrom<MaskRows> for SilhouetteMask {
    type Error = CubismError;

    fn try_from(value: MaskRows) -> Result<Self> {
        let rows: Vec<&str> = value.rows.iter().map(String::as_str).collect();
        SilhouetteMask::from_rows(&rows)
    }
}

impl SilhouetteMask {
    pub fn new(width: u32, height: u32, opaque: Vec<bool>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if opaque.len() != expected {
            return Err(CubismError::InvalidLayout(format!(
                "mask is {width}x{height} but has {} pixels",
                opaque.len()
            )));
        }
        Ok(Self {
            width,
            height,
            opaque,
        })
    }

    /// Text form: `#` marks an opaque pixel, anything else is transparent.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        if rows.iter().any(|row| row.chars().count() != width) {
            return Err(CubismError::InvalidLayout(
                "mask rows have different lengths".to_string(),
            ));
        }
        let opaque = rows
            .iter()
            .flat_map(|row| row.chars().map(|c| c == '#'))
            .collect();
        Self::new(width as u32, rows.len() as u32, opaque)
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        x < self.width
            && y < self.height
            && self.opaque[(y * self.width + x) as usize]
    }

    #[must_use]
    pub fn opaque_count(&self) -> usize {
        self.opaque.iter().filter(|&&o| o).count()
    }
}

// ============================================================================
// Layouts
// ============================================================================

/// Interchangeable object-set generators.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelLayout {
    /// Shell bursting outward; cubes nearest the gravity point leave first.
    Explosion { cube_size: u32 },
    /// Shell dissolving to random points in a 6-unit box.
    RandomScatter { cube_size: u32 },
    /// Shell flying through a random waypoint into the opaque pixels of a mask.
    Silhouette { mask: SilhouetteMask },
}

impl ModelLayout {
    /// Expands the layout into per-cube initial states.
    #[must_use]
    pub fn layout(&self, seed: u64) -> Vec<ObjectInitialState> {
        let mut rng = StdRng::seed_from_u64(seed);
        match self {
            ModelLayout::Explosion { cube_size } => explosion(*cube_size, &mut rng),
            ModelLayout::RandomScatter { cube_size } => random_scatter(*cube_size, &mut rng),
            ModelLayout::Silhouette { mask } => silhouette(mask, &mut rng),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ModelLayout::Explosion { .. } => "explosion",
            ModelLayout::RandomScatter { .. } => "random_scatter",
            ModelLayout::Silhouette { .. } => "silhouette",
        }
    }
}

/// Number of surface cells of a `div³` grid.
#[must_use]
pub fn shell_cube_count(div: u32) -> usize {
    match div {
        0 => 0,
        1 => 1,
        d => {
            let d = d as usize;
            6 * d * d - 12 * d + 8
        }
    }
}

/// Centers of the surface cells of a `div³` grid spanning `[-1, 1]³`.
#[must_use]
pub fn shell_positions(div: u32) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(shell_cube_count(div));
    if div == 0 {
        return positions;
    }

    let scale = 1.0 / div as f32;
    let step = 2.0 * scale;
    let cell = |i: u32| i as f32 * step + scale - 1.0;

    for x in 0..div {
        for y in 0..div {
            let interior_column = x > 0 && y > 0 && x < div - 1 && y < div - 1;
            let mut z = 0;
            while z < div {
                positions.push(Vec3::new(cell(x), cell(y), cell(z)));
                // Interior columns only have their two end caps on the surface.
                z += if interior_column { (div - 1).max(1) } else { 1 };
            }
        }
    }
    positions
}

fn checked_cube_size(cube_size: u32) -> u32 {
    if cube_size < 2 {
        log::warn!("Layout cube_size {cube_size} is too small, using 2");
        return 2;
    }
    cube_size
}

fn random_unit(rng: &mut StdRng) -> f32 {
    rng.random_range(0.0..1.0f32)
}

fn random_rotation(rng: &mut StdRng) -> Vec3 {
    Vec3::new(
        rng.random_range(-ROTATION_EXTENT..ROTATION_EXTENT),
        rng.random_range(-ROTATION_EXTENT..ROTATION_EXTENT),
        rng.random_range(-ROTATION_EXTENT..ROTATION_EXTENT),
    )
}

fn explosion(cube_size: u32, rng: &mut StdRng) -> Vec<ObjectInitialState> {
    let div = checked_cube_size(cube_size);
    let scale = 1.0 / div as f32;

    let mut cubes: Vec<(f32, ObjectInitialState)> = shell_positions(div)
        .into_iter()
        .map(|source| {
            let push = Vec3::new(
                3.0 * random_unit(rng),
                3.0 * random_unit(rng),
                3.0 * random_unit(rng),
            );
            let target = source + source * push;
            let mut state = ObjectInitialState::linear(source, target, random_rotation(rng), scale);
            state.position.interpolation = InterpolationMode::Hermite;
            state.rotation.interpolation = InterpolationMode::Hermite;
            (source.distance(EXPLOSION_GRAVITY), state)
        })
        .collect();

    cubes.sort_by(|a, b| a.0.total_cmp(&b.0));

    let count = cubes.len() as f32;
    cubes
        .into_iter()
        .enumerate()
        .map(|(i, (_, mut state))| {
            state.delay = i as f32 / count;
            state
        })
        .collect()
}

fn random_scatter(cube_size: u32, rng: &mut StdRng) -> Vec<ObjectInitialState> {
    let div = checked_cube_size(cube_size);
    let scale = 1.0 / div as f32;

    shell_positions(div)
        .into_iter()
        .map(|source| {
            let target = Vec3::new(
                rng.random_range(-SCATTER_EXTENT..SCATTER_EXTENT),
                rng.random_range(-SCATTER_EXTENT..SCATTER_EXTENT),
                rng.random_range(-SCATTER_EXTENT..SCATTER_EXTENT),
            );
            ObjectInitialState::linear(source, target, random_rotation(rng), scale)
        })
        .collect()
}

fn silhouette(mask: &SilhouetteMask, rng: &mut StdRng) -> Vec<ObjectInitialState> {
    let pixel_count = mask.opaque_count();

    let mut div = 2;
    while shell_cube_count(div) < pixel_count {
        div += 1;
    }
    let scale_source = 1.0 / div as f32;

    struct Flight {
        source: Vec3,
        waypoint: Vec3,
        rotation_target: Vec3,
    }

    let mut flights: Vec<Flight> = shell_positions(div)
        .into_iter()
        .map(|source| Flight {
            source,
            waypoint: Vec3::new(
                rng.random_range(-SCATTER_EXTENT..SCATTER_EXTENT),
                rng.random_range(-SCATTER_EXTENT..SCATTER_EXTENT),
                rng.random_range(-SCATTER_EXTENT..SCATTER_EXTENT),
            ),
            // Quarter turns only, so cubes land axis-aligned.
            rotation_target: Vec3::new(
                90.0 * rng.random_range(-4.0..4.0f32).trunc(),
                90.0 * rng.random_range(-4.0..4.0f32).trunc(),
                90.0 * rng.random_range(-4.0..4.0f32).trunc(),
            ),
        })
        .collect();

    for i in (1..flights.len()).rev() {
        let j = rng.random_range(0..=i);
        flights.swap(i, j);
    }

    let (width, height) = (mask.width(), mask.height());
    let scale_target = 2.0 / width.max(height).max(1) as f32;
    let pad_x = height.saturating_sub(width) as f32 / 2.0;
    let pad_y = width.saturating_sub(height) as f32 / 2.0;
    let step = 2.0 * scale_target;

    let pixel_targets = (0..width)
        .flat_map(|x| (0..height).map(move |y| (x, y)))
        .filter(|&(x, y)| mask.is_opaque(x, y))
        .map(|(x, y)| {
            let tx = (x as f32 + pad_x) * step + scale_target - 2.0;
            let ty = (y as f32 + pad_y) * step + scale_target - 2.0;
            Vec3::new(tx, -ty, 0.0)
        });

    let mut targets: Vec<(Vec3, f32)> = pixel_targets.map(|p| (p, scale_target)).collect();
    for flight in flights.iter().skip(targets.len()) {
        // Surplus cubes drift outward and shrink away.
        let s = flight.source;
        let drift = Vec3::new(
            s.x * random_unit(rng) * 3.0,
            s.y * random_unit(rng) * 3.0,
            s.z * random_unit(rng) * 3.0,
        );
        targets.push((s + drift, 0.0));
    }

    flights
        .into_iter()
        .zip(targets)
        .map(|(flight, (target, target_scale))| ObjectInitialState {
            position: unit_segment(InterpolationMode::Linear, &flight.source.to_array())
                .with_control1(&flight.waypoint.to_array())
                .with_control2(&target.to_array()),
            rotation: unit_segment(InterpolationMode::Linear, &[0.0; 3])
                .with_control1(&flight.rotation_target.to_array()),
            scale: unit_segment(InterpolationMode::Linear, &[scale_source])
                .with_control1(&[target_scale]),
            delay: 0.0,
        })
        .collect()
}
