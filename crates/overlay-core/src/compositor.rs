use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::constants::*;
use crate::error::OverlayError;
use crate::visual::{blend_mode_for, layer_color, opacity_factor, BlendMode, Hsl};

/// Static per-layer configuration, computed once from the viewport at mount
/// (and again after a resize) and read-only during the loop.
#[derive(Clone, Copy, Debug)]
pub struct LayerConfig {
    pub size_px: f32,
    pub speed_multiplier: f32,
    /// Spatial offset in normalized units. Offsets may push a layer past the
    /// [0, 100] box; that edge bleed is intentional.
    pub offset: Vec2,
    pub base_opacity: f32,
}

/// Build the parallax stack for a viewport, far layer first.
pub fn build_layers(viewport_width: f32, viewport_height: f32) -> [LayerConfig; LAYER_COUNT] {
    let min_dim = viewport_width.min(viewport_height).max(1.0);
    std::array::from_fn(|i| LayerConfig {
        size_px: min_dim * LAYER_SIZE_FACTORS[i],
        speed_multiplier: LAYER_SPEEDS[i],
        offset: Vec2::new(LAYER_OFFSETS[i][0], LAYER_OFFSETS[i][1]),
        base_opacity: LAYER_BASE_OPACITIES[i],
    })
}

/// One visual element the presentation layer should draw, in z-order.
#[derive(Clone, Debug)]
pub struct RenderPrimitive {
    pub layer: usize,
    /// Normalized position; may extend beyond [0, 100] via layer offsets.
    pub position: Vec2,
    pub size_px: f32,
    pub color: Hsl,
    pub blend: BlendMode,
    pub opacity: f32,
}

pub type FramePrimitives = SmallVec<[RenderPrimitive; LAYER_COUNT]>;

/// Receives the composited frame. The sink is the failure boundary: a lost
/// surface or a throwing draw comes back as an `OverlayError` and is routed
/// to the fallback supervisor.
pub trait PresentationSink {
    fn present(&mut self, primitives: &[RenderPrimitive]) -> Result<(), OverlayError>;
}

/// Compose the animated frame: each layer at `current * speed + offset`
/// (no re-clamp), with position-derived color and velocity-derived blend
/// and opacity.
pub fn compose(
    current: Vec2,
    layers: &[LayerConfig],
    velocity_magnitude: f32,
    hovering: bool,
    high_contrast: bool,
) -> FramePrimitives {
    let blend = blend_mode_for(velocity_magnitude);
    let factor = opacity_factor(hovering, velocity_magnitude, high_contrast);
    layers
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let position = current * layer.speed_multiplier + layer.offset;
            RenderPrimitive {
                layer: i,
                position,
                size_px: layer.size_px,
                color: layer_color(i, position),
                blend,
                opacity: (layer.base_opacity * factor).min(1.0),
            }
        })
        .collect()
}

/// Static gradient presentation for reduced motion and the degraded rungs:
/// every layer centered, resting opacity, normal blending. Emitted once,
/// not per frame, so the result stays visually stable.
pub fn compose_static(layers: &[LayerConfig], high_contrast: bool) -> FramePrimitives {
    let center = Vec2::splat(CENTER);
    let factor = opacity_factor(false, 0.0, high_contrast);
    layers
        .iter()
        .enumerate()
        .map(|(i, layer)| RenderPrimitive {
            layer: i,
            position: center + layer.offset,
            size_px: layer.size_px,
            color: layer_color(i, center),
            blend: BlendMode::Normal,
            opacity: (layer.base_opacity * factor).min(1.0),
        })
        .collect()
}

/// Minimal-particles presentation: a small, seeded scatter of low-opacity
/// dots. Seeding keeps the frame reproducible across mounts and in tests.
pub fn compose_particles(seed: u64) -> FramePrimitives {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..PARTICLE_COUNT)
        .map(|i| {
            let position = Vec2::new(rng.gen_range(0.0..NORM_MAX), rng.gen_range(0.0..NORM_MAX));
            RenderPrimitive {
                layer: i,
                position,
                size_px: PARTICLE_SIZE_PX,
                color: layer_color(i % LAYER_COUNT, position),
                blend: BlendMode::Normal,
                opacity: PARTICLE_OPACITY,
            }
        })
        .collect()
}
