use glam::Vec2;

use crate::constants::*;

/// HSL color, `h` in degrees, `s`/`l` in [0, 1]. The palettes interpolate
/// in HSL so hue sweeps stay saturated instead of washing through gray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    fn mix(self, other: Hsl, t: f32) -> Hsl {
        Hsl {
            h: lerp(self.h, other.h, t),
            s: lerp(self.s, other.s, t),
            l: lerp(self.l, other.l, t),
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Bilinear interpolation across four corner colors (top-left, top-right,
/// bottom-left, bottom-right): horizontally along the top and bottom edges
/// first, then vertically between the two results.
pub fn bilinear_hsl(corners: &[Hsl; 4], tx: f32, ty: f32) -> Hsl {
    let tx = tx.clamp(0.0, 1.0);
    let ty = ty.clamp(0.0, 1.0);
    let top = corners[0].mix(corners[1], tx);
    let bottom = corners[2].mix(corners[3], tx);
    top.mix(bottom, ty)
}

/// Color for one layer at a normalized [0, 100] position. Parallax can push
/// a layer outside the box; the ratio is clamped for the color lookup only.
pub fn layer_color(layer: usize, position: Vec2) -> Hsl {
    let palette = &LAYER_PALETTES[layer % LAYER_COUNT];
    bilinear_hsl(palette, position.x / NORM_MAX, position.y / NORM_MAX)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    Screen,
    ColorDodge,
}

/// Velocity-thresholded blend mode. A flat step function with no
/// hysteresis; flicker near a threshold is cosmetic, not a correctness
/// concern.
pub fn blend_mode_for(velocity_magnitude: f32) -> BlendMode {
    if velocity_magnitude < BLEND_SCREEN_THRESHOLD {
        BlendMode::Normal
    } else if velocity_magnitude < BLEND_DODGE_THRESHOLD {
        BlendMode::Screen
    } else {
        BlendMode::ColorDodge
    }
}

/// State-level opacity factor: resting/hovering base scaled by velocity
/// (capped at 2x) and boosted under high contrast so the overlay stays
/// perceptible.
pub fn opacity_factor(hovering: bool, velocity_magnitude: f32, high_contrast: bool) -> f32 {
    let base = if hovering {
        OPACITY_HOVERING
    } else {
        OPACITY_RESTING
    };
    let velocity_mult =
        (1.0 + velocity_magnitude * OPACITY_VELOCITY_SCALE).min(OPACITY_VELOCITY_MAX);
    let contrast_mult = if high_contrast { HIGH_CONTRAST_BOOST } else { 1.0 };
    (base * velocity_mult * contrast_mult).min(1.0)
}
