use crate::visual::Hsl;

// Shared tuning constants for the overlay engine. Motion constants that are
// expected to be tuned per deployment live in `OverlayConfig`; these are the
// defaults plus the fixed visual tables.

// Normalized coordinate space
pub const NORM_MAX: f32 = 100.0; // positions live in [0, 100] per axis
pub const CENTER: f32 = 50.0;

// Smoothing defaults
pub const LERP_BASE: f32 = 0.08; // interpolation factor at rest
pub const LERP_VELOCITY_SCALE: f32 = 0.01; // factor growth per unit of velocity
pub const LERP_MAX: f32 = 0.2; // adaptive factor cap
pub const MIN_PROPAGATION_DELTA: f32 = 0.01; // below this, skip the repaint

// Momentum defaults
pub const MOMENTUM_SCALE: f32 = 0.1; // residual velocity -> displacement per tick
pub const VELOCITY_DECAY: f32 = 0.95; // multiplicative decay per tick
pub const STOP_EPSILON: f32 = 0.1; // residual magnitude treated as stopped
pub const MAX_VELOCITY: f32 = 100.0; // clamp, normalized units per second
pub const ASSUMED_TOUCH_FRAME_MS: f64 = 16.0; // spacing when no timestamp arrives

// Scheduling
pub const FRAME_BUDGET_MS: f32 = 1000.0 / 60.0; // target frame duration

// Keyboard steps, normalized units
pub const KEY_STEP: f32 = 5.0;
pub const KEY_STEP_SHIFT: f32 = 10.0;

// Blend mode thresholds on velocity magnitude. A flat step function; flicker
// near a threshold is an accepted cosmetic tradeoff.
pub const BLEND_SCREEN_THRESHOLD: f32 = 10.0;
pub const BLEND_DODGE_THRESHOLD: f32 = 40.0;

// Opacity
pub const OPACITY_RESTING: f32 = 0.5;
pub const OPACITY_HOVERING: f32 = 0.8;
pub const OPACITY_VELOCITY_SCALE: f32 = 0.01; // 1 + magnitude * scale
pub const OPACITY_VELOCITY_MAX: f32 = 2.0; // cap on the velocity multiplier
pub const HIGH_CONTRAST_BOOST: f32 = 1.5;

// Parallax layers
pub const LAYER_COUNT: usize = 3;
pub const LAYER_SPEEDS: [f32; LAYER_COUNT] = [0.3, 0.6, 1.0]; // far -> near
pub const LAYER_SIZE_FACTORS: [f32; LAYER_COUNT] = [0.6, 0.45, 0.3]; // of min viewport dimension
pub const LAYER_OFFSETS: [[f32; 2]; LAYER_COUNT] = [[0.0, 0.0], [-8.0, 6.0], [10.0, -4.0]];
pub const LAYER_BASE_OPACITIES: [f32; LAYER_COUNT] = [0.6, 0.45, 0.35];

// Four corner colors per layer (top-left, top-right, bottom-left,
// bottom-right) in HSL. Distinct hue ranges per layer give depth once the
// layers move at different parallax speeds.
pub const LAYER_PALETTES: [[Hsl; 4]; LAYER_COUNT] = [
    // blue <-> purple
    [
        Hsl::new(220.0, 0.85, 0.55),
        Hsl::new(250.0, 0.80, 0.60),
        Hsl::new(235.0, 0.75, 0.45),
        Hsl::new(270.0, 0.85, 0.50),
    ],
    // green <-> teal
    [
        Hsl::new(140.0, 0.70, 0.50),
        Hsl::new(165.0, 0.75, 0.45),
        Hsl::new(150.0, 0.65, 0.40),
        Hsl::new(180.0, 0.80, 0.45),
    ],
    // violet <-> magenta
    [
        Hsl::new(275.0, 0.80, 0.60),
        Hsl::new(300.0, 0.85, 0.55),
        Hsl::new(285.0, 0.75, 0.50),
        Hsl::new(320.0, 0.85, 0.55),
    ],
];

// Minimal-particles fallback
pub const PARTICLE_COUNT: usize = 16;
pub const PARTICLE_SIZE_PX: f32 = 6.0;
pub const PARTICLE_OPACITY: f32 = 0.25;
