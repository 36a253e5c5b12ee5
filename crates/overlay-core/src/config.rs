use std::time::Duration;

use crate::constants::*;
use crate::fallback::FallbackMode;

/// Engine configuration. The motion constants (momentum scale, decay, lerp
/// factors) are empirically tuned values, exposed here rather than baked in
/// so deployments can adjust the feel without a rebuild.
#[derive(Clone, Debug)]
pub struct OverlayConfig {
    /// Bounded recovery attempts before settling into a degraded mode.
    pub max_retries: u32,
    /// Backoff base; attempt n is scheduled after `retry_delay * n`.
    pub retry_delay: Duration,
    /// Overrides the capability-derived initial degraded mode.
    pub preferred_fallback_mode: Option<FallbackMode>,
    /// Target frame duration; ticks arriving sooner are skipped.
    pub frame_budget: Duration,
    /// Per-tick multiplicative decay applied to residual touch velocity.
    pub velocity_decay: f32,
    /// Clamp on any velocity magnitude, normalized units per second.
    pub max_velocity: f32,
    /// Residual velocity -> target displacement scale per tick.
    pub momentum_scale: f32,
    /// Interpolation factor at rest.
    pub lerp_base: f32,
    /// Interpolation factor growth per unit of observed velocity.
    pub lerp_velocity_scale: f32,
    /// Cap on the adaptive interpolation factor.
    pub lerp_max: f32,
    /// Residual velocity magnitude below which momentum is considered stopped.
    pub stop_epsilon: f32,
    /// Minimum per-axis change worth repainting.
    pub min_propagation_delta: f32,
    /// Seed for the minimal-particles fallback scatter.
    pub particle_seed: u64,
    /// Enables the diagnostic summary. Never on by default.
    pub verbose: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_millis(2000),
            preferred_fallback_mode: None,
            frame_budget: Duration::from_secs_f32(FRAME_BUDGET_MS / 1000.0),
            velocity_decay: VELOCITY_DECAY,
            max_velocity: MAX_VELOCITY,
            momentum_scale: MOMENTUM_SCALE,
            lerp_base: LERP_BASE,
            lerp_velocity_scale: LERP_VELOCITY_SCALE,
            lerp_max: LERP_MAX,
            stop_epsilon: STOP_EPSILON,
            min_propagation_delta: MIN_PROPAGATION_DELTA,
            particle_seed: 42,
            verbose: false,
        }
    }
}
