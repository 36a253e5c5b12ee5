use glam::Vec2;
use instant::Instant;

use crate::config::OverlayConfig;
use crate::input::{clamp_norm, MotionState};

/// Animation loop lifecycle. `Paused` keeps the loop intact so resuming is
/// instantaneous; `Stopped` means torn down (detach or never started).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// Outcome of a single tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickResult {
    /// Whether integration work happened (false on budget skips and while
    /// not running).
    pub advanced: bool,
    /// Whether the change was large enough to be worth repainting.
    pub propagate: bool,
    /// Observed velocity magnitude used for visual derivation.
    pub velocity_magnitude: f32,
}

/// The animation loop proper: advances `current` toward `target` with an
/// adaptive interpolation factor and applies momentum decay to residual
/// touch velocity. All arithmetic is in normalized units so behavior is
/// resolution-independent.
pub struct Integrator {
    loop_state: LoopState,
    last_frame: Option<Instant>,
    velocity: Vec2,
}

impl Integrator {
    pub fn new() -> Self {
        Self {
            loop_state: LoopState::Stopped,
            last_frame: None,
            velocity: Vec2::ZERO,
        }
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn start(&mut self) {
        if self.loop_state == LoopState::Stopped {
            self.loop_state = LoopState::Running;
            self.last_frame = None;
            log::debug!("animation loop started");
        }
    }

    pub fn pause(&mut self) {
        if self.loop_state == LoopState::Running {
            self.loop_state = LoopState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.loop_state == LoopState::Paused {
            self.loop_state = LoopState::Running;
            // Drop the stale frame time so the pause gap does not read as a
            // huge delta.
            self.last_frame = None;
        }
    }

    pub fn stop(&mut self) {
        self.loop_state = LoopState::Stopped;
        self.last_frame = None;
        self.velocity = Vec2::ZERO;
    }

    /// One scheduled frame. Checked top-of-tick state makes cancellation
    /// cooperative: pausing or stopping takes effect on the next tick.
    pub fn tick(&mut self, state: &mut MotionState, config: &OverlayConfig, now: Instant) -> TickResult {
        if self.loop_state != LoopState::Running {
            return TickResult::default();
        }

        // Frame-rate limiting: on high-refresh displays, skip ticks that
        // arrive inside the budget instead of integrating faster.
        let dt = match self.last_frame {
            Some(prev) => {
                let dt = now - prev;
                if dt < config.frame_budget {
                    return TickResult::default();
                }
                dt
            }
            None => config.frame_budget,
        };
        self.last_frame = Some(now);
        let dt_sec = dt.as_secs_f32();

        // Momentum: a flick keeps drifting the target after the touch ends,
        // decaying geometrically like discrete-time friction.
        if state.residual_velocity.length() > config.stop_epsilon {
            state.target =
                clamp_norm(state.target + state.residual_velocity * config.momentum_scale);
            state.residual_velocity *= config.velocity_decay;
        } else if state.residual_velocity != Vec2::ZERO {
            state.residual_velocity = Vec2::ZERO;
        }

        // Observed velocity for visual derivation, distinct from the
        // residual touch velocity.
        self.velocity = ((state.target - state.current) / dt_sec).clamp_length_max(config.max_velocity);
        let magnitude = self.velocity.length();

        // Adaptive smoothing: catch up faster under fast motion, stay
        // buttery at rest.
        let factor =
            (config.lerp_base * (1.0 + magnitude * config.lerp_velocity_scale)).min(config.lerp_max);
        let delta = (state.target - state.current) * factor;

        // Sub-threshold motion is imperceptible; skipping the write avoids a
        // repaint and the style recomputation it triggers downstream.
        let propagate = delta.x.abs() > config.min_propagation_delta
            || delta.y.abs() > config.min_propagation_delta;
        if propagate {
            state.current += delta;
        }

        TickResult {
            advanced: true,
            propagate,
            velocity_magnitude: magnitude,
        }
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new()
    }
}
