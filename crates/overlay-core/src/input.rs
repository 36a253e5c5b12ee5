use glam::Vec2;

use crate::config::OverlayConfig;
use crate::constants::{ASSUMED_TOUCH_FRAME_MS, CENTER, NORM_MAX};

/// Render-surface bounding rectangle in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// A rect the layout engine has not sized yet. Coordinate conversion
    /// against it would divide by zero, so input is dropped until a real
    /// rect is observed.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Supplies the current bounding rect on demand; the engine never owns
/// layout.
pub trait SurfaceProvider {
    fn bounding_rect(&self) -> SurfaceRect;
}

/// Which input source last set the target. Pointer and touch idle back to
/// center on leave; keyboard-set positions persist until cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Pointer,
    Touch,
    Keyboard,
}

/// Shared position state for one overlay instance. Both the input tracker
/// and the accessibility bridge write `target`; the integrator advances
/// `current` toward it once per tick.
#[derive(Clone, Debug)]
pub struct MotionState {
    /// Desired position, normalized [0, 100] per axis.
    pub target: Vec2,
    /// Smoothed, rendered position.
    pub current: Vec2,
    /// Touch-gesture velocity that outlives the gesture, units/sec.
    pub residual_velocity: Vec2,
    pub mode: InteractionMode,
    pub hovering: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            target: Vec2::splat(CENTER),
            current: Vec2::splat(CENTER),
            residual_velocity: Vec2::ZERO,
            mode: InteractionMode::Pointer,
            hovering: false,
        }
    }
}

/// Clamp a normalized position into the [0, 100] box, inclusive.
#[inline]
pub fn clamp_norm(p: Vec2) -> Vec2 {
    p.clamp(Vec2::ZERO, Vec2::splat(NORM_MAX))
}

/// Normalizes pointer/touch events into the shared target-position signal
/// and derives touch-gesture velocity. Keyboard input goes through the
/// accessibility bridge instead.
pub struct InputTracker {
    rect: Option<SurfaceRect>,
    last_touch: Option<(Vec2, f64)>, // normalized position, timestamp ms
    max_velocity: f32,
}

impl InputTracker {
    pub fn new(max_velocity: f32) -> Self {
        Self {
            rect: None,
            last_touch: None,
            max_velocity,
        }
    }

    pub fn from_config(config: &OverlayConfig) -> Self {
        Self::new(config.max_velocity)
    }

    /// Cache the bounding rect. Called at mount and again on resize; lookups
    /// between resizes reuse the cache rather than forcing layout.
    pub fn set_rect(&mut self, rect: SurfaceRect) {
        self.rect = Some(rect);
    }

    pub fn invalidate_rect(&mut self) {
        self.rect = None;
    }

    pub fn refresh_rect(&mut self, provider: &dyn SurfaceProvider) {
        self.set_rect(provider.bounding_rect());
    }

    /// Viewport pixels -> normalized [0, 100]. `None` until a usable rect
    /// has been observed or when the input is not finite.
    fn to_normalized(&self, x_px: f32, y_px: f32) -> Option<Vec2> {
        let rect = self.rect?;
        if rect.is_degenerate() || !x_px.is_finite() || !y_px.is_finite() {
            return None;
        }
        let nx = (x_px - rect.left) / rect.width * NORM_MAX;
        let ny = (y_px - rect.top) / rect.height * NORM_MAX;
        Some(clamp_norm(Vec2::new(nx, ny)))
    }

    pub fn on_pointer_move(&mut self, state: &mut MotionState, x_px: f32, y_px: f32) {
        if let Some(p) = self.to_normalized(x_px, y_px) {
            state.target = p;
            state.mode = InteractionMode::Pointer;
        }
    }

    /// Touch movement sets the target like a pointer and additionally
    /// samples instantaneous gesture velocity between consecutive touches.
    /// Missing timestamps fall back to an assumed 16 ms frame spacing.
    pub fn on_touch_move(
        &mut self,
        state: &mut MotionState,
        x_px: f32,
        y_px: f32,
        timestamp_ms: Option<f64>,
    ) {
        let Some(p) = self.to_normalized(x_px, y_px) else {
            return;
        };
        if let Some((prev, prev_ts)) = self.last_touch {
            let dt_ms = match timestamp_ms {
                Some(ts) if ts > prev_ts => ts - prev_ts,
                _ => ASSUMED_TOUCH_FRAME_MS,
            };
            let dt_sec = (dt_ms / 1000.0) as f32;
            let velocity = (p - prev) / dt_sec;
            state.residual_velocity = velocity.clamp_length_max(self.max_velocity);
        }
        self.last_touch = Some((p, timestamp_ms.unwrap_or(0.0)));
        state.target = p;
        state.mode = InteractionMode::Touch;
    }

    /// Ends the gesture but deliberately leaves the residual velocity for
    /// the integrator to decay as momentum.
    pub fn on_touch_end(&mut self, _state: &mut MotionState) {
        self.last_touch = None;
    }

    pub fn on_pointer_enter(&mut self, state: &mut MotionState) {
        state.hovering = true;
    }

    /// Pointer/touch positions idle back to center; a keyboard-set target
    /// is not overridden.
    pub fn on_pointer_leave(&mut self, state: &mut MotionState) {
        state.hovering = false;
        if state.mode != InteractionMode::Keyboard {
            state.target = Vec2::splat(CENTER);
            state.residual_velocity = Vec2::ZERO;
        }
        self.last_touch = None;
    }
}
