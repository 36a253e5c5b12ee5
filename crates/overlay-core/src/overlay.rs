use instant::Instant;

use crate::a11y::{self, Announcer, Key};
use crate::capability::{CapabilitySnapshot, HostProbe};
use crate::compositor::{self, FramePrimitives, LayerConfig, PresentationSink};
use crate::config::OverlayConfig;
use crate::constants::LAYER_COUNT;
use crate::error::{ErrorRecord, ErrorReporter, OverlayError};
use crate::fallback::{FallbackMode, FallbackState, Supervisor};
use crate::input::{InputTracker, MotionState, SurfaceRect};
use crate::motion::{Integrator, LoopState};
use crate::prefs::PreferenceSource;

/// One overlay instance: owns all mutable animation state, so multiple
/// overlays on a page never share anything. Host event plumbing calls the
/// `on_*` methods; the per-frame scheduler calls `tick`.
pub struct Overlay {
    config: OverlayConfig,
    capabilities: CapabilitySnapshot,
    state: MotionState,
    tracker: InputTracker,
    integrator: Integrator,
    supervisor: Supervisor,
    layers: [LayerConfig; LAYER_COUNT],
    paused: bool,
    attached: bool,
    /// Which fallback presentation was last emitted; degraded and static
    /// frames are one-shot, re-emitted only when the mode changes.
    last_fallback_emitted: Option<FallbackMode>,
    last_record: Option<ErrorRecord>,
    prefs: Box<dyn PreferenceSource>,
    announcer: Box<dyn Announcer>,
    reporter: Option<Box<dyn ErrorReporter>>,
}

impl Overlay {
    pub fn new(
        config: OverlayConfig,
        probe: &dyn HostProbe,
        prefs: Box<dyn PreferenceSource>,
        announcer: Box<dyn Announcer>,
        reporter: Option<Box<dyn ErrorReporter>>,
    ) -> Self {
        let capabilities = CapabilitySnapshot::probe(probe);
        let mut supervisor = Supervisor::new(&config, capabilities);
        let initial = supervisor.initial_assessment();
        let tracker = InputTracker::from_config(&config);
        let mut overlay = Self {
            config,
            capabilities,
            state: MotionState::default(),
            tracker,
            integrator: Integrator::new(),
            supervisor,
            layers: compositor::build_layers(1.0, 1.0),
            paused: false,
            attached: false,
            last_fallback_emitted: None,
            last_record: None,
            prefs,
            announcer,
            reporter,
        };
        if let Some(record) = initial {
            overlay.report(record);
        }
        overlay
    }

    /// Mount against a laid-out surface: cache the rect and derive the
    /// parallax layer geometry from the viewport.
    pub fn attach(&mut self, rect: SurfaceRect) {
        self.tracker.set_rect(rect);
        self.layers = compositor::build_layers(rect.width, rect.height);
        self.attached = true;
    }

    /// Unmount: stop the loop, cancel the pending retry timer, and make all
    /// further callbacks no-ops so nothing fires against disposed state.
    pub fn detach(&mut self) {
        self.integrator.stop();
        self.supervisor.detach();
        self.attached = false;
        self.last_fallback_emitted = None;
    }

    /// Under reduced motion the accessibility bridge is the only interactive
    /// path; the host should not attach pointer/touch listeners at all.
    pub fn wants_pointer_events(&self) -> bool {
        !self.prefs.reduce_motion()
    }

    pub fn on_resize(&mut self, rect: SurfaceRect) {
        self.tracker.set_rect(rect);
        self.layers = compositor::build_layers(rect.width, rect.height);
        // Geometry changed, so a previously emitted static frame is stale.
        self.last_fallback_emitted = None;
    }

    pub fn on_pointer_enter(&mut self) {
        if !self.pointer_input_active() {
            return;
        }
        self.tracker.on_pointer_enter(&mut self.state);
        self.maybe_start();
    }

    pub fn on_pointer_move(&mut self, x_px: f32, y_px: f32) {
        if !self.pointer_input_active() {
            return;
        }
        self.tracker.on_pointer_move(&mut self.state, x_px, y_px);
    }

    pub fn on_pointer_leave(&mut self) {
        if !self.pointer_input_active() {
            return;
        }
        self.tracker.on_pointer_leave(&mut self.state);
    }

    pub fn on_touch_start(&mut self, x_px: f32, y_px: f32, timestamp_ms: Option<f64>) {
        if !self.pointer_input_active() {
            return;
        }
        self.tracker
            .on_touch_move(&mut self.state, x_px, y_px, timestamp_ms);
        self.maybe_start();
    }

    pub fn on_touch_move(&mut self, x_px: f32, y_px: f32, timestamp_ms: Option<f64>) {
        if !self.pointer_input_active() {
            return;
        }
        self.tracker
            .on_touch_move(&mut self.state, x_px, y_px, timestamp_ms);
    }

    pub fn on_touch_end(&mut self) {
        if !self.pointer_input_active() {
            return;
        }
        self.tracker.on_touch_end(&mut self.state);
    }

    /// Keyboard input stays active in every mode, including reduced motion.
    pub fn on_key(&mut self, key: &str, shift_held: bool) {
        let Some(key) = a11y::key_from_str(key) else {
            return;
        };
        self.on_key_parsed(key, shift_held);
    }

    pub fn on_key_parsed(&mut self, key: Key, shift_held: bool) {
        if !self.attached {
            return;
        }
        let outcome = a11y::handle_key(
            &mut self.state,
            &mut self.paused,
            key,
            shift_held,
            self.announcer.as_mut(),
        );
        if outcome.pause_toggled {
            if self.paused {
                self.integrator.pause();
            } else {
                self.integrator.resume();
            }
        }
    }

    /// Host-reported surface loss (the surface vanished without a draw call
    /// failing first).
    pub fn report_surface_lost(&mut self, now: Instant) {
        let record = self
            .supervisor
            .on_failure(&OverlayError::RenderSurfaceLost, now);
        self.last_fallback_emitted = None;
        self.report(record);
    }

    /// One scheduled frame. Every failure is contained here; some visual
    /// result is always produced, even if that result is "render nothing".
    pub fn tick(&mut self, now: Instant, sink: &mut dyn PresentationSink) {
        if !self.attached {
            return;
        }

        // Live preference check: reduced motion bypasses the integrator and
        // renders the static path, which stays visually stable.
        if self.prefs.reduce_motion() {
            if self.integrator.loop_state() != LoopState::Stopped {
                self.integrator.stop();
            }
            let mode = match self.supervisor.active_presentation() {
                Some(FallbackMode::None) => FallbackMode::None,
                _ => FallbackMode::StaticGradient,
            };
            self.emit_fallback(mode, now, sink);
            return;
        }

        if self.supervisor.poll(now) {
            self.last_fallback_emitted = None;
        }
        if let Some(mode) = self.supervisor.active_presentation() {
            self.emit_fallback(mode, now, sink);
            return;
        }

        let result = self.integrator.tick(&mut self.state, &self.config, now);
        if !result.propagate {
            return;
        }
        let primitives = compositor::compose(
            self.state.current,
            &self.layers,
            result.velocity_magnitude,
            self.state.hovering,
            self.prefs.high_contrast(),
        );
        if let Err(err) = sink.present(&primitives) {
            self.handle_failure(err, now);
        }
    }

    pub fn loop_state(&self) -> LoopState {
        self.integrator.loop_state()
    }

    pub fn fallback_state(&self) -> FallbackState {
        self.supervisor.state()
    }

    pub fn retry_count(&self) -> u32 {
        self.supervisor.retry_count()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn capabilities(&self) -> CapabilitySnapshot {
        self.capabilities
    }

    pub fn motion_state(&self) -> &MotionState {
        &self.state
    }

    /// Diagnostic summary of the last failure. Only available in verbose
    /// configurations; production builds get `None`.
    pub fn diagnostics(&self) -> Option<String> {
        if !self.config.verbose {
            return None;
        }
        self.last_record.as_ref().map(|r| {
            format!(
                "{:?} (retries {}, fallback {:?}): {}",
                r.class, r.retry_count, r.fallback, r.message
            )
        })
    }

    fn pointer_input_active(&self) -> bool {
        self.attached && !self.prefs.reduce_motion()
    }

    fn maybe_start(&mut self) {
        if !self.paused && self.integrator.loop_state() == LoopState::Stopped {
            self.integrator.start();
        }
    }

    fn emit_fallback(&mut self, mode: FallbackMode, now: Instant, sink: &mut dyn PresentationSink) {
        if self.last_fallback_emitted == Some(mode) {
            return;
        }
        let primitives: FramePrimitives = match mode {
            // The ambient animation for this rung is declarative on the host
            // side; the engine emits the same stable gradient either way.
            FallbackMode::AnimatedGradientCss | FallbackMode::StaticGradient => {
                compositor::compose_static(&self.layers, self.prefs.high_contrast())
            }
            FallbackMode::MinimalParticles => {
                compositor::compose_particles(self.config.particle_seed)
            }
            FallbackMode::None => FramePrimitives::new(),
        };
        match sink.present(&primitives) {
            Ok(()) => self.last_fallback_emitted = Some(mode),
            Err(err) => self.handle_failure(err, now),
        }
    }

    fn handle_failure(&mut self, err: OverlayError, now: Instant) {
        let record = self.supervisor.on_failure(&err, now);
        self.last_fallback_emitted = None;
        self.report(record);
    }

    fn report(&mut self, record: ErrorRecord) {
        log::error!(
            "overlay failure {:?}: {} (retry {}, fallback {:?})",
            record.class,
            record.message,
            record.retry_count,
            record.fallback
        );
        if let Some(reporter) = self.reporter.as_mut() {
            reporter.report(&record);
        }
        self.last_record = Some(record);
    }
}
