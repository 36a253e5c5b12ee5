// End-to-end tests through the owning `Overlay` instance: reduced motion,
// loop lifecycle, failure containment, and detach behavior.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use instant::Instant;
use overlay_core::{
    Announcer, ErrorRecord, ErrorReporter, FallbackState, FixedPreferences, FixedProbe, LoopState,
    Overlay, OverlayConfig, OverlayError, PresentationSink, RenderPrimitive, SurfaceRect,
};

const TICK: Duration = Duration::from_micros(17_000);

#[derive(Default)]
struct RecordingSink {
    frames: Vec<Vec<RenderPrimitive>>,
    fail_remaining: u32,
}

impl PresentationSink for RecordingSink {
    fn present(&mut self, primitives: &[RenderPrimitive]) -> Result<(), OverlayError> {
        if self.fail_remaining > 0 {
            self.fail_remaining -= 1;
            return Err(OverlayError::RenderSurfaceLost);
        }
        self.frames.push(primitives.to_vec());
        Ok(())
    }
}

// Shared handle so the test can inspect records after the overlay takes
// ownership of the reporter box.
#[derive(Clone, Default)]
struct RecordingReporter {
    records: Rc<RefCell<Vec<ErrorRecord>>>,
}

impl ErrorReporter for RecordingReporter {
    fn report(&mut self, record: &ErrorRecord) {
        self.records.borrow_mut().push(record.clone());
    }
}

#[derive(Default)]
struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn announce(&mut self, _text: &str) {}
}

fn build_overlay(prefs: FixedPreferences) -> Overlay {
    let probe = FixedProbe::all_supported();
    let mut overlay = Overlay::new(
        OverlayConfig::default(),
        &probe,
        Box::new(prefs),
        Box::new(SilentAnnouncer),
        None,
    );
    overlay.attach(SurfaceRect::sized(1000.0, 1000.0));
    overlay
}

#[test]
fn fresh_mount_with_no_interaction_stays_stopped() {
    // Scenario A, first half: nothing runs until a pointer enters.
    let mut overlay = build_overlay(FixedPreferences::default());
    let mut sink = RecordingSink::default();
    let now = Instant::now();
    overlay.tick(now, &mut sink);
    assert_eq!(overlay.loop_state(), LoopState::Stopped);
    assert!(sink.frames.is_empty(), "no frames before interaction");
}

#[test]
fn pointer_enter_starts_loop_with_zero_net_movement() {
    // Scenario A, second half: the loop starts on enter but target equals
    // the initial centered position, so nothing propagates.
    let mut overlay = build_overlay(FixedPreferences::default());
    let mut sink = RecordingSink::default();
    overlay.on_pointer_enter();
    assert_eq!(overlay.loop_state(), LoopState::Running);

    let mut now = Instant::now();
    for _ in 0..10 {
        overlay.tick(now, &mut sink);
        now += TICK;
    }
    assert!(sink.frames.is_empty(), "rest at center must not repaint");
    let state = overlay.motion_state();
    assert_eq!(state.current, state.target);
}

#[test]
fn pointer_movement_produces_parallax_frames() {
    let mut overlay = build_overlay(FixedPreferences::default());
    let mut sink = RecordingSink::default();
    overlay.on_pointer_enter();
    overlay.on_pointer_move(800.0, 200.0); // normalized (80, 20)

    let mut now = Instant::now();
    for _ in 0..50 {
        overlay.tick(now, &mut sink);
        now += TICK;
    }
    assert!(!sink.frames.is_empty());
    let frame = sink.frames.last().expect("at least one frame");
    assert_eq!(frame.len(), 3, "one primitive per parallax layer");
    // Layers are ordered far to near with increasing speed multipliers, so
    // the near layer sits furthest from center on x.
    let near = &frame[2];
    let far = &frame[0];
    assert!(
        (near.position.x - 50.0).abs() > (far.position.x - 50.0).abs(),
        "near layer must move more than far layer"
    );
}

#[test]
fn reduced_motion_suppresses_animation_entirely() {
    let prefs = FixedPreferences {
        reduce_motion: true,
        high_contrast: false,
    };
    let mut overlay = build_overlay(prefs);
    assert!(
        !overlay.wants_pointer_events(),
        "pointer listeners must not even be attached"
    );

    let mut sink = RecordingSink::default();
    overlay.on_pointer_enter();
    overlay.on_pointer_move(900.0, 900.0);
    assert_eq!(
        overlay.loop_state(),
        LoopState::Stopped,
        "reduced motion never starts the loop"
    );

    let mut now = Instant::now();
    for _ in 0..20 {
        overlay.tick(now, &mut sink);
        now += TICK;
    }
    assert_eq!(
        sink.frames.len(),
        1,
        "static presentation is emitted once, never re-rendered"
    );
    let state = overlay.motion_state();
    assert_eq!(
        state.target.x, 50.0,
        "pointer input must be ignored under reduced motion"
    );
}

#[test]
fn keyboard_stays_active_under_reduced_motion() {
    let prefs = FixedPreferences {
        reduce_motion: true,
        high_contrast: false,
    };
    let mut overlay = build_overlay(prefs);
    overlay.on_key("ArrowRight", true);
    assert_eq!(overlay.motion_state().target.x, 60.0);
}

#[test]
fn space_pauses_and_resumes_the_loop() {
    let mut overlay = build_overlay(FixedPreferences::default());
    let mut sink = RecordingSink::default();
    overlay.on_pointer_enter();
    overlay.on_pointer_move(900.0, 900.0);

    overlay.on_key(" ", false);
    assert!(overlay.is_paused());
    assert_eq!(overlay.loop_state(), LoopState::Paused);

    let mut now = Instant::now();
    for _ in 0..10 {
        overlay.tick(now, &mut sink);
        now += TICK;
    }
    assert!(sink.frames.is_empty(), "paused loop must not repaint");

    overlay.on_key(" ", false);
    assert_eq!(overlay.loop_state(), LoopState::Running);
    for _ in 0..5 {
        overlay.tick(now, &mut sink);
        now += TICK;
    }
    assert!(!sink.frames.is_empty(), "resume must be instantaneous");
}

#[test]
fn render_failure_degrades_and_reports() {
    let probe = FixedProbe::all_supported();
    let config = OverlayConfig {
        max_retries: 0, // settle immediately for the test
        ..OverlayConfig::default()
    };
    let reporter = RecordingReporter::default();
    let records = reporter.records.clone();
    let mut overlay = Overlay::new(
        config,
        &probe,
        Box::new(FixedPreferences::default()),
        Box::new(SilentAnnouncer),
        Some(Box::new(reporter)),
    );
    overlay.attach(SurfaceRect::sized(1000.0, 1000.0));
    overlay.on_pointer_enter();
    overlay.on_pointer_move(900.0, 900.0);

    let mut sink = RecordingSink {
        frames: Vec::new(),
        fail_remaining: 1,
    };
    let mut now = Instant::now();
    for _ in 0..5 {
        overlay.tick(now, &mut sink);
        now += TICK;
    }
    assert!(
        matches!(overlay.fallback_state(), FallbackState::Degraded(_)),
        "failure must settle into a degraded mode, got {:?}",
        overlay.fallback_state()
    );
    assert!(
        !sink.frames.is_empty(),
        "a degraded presentation must still be shown"
    );
    let records = records.borrow();
    assert!(!records.is_empty(), "the reporter must receive a record");
    assert_eq!(records[0].class, overlay_core::ErrorClass::RenderSurfaceLost);
}

#[test]
fn surface_loss_report_triggers_recovery_then_success_resumes() {
    let mut overlay = build_overlay(FixedPreferences::default());
    let mut sink = RecordingSink::default();
    overlay.on_pointer_enter();
    overlay.on_pointer_move(900.0, 900.0);

    let t0 = Instant::now();
    overlay.report_surface_lost(t0);
    assert_eq!(overlay.fallback_state(), FallbackState::Recovering);
    assert_eq!(overlay.retry_count(), 1);

    // Before the backoff fires we render the interim fallback, once.
    overlay.tick(t0 + Duration::from_millis(100), &mut sink);
    overlay.tick(t0 + Duration::from_millis(200), &mut sink);
    assert_eq!(sink.frames.len(), 1, "interim fallback is one-shot");

    // After the 2s backoff the retry fires and the pipeline resumes.
    let mut now = t0 + Duration::from_millis(2100);
    for _ in 0..30 {
        overlay.tick(now, &mut sink);
        now += TICK;
    }
    assert_eq!(overlay.fallback_state(), FallbackState::Normal);
    assert!(
        sink.frames.len() > 1,
        "animated frames must resume after recovery"
    );
}

#[test]
fn detach_makes_all_callbacks_no_ops() {
    let mut overlay = build_overlay(FixedPreferences::default());
    let mut sink = RecordingSink::default();
    overlay.on_pointer_enter();
    overlay.on_pointer_move(900.0, 900.0);
    overlay.detach();
    assert_eq!(overlay.loop_state(), LoopState::Stopped);

    let target = overlay.motion_state().target;
    overlay.on_pointer_move(100.0, 100.0);
    assert_eq!(
        overlay.motion_state().target,
        target,
        "input after detach must be ignored"
    );

    let mut now = Instant::now();
    for _ in 0..5 {
        overlay.tick(now, &mut sink);
        now += TICK;
    }
    assert!(sink.frames.is_empty(), "no frame may fire against disposed state");
}

#[test]
fn diagnostics_only_available_when_verbose() {
    let probe = FixedProbe::all_supported();
    for (verbose, expect_some) in [(false, false), (true, true)] {
        let config = OverlayConfig {
            verbose,
            max_retries: 0,
            ..OverlayConfig::default()
        };
        let mut overlay = Overlay::new(
            config,
            &probe,
            Box::new(FixedPreferences::default()),
            Box::new(SilentAnnouncer),
            None,
        );
        overlay.attach(SurfaceRect::sized(1000.0, 1000.0));
        overlay.report_surface_lost(Instant::now());
        assert_eq!(
            overlay.diagnostics().is_some(),
            expect_some,
            "diagnostics gating broken for verbose={verbose}"
        );
    }
}

#[test]
fn touch_flick_drifts_after_release() {
    // Scenario C end to end: swipe right, release, and the rendered
    // position keeps moving +x for several frames.
    let mut overlay = build_overlay(FixedPreferences::default());
    let mut sink = RecordingSink::default();
    overlay.on_touch_start(100.0, 100.0, Some(0.0));
    overlay.on_touch_move(400.0, 100.0, Some(16.0));
    overlay.on_touch_end();

    let target_at_release = overlay.motion_state().target.x;
    let mut now = Instant::now();
    for _ in 0..10 {
        overlay.tick(now, &mut sink);
        now += TICK;
    }
    assert!(
        overlay.motion_state().target.x > target_at_release,
        "momentum must keep drifting the target after release"
    );
    assert!(overlay.motion_state().current.x > 10.0);
}
