use std::thread;
use std::time::Duration;

use instant::Instant;
use overlay_core::{
    Announcer, FixedPreferences, FixedProbe, Overlay, OverlayConfig, PresentationSink,
    RenderPrimitive, SurfaceRect,
};

const VIEWPORT_W: f32 = 1280.0;
const VIEWPORT_H: f32 = 720.0;
const RUN_SECONDS: f32 = 10.0;

/// Presentation sink that logs composited frames instead of drawing them.
struct LogSink {
    frames_presented: u64,
}

impl PresentationSink for LogSink {
    fn present(&mut self, primitives: &[RenderPrimitive]) -> Result<(), overlay_core::OverlayError> {
        self.frames_presented += 1;
        for p in primitives {
            log::debug!(
                "layer {} at ({:.1}, {:.1}) size {:.0}px hsl({:.0}, {:.2}, {:.2}) {:?} opacity {:.2}",
                p.layer,
                p.position.x,
                p.position.y,
                p.size_px,
                p.color.h,
                p.color.s,
                p.color.l,
                p.blend,
                p.opacity
            );
        }
        Ok(())
    }
}

struct LogAnnouncer;

impl Announcer for LogAnnouncer {
    fn announce(&mut self, text: &str) {
        log::info!("announce: {text}");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let prefs = FixedPreferences {
        reduce_motion: std::env::var("OVERLAY_REDUCE_MOTION").is_ok(),
        high_contrast: std::env::var("OVERLAY_HIGH_CONTRAST").is_ok(),
    };
    let probe = FixedProbe::all_supported();
    let mut overlay = Overlay::new(
        OverlayConfig::default(),
        &probe,
        Box::new(prefs),
        Box::new(LogAnnouncer),
        None,
    );
    overlay.attach(SurfaceRect::sized(VIEWPORT_W, VIEWPORT_H));
    overlay.on_pointer_enter();

    let mut sink = LogSink {
        frames_presented: 0,
    };
    let start = Instant::now();
    log::info!(
        "driving overlay for {RUN_SECONDS}s at ~60 Hz ({}x{} viewport)",
        VIEWPORT_W,
        VIEWPORT_H
    );

    // Orbit the pointer around the viewport center, the same frame-budget
    // throttling the engine would apply behind a browser scheduler.
    loop {
        let now = Instant::now();
        let t = (now - start).as_secs_f32();
        if t >= RUN_SECONDS {
            break;
        }
        let nx = 50.0 + 35.0 * (t * 0.8).cos();
        let ny = 50.0 + 25.0 * (t * 0.8).sin();
        overlay.on_pointer_move(nx / 100.0 * VIEWPORT_W, ny / 100.0 * VIEWPORT_H);
        overlay.tick(now, &mut sink);
        thread::sleep(Duration::from_millis(16));
    }

    overlay.on_pointer_leave();
    // Let the position settle back to center before detaching.
    for _ in 0..120 {
        overlay.tick(Instant::now(), &mut sink);
        thread::sleep(Duration::from_millis(16));
    }
    overlay.detach();

    let state = overlay.motion_state();
    log::info!(
        "presented {} frames, settled at ({:.2}, {:.2})",
        sink.frames_presented,
        state.current.x,
        state.current.y
    );
    Ok(())
}
