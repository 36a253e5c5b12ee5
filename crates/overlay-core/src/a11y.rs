use glam::Vec2;

use crate::constants::{CENTER, KEY_STEP, KEY_STEP_SHIFT, NORM_MAX};
use crate::input::{clamp_norm, InteractionMode, MotionState};

/// Screen-reader announcement channel (an ARIA live region in the browser).
/// Fire-and-forget; text is produced synchronously with the action.
pub trait Announcer {
    fn announce(&mut self, text: &str);
}

/// Used when no announcer is wired up.
pub struct NullAnnouncer;

impl Announcer for NullAnnouncer {
    fn announce(&mut self, _text: &str) {}
}

/// Keys the overlay responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Center,
    Space,
}

/// Map a host key string (KeyboardEvent.key) to an overlay key.
#[inline]
pub fn key_from_str(key: &str) -> Option<Key> {
    match key {
        "ArrowLeft" => Some(Key::ArrowLeft),
        "ArrowRight" => Some(Key::ArrowRight),
        "ArrowUp" => Some(Key::ArrowUp),
        "ArrowDown" => Some(Key::ArrowDown),
        "Home" => Some(Key::Home),
        "End" => Some(Key::End),
        "c" | "C" => Some(Key::Center),
        " " => Some(Key::Space),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct KeyboardOutcome {
    pub position_changed: bool,
    pub pause_toggled: bool,
}

/// Keyboard control of the target position. Arrows step by 5 units (10 with
/// Shift), Home/End jump to the corners, `c` recenters, Space toggles
/// pause. Every position change marks the interaction as keyboard-owned and
/// announces the new position in whole percentages.
pub fn handle_key(
    state: &mut MotionState,
    paused: &mut bool,
    key: Key,
    shift_held: bool,
    announcer: &mut dyn Announcer,
) -> KeyboardOutcome {
    let step = if shift_held { KEY_STEP_SHIFT } else { KEY_STEP };
    let mut outcome = KeyboardOutcome::default();

    match key {
        Key::ArrowLeft => move_target(state, Vec2::new(-step, 0.0), announcer),
        Key::ArrowRight => move_target(state, Vec2::new(step, 0.0), announcer),
        Key::ArrowUp => move_target(state, Vec2::new(0.0, -step), announcer),
        Key::ArrowDown => move_target(state, Vec2::new(0.0, step), announcer),
        Key::Home => set_target(state, Vec2::ZERO, announcer),
        Key::End => set_target(state, Vec2::splat(NORM_MAX), announcer),
        Key::Center => {
            set_target(state, Vec2::splat(CENTER), announcer);
            outcome.position_changed = true;
            return outcome;
        }
        Key::Space => {
            *paused = !*paused;
            announcer.announce(if *paused {
                "Animation paused"
            } else {
                "Animation resumed"
            });
            outcome.pause_toggled = true;
            return outcome;
        }
    }
    outcome.position_changed = true;
    outcome
}

fn move_target(state: &mut MotionState, delta: Vec2, announcer: &mut dyn Announcer) {
    set_target(state, state.target + delta, announcer);
}

fn set_target(state: &mut MotionState, target: Vec2, announcer: &mut dyn Announcer) {
    state.target = clamp_norm(target);
    state.mode = InteractionMode::Keyboard;
    announcer.announce(&position_announcement(state.target));
}

/// Position text rounded to whole percentages.
pub fn position_announcement(target: Vec2) -> String {
    format!(
        "Overlay position {}%, {}%",
        target.x.round() as i32,
        target.y.round() as i32
    )
}
