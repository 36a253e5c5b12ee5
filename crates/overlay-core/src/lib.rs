//! Pointer-reactive parallax gradient overlay engine.
//!
//! The core is host-agnostic: pointer/touch/keyboard events, capability
//! probing, preference queries, frame scheduling, and presentation all go
//! through small collaborator traits, so the same engine runs behind a
//! browser compositor or a headless fixed-rate timer.

pub mod a11y;
pub mod capability;
pub mod compositor;
pub mod config;
pub mod constants;
pub mod error;
pub mod fallback;
pub mod input;
pub mod motion;
pub mod overlay;
pub mod prefs;
pub mod visual;

pub use a11y::*;
pub use capability::*;
pub use compositor::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use fallback::*;
pub use input::*;
pub use motion::*;
pub use overlay::*;
pub use prefs::*;
pub use visual::*;
