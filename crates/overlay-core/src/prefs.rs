/// Live user/OS preference queries. Re-polled at every decision point so a
/// mid-session OS setting change takes effect without a remount; the engine
/// never caches these answers.
pub trait PreferenceSource {
    fn reduce_motion(&self) -> bool;
    fn high_contrast(&self) -> bool;
}

/// Fixed answers, for drivers and tests outside a browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedPreferences {
    pub reduce_motion: bool,
    pub high_contrast: bool,
}

impl PreferenceSource for FixedPreferences {
    fn reduce_motion(&self) -> bool {
        self.reduce_motion
    }
    fn high_contrast(&self) -> bool {
        self.high_contrast
    }
}
