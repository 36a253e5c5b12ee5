use std::time::Duration;

use instant::Instant;

use crate::capability::CapabilitySnapshot;
use crate::config::OverlayConfig;
use crate::error::{ErrorRecord, OverlayError};

/// The fallback ladder, ordered from richest to cheapest. Each rung is a
/// complete presentation the compositor knows how to emit; `None` renders
/// nothing and is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackMode {
    AnimatedGradientCss,
    MinimalParticles,
    StaticGradient,
    None,
}

impl FallbackMode {
    /// One step down the ladder. `None` is absorbing.
    pub fn downgrade(self) -> FallbackMode {
        match self {
            FallbackMode::AnimatedGradientCss => FallbackMode::MinimalParticles,
            FallbackMode::MinimalParticles => FallbackMode::StaticGradient,
            FallbackMode::StaticGradient => FallbackMode::None,
            FallbackMode::None => FallbackMode::None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackState {
    Normal,
    Recovering,
    Degraded(FallbackMode),
    Disabled,
}

/// Wraps the pipeline: classifies failures, picks a degraded presentation,
/// and schedules bounded, linearly backed-off recovery. Owns the single
/// source of truth for what the compositor renders.
pub struct Supervisor {
    state: FallbackState,
    /// Mode rendered whenever the full pipeline is not active.
    mode: FallbackMode,
    retry_count: u32,
    next_retry_at: Option<Instant>,
    max_retries: u32,
    retry_delay: Duration,
    capabilities: CapabilitySnapshot,
}

impl Supervisor {
    pub fn new(config: &OverlayConfig, capabilities: CapabilitySnapshot) -> Self {
        Self {
            state: FallbackState::Normal,
            mode: config
                .preferred_fallback_mode
                .unwrap_or(FallbackMode::MinimalParticles),
            retry_count: 0,
            next_retry_at: None,
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
            capabilities,
        }
    }

    pub fn state(&self) -> FallbackState {
        self.state
    }

    pub fn mode(&self) -> FallbackMode {
        self.mode
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Gate applied before the pipeline ever starts. A missing capability
    /// cannot be fixed by retrying, so this settles immediately and returns
    /// the record for reporting.
    pub fn initial_assessment(&mut self) -> Option<ErrorRecord> {
        if !self.capabilities.render_surface || !self.capabilities.animation_frame {
            self.mode = FallbackMode::None;
            self.state = FallbackState::Disabled;
            let err = OverlayError::CapabilityUnavailable(
                "no render surface or frame scheduling".into(),
            );
            return Some(self.record(&err));
        }
        if !self.capabilities.full_pipeline_supported() {
            self.mode = self.capabilities.recommended_fallback_mode();
            self.state = FallbackState::Degraded(self.mode);
            let err = OverlayError::BrowserIncompatible(
                "browser version or renderer quality below minimum".into(),
            );
            return Some(self.record(&err));
        }
        None
    }

    /// Observe a failure and decide the transition. Returns the structured
    /// record for the external reporter; producing it never fails.
    pub fn on_failure(&mut self, err: &OverlayError, now: Instant) -> ErrorRecord {
        if !err.is_recoverable() {
            self.next_retry_at = None;
            self.state = match err {
                OverlayError::CapabilityUnavailable(_) => {
                    self.mode = FallbackMode::None;
                    FallbackState::Disabled
                }
                _ => {
                    self.mode = self.capabilities.recommended_fallback_mode();
                    FallbackState::Degraded(self.mode)
                }
            };
            log::warn!("non-recoverable overlay failure, settling degraded: {err}");
            return self.record(err);
        }

        match self.state {
            // Already degraded: each further failure moves strictly one rung
            // down the ladder, never upward.
            FallbackState::Degraded(current) => {
                self.mode = current.downgrade();
                self.state = FallbackState::Degraded(self.mode);
                log::warn!("failure while degraded, downgrading to {:?}: {err}", self.mode);
            }
            _ if self.retry_count < self.max_retries => {
                // Linear backoff: attempt n waits retry_delay * n.
                let delay = self.retry_delay * (self.retry_count + 1);
                self.retry_count += 1;
                self.next_retry_at = Some(now + delay);
                self.state = FallbackState::Recovering;
                log::warn!(
                    "recoverable overlay failure, retry {}/{} in {:?}: {err}",
                    self.retry_count,
                    self.max_retries,
                    delay
                );
            }
            _ => {
                // Retries exhausted: settle one rung below where we started,
                // since the cheaper presentation is likelier to survive the
                // same failure.
                self.next_retry_at = None;
                self.mode = self.mode.downgrade();
                self.state = FallbackState::Degraded(self.mode);
                log::warn!("retries exhausted, settling into {:?}: {err}", self.mode);
            }
        }
        self.record(err)
    }

    /// Fires a due recovery attempt: clears the error state and re-enters
    /// `Normal` so the next tick tries the full pipeline again.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state != FallbackState::Recovering {
            return false;
        }
        match self.next_retry_at {
            Some(at) if now >= at => {
                self.next_retry_at = None;
                self.state = FallbackState::Normal;
                log::info!("recovery attempt {}/{}", self.retry_count, self.max_retries);
                true
            }
            _ => false,
        }
    }

    /// What to render right now: `None` means the full animated pipeline.
    pub fn active_presentation(&self) -> Option<FallbackMode> {
        match self.state {
            FallbackState::Normal => None,
            FallbackState::Recovering => Some(self.mode),
            FallbackState::Degraded(mode) => Some(mode),
            FallbackState::Disabled => Some(FallbackMode::None),
        }
    }

    /// Cancel any pending retry timer. Called on detach so no callback fires
    /// against disposed state.
    pub fn detach(&mut self) {
        self.next_retry_at = None;
        if self.state == FallbackState::Recovering {
            self.state = FallbackState::Degraded(self.mode);
        }
    }

    fn record(&self, err: &OverlayError) -> ErrorRecord {
        ErrorRecord {
            class: err.class(),
            message: err.to_string(),
            capabilities: self.capabilities,
            retry_count: self.retry_count,
            fallback: self.mode,
        }
    }
}
