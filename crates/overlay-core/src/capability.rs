use thiserror::Error;

use crate::fallback::FallbackMode;

#[derive(Clone, Debug, Error)]
#[error("capability check failed: {0}")]
pub struct ProbeError(pub String);

/// Host-side capability checks. Each check may fail (a host API probe can
/// itself throw); `CapabilitySnapshot::probe` maps any error to `false`.
pub trait HostProbe {
    /// Is there a surface to composite onto at all?
    fn render_surface(&self) -> Result<bool, ProbeError>;
    /// Per-frame callback scheduling (requestAnimationFrame or equivalent).
    fn animation_frame(&self) -> Result<bool, ProbeError>;
    /// Visibility observation for pausing offscreen work.
    fn intersection_observer(&self) -> Result<bool, ProbeError>;
    /// Gradient fills in the presentation layer.
    fn css_gradients(&self) -> Result<bool, ProbeError>;
    /// Declarative animation in the presentation layer.
    fn css_animation(&self) -> Result<bool, ProbeError>;
    /// False for software-emulated renderers (SwiftShader, llvmpipe, ...).
    fn hardware_accelerated(&self) -> Result<bool, ProbeError>;
    /// Minimum browser/engine version check.
    fn browser_supported(&self) -> Result<bool, ProbeError>;
}

/// Capability flags computed once at initialization and immutable for the
/// page lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CapabilitySnapshot {
    pub render_surface: bool,
    pub animation_frame: bool,
    pub intersection_observer: bool,
    pub css_gradients: bool,
    pub css_animation: bool,
    pub hardware_accelerated: bool,
    pub browser_supported: bool,
}

impl CapabilitySnapshot {
    /// Probe every capability. Never panics; a check that errors counts as
    /// unsupported.
    pub fn probe(host: &dyn HostProbe) -> Self {
        fn check(name: &str, result: Result<bool, ProbeError>) -> bool {
            result.unwrap_or_else(|e| {
                log::warn!("capability check '{name}' errored, treating as unsupported: {e}");
                false
            })
        }
        Self {
            render_surface: check("render_surface", host.render_surface()),
            animation_frame: check("animation_frame", host.animation_frame()),
            intersection_observer: check("intersection_observer", host.intersection_observer()),
            css_gradients: check("css_gradients", host.css_gradients()),
            css_animation: check("css_animation", host.css_animation()),
            hardware_accelerated: check("hardware_accelerated", host.hardware_accelerated()),
            browser_supported: check("browser_supported", host.browser_supported()),
        }
    }

    /// Fixed decision table for the degraded mode to start in when the full
    /// pipeline is not even attempted.
    pub fn recommended_fallback_mode(&self) -> FallbackMode {
        if !self.render_surface || !self.animation_frame {
            return FallbackMode::None;
        }
        match (self.css_gradients, self.css_animation) {
            (true, true) => FallbackMode::AnimatedGradientCss,
            (true, false) => FallbackMode::StaticGradient,
            (false, _) => FallbackMode::MinimalParticles,
        }
    }

    /// Whether the full animated pipeline is worth attempting.
    pub fn full_pipeline_supported(&self) -> bool {
        self.render_surface
            && self.animation_frame
            && self.hardware_accelerated
            && self.browser_supported
    }
}

/// Convenience probe whose answers are fixed up front; used by drivers and
/// tests that do not sit inside a browser.
#[derive(Clone, Copy, Debug)]
pub struct FixedProbe(pub CapabilitySnapshot);

impl FixedProbe {
    pub fn all_supported() -> Self {
        Self(CapabilitySnapshot {
            render_surface: true,
            animation_frame: true,
            intersection_observer: true,
            css_gradients: true,
            css_animation: true,
            hardware_accelerated: true,
            browser_supported: true,
        })
    }
}

impl HostProbe for FixedProbe {
    fn render_surface(&self) -> Result<bool, ProbeError> {
        Ok(self.0.render_surface)
    }
    fn animation_frame(&self) -> Result<bool, ProbeError> {
        Ok(self.0.animation_frame)
    }
    fn intersection_observer(&self) -> Result<bool, ProbeError> {
        Ok(self.0.intersection_observer)
    }
    fn css_gradients(&self) -> Result<bool, ProbeError> {
        Ok(self.0.css_gradients)
    }
    fn css_animation(&self) -> Result<bool, ProbeError> {
        Ok(self.0.css_animation)
    }
    fn hardware_accelerated(&self) -> Result<bool, ProbeError> {
        Ok(self.0.hardware_accelerated)
    }
    fn browser_supported(&self) -> Result<bool, ProbeError> {
        Ok(self.0.browser_supported)
    }
}
