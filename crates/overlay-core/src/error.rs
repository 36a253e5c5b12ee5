use thiserror::Error;

use crate::capability::CapabilitySnapshot;
use crate::fallback::FallbackMode;

/// Failure taxonomy for the overlay pipeline. Everything here is caught at
/// the supervisor boundary; nothing escapes to the host page.
#[derive(Clone, Debug, Error)]
pub enum OverlayError {
    #[error("required host capability unavailable: {0}")]
    CapabilityUnavailable(String),
    #[error("render surface lost")]
    RenderSurfaceLost,
    #[error("runtime render error: {0}")]
    RuntimeRender(String),
    #[error("resource exhaustion: {0}")]
    ResourceExhaustion(String),
    #[error("browser incompatible: {0}")]
    BrowserIncompatible(String),
}

impl OverlayError {
    /// Recoverable failures get bounded backoff retries; the rest settle
    /// straight into a degraded mode since retrying cannot restore a
    /// missing capability.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            OverlayError::RenderSurfaceLost
                | OverlayError::RuntimeRender(_)
                | OverlayError::ResourceExhaustion(_)
        )
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            OverlayError::CapabilityUnavailable(_) => ErrorClass::CapabilityUnavailable,
            OverlayError::RenderSurfaceLost => ErrorClass::RenderSurfaceLost,
            OverlayError::RuntimeRender(_) => ErrorClass::RuntimeRender,
            OverlayError::ResourceExhaustion(_) => ErrorClass::ResourceExhaustion,
            OverlayError::BrowserIncompatible(_) => ErrorClass::BrowserIncompatible,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    CapabilityUnavailable,
    RenderSurfaceLost,
    RuntimeRender,
    ResourceExhaustion,
    BrowserIncompatible,
}

/// Structured record produced on every supervisor transition and handed to
/// the external reporter.
#[derive(Clone, Debug)]
pub struct ErrorRecord {
    pub class: ErrorClass,
    pub message: String,
    pub capabilities: CapabilitySnapshot,
    pub retry_count: u32,
    pub fallback: FallbackMode,
}

/// Fire-and-forget error sink. Implementations must not panic back into
/// the supervisor; the engine tolerates the reporter being absent.
pub trait ErrorReporter {
    fn report(&mut self, record: &ErrorRecord);
}
