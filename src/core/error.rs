use thiserror::Error;

/// Failure taxonomy for one capture invocation. `UserCancelled` is a
/// normal alternate outcome rather than a fault; callers are expected to
/// treat it silently.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture aborted by the user")]
    UserCancelled,

    #[error("a capture is already active on this surface")]
    SessionActive,

    #[error("proxy call failed: {0}")]
    Proxy(String),

    #[error("document serialization failed: {0}")]
    Serialization(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("output dispatch failed: {0}")]
    Dispatch(String),
}

impl CaptureError {
    /// Cancellation is user intent, not failure.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, CaptureError::UserCancelled)
    }
}
