use thiserror::Error;

/// Why the media handle refused a play request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayRejection {
    /// Autoplay policy or missing user gesture.
    #[error("playback not allowed: {0}")]
    NotAllowed(String),
    #[error("no supported source: {0}")]
    NotSupported(String),
    /// Interrupted by a new load or pause.
    #[error("play request aborted: {0}")]
    Aborted(String),
    #[error("play request failed: {0}")]
    Other(String),
    /// No media element exists on this platform.
    #[error("audio output unavailable")]
    Unavailable,
}

impl PlayRejection {
    /// Classifies a `DOMException` by its `name`.
    pub fn from_dom_exception(name: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match name {
            "NotAllowedError" => PlayRejection::NotAllowed(message),
            "NotSupportedError" => PlayRejection::NotSupported(message),
            "AbortError" => PlayRejection::Aborted(message),
            _ => PlayRejection::Other(message),
        }
    }
}

/// Every failure collapses into the single connection-error state; the
/// variant only feeds the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackFailure {
    #[error("media element error (code {code:?})")]
    Media { code: Option<u16> },
    #[error(transparent)]
    Rejected(#[from] PlayRejection),
    #[error("network went offline")]
    Offline,
}
