#[cfg(any(target_arch = "wasm32", test))]
use std::fmt;

use tracing::warn;

use crate::utils::is_mixed_content;

/// What a `MediaError.code` means.
#[cfg(any(target_arch = "wasm32", test))]
pub fn media_error_label(code: Option<u16>) -> &'static str {
    match code {
        Some(1) => "playback aborted before the stream loaded",
        Some(2) => "network error while loading the stream",
        Some(3) => "stream could not be decoded",
        Some(4) => "no supported source for the stream",
        _ => "unknown media error",
    }
}

/// Point-in-time view of the audio element, logged on failures.
#[cfg(any(target_arch = "wasm32", test))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaSnapshot {
    pub src: String,
    pub network_state: u16,
    pub ready_state: u16,
    pub paused: bool,
    pub error_code: Option<u16>,
    pub error_message: Option<String>,
}

#[cfg(any(target_arch = "wasm32", test))]
impl fmt::Display for MediaSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "src={} network_state={} ready_state={} paused={}",
            self.src, self.network_state, self.ready_state, self.paused
        )?;
        if self.error_code.is_some() {
            write!(f, " error=\"{}\"", media_error_label(self.error_code))?;
        }
        if let Some(message) = self.error_message.as_deref().filter(|m| !m.is_empty()) {
            write!(f, " message=\"{message}\"")?;
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub fn log_media_failure(snapshot: &MediaSnapshot) {
    warn!("[media] element reported an error | {snapshot}");
}

/// Warns once per endpoint that an HTTPS page may not load.
pub fn warn_mixed_content<'a>(page_protocol: &str, endpoints: impl IntoIterator<Item = &'a str>) {
    for url in endpoints {
        if is_mixed_content(page_protocol, url) {
            warn!("[media] HTTPS page loading HTTP stream {url}; the browser may block it");
        }
    }
}
