use futures_util::future::{self, FutureExt};
use tracing::debug;

use crate::player::{
    DisplaySurface, MediaEventSink, PlayOutcome, PlayRejection, PlaybackSurface, PlayerHandle,
};

/// Stand-in media handle for targets without an `<audio>` element. Every play
/// request is refused, which lands the player in its error state.
#[derive(Default)]
pub struct DetachedAudio {
    source: Option<String>,
}

impl PlaybackSurface for DetachedAudio {
    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
    }

    fn load(&mut self) {
        debug!(source = ?self.source, "load requested without an audio element");
    }

    fn play(&mut self) -> PlayOutcome {
        future::ready(Err(PlayRejection::Unavailable)).boxed_local()
    }

    fn pause(&mut self) {}

    fn set_volume(&mut self, _volume: f64) {}

    // Nothing ever fires, so the sink is not kept.
    fn subscribe(&mut self, _sink: MediaEventSink) {}
}

pub fn install_page_listeners<D: DisplaySurface + 'static>(
    _player: &PlayerHandle<DetachedAudio, D>,
) {
}

pub fn page_protocol() -> Option<String> {
    None
}
