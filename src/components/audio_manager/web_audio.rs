use futures_util::future::{self, FutureExt};
use tracing::warn;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, DomException, HtmlAudioElement};

use crate::diagnostics::{log_media_failure, MediaSnapshot};
use crate::player::{MediaEvent, MediaEventSink, PlayOutcome, PlayRejection, PlaybackSurface};

pub const AUDIO_ELEMENT_ID: &str = "ecou-fm-audio";

/// Returns the page's stream audio element, creating it on first use.
pub fn get_or_create_audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(AUDIO_ELEMENT_ID);
    audio.set_cross_origin(Some("anonymous"));
    // Nothing is fetched until the listener presses play.
    audio.set_preload("none");
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

/// `HtmlAudioElement` as the player's media handle.
pub struct WebAudio {
    audio: HtmlAudioElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
}

impl WebAudio {
    pub fn new(audio: HtmlAudioElement) -> Self {
        Self {
            audio,
            listeners: Vec::new(),
        }
    }

    fn detach_listeners(&mut self) {
        for (name, listener) in self.listeners.drain(..) {
            let _ = self
                .audio
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
    }
}

impl Drop for WebAudio {
    fn drop(&mut self) {
        self.detach_listeners();
    }
}

pub(super) fn media_snapshot(audio: &HtmlAudioElement) -> MediaSnapshot {
    let error = audio.error();
    MediaSnapshot {
        src: audio.current_src(),
        network_state: audio.network_state(),
        ready_state: audio.ready_state(),
        paused: audio.paused(),
        error_code: error.as_ref().map(|e| e.code()),
        error_message: error.map(|e| e.message()),
    }
}

fn rejection_from_js(err: JsValue) -> PlayRejection {
    if let Some(exception) = err.dyn_ref::<DomException>() {
        return PlayRejection::from_dom_exception(&exception.name(), exception.message());
    }
    match err.dyn_ref::<js_sys::Error>() {
        Some(error) => PlayRejection::Other(String::from(error.message())),
        None => PlayRejection::Other(format!("{err:?}")),
    }
}

impl PlaybackSurface for WebAudio {
    fn set_source(&mut self, url: &str) {
        if self.audio.src() != url {
            self.audio.set_src(url);
        }
    }

    fn load(&mut self) {
        self.audio.load();
    }

    fn play(&mut self) -> PlayOutcome {
        match self.audio.play() {
            Ok(promise) => async move {
                JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(rejection_from_js)
            }
            .boxed_local(),
            Err(err) => future::ready(Err(rejection_from_js(err))).boxed_local(),
        }
    }

    fn pause(&mut self) {
        if let Err(err) = self.audio.pause() {
            warn!("[media] pause failed: {err:?}");
        }
    }

    fn set_volume(&mut self, volume: f64) {
        self.audio.set_volume(volume.clamp(0.0, 1.0));
    }

    fn subscribe(&mut self, sink: MediaEventSink) {
        self.detach_listeners();
        for name in MediaEvent::DOM_NAMES {
            let Some(event) = MediaEvent::from_dom_name(name) else {
                continue;
            };
            let sink = sink.clone();
            let audio = self.audio.clone();
            let listener = Closure::wrap(Box::new(move || {
                let event = match event {
                    MediaEvent::Error { .. } => {
                        let snapshot = media_snapshot(&audio);
                        log_media_failure(&snapshot);
                        MediaEvent::Error {
                            code: snapshot.error_code,
                        }
                    }
                    other => other,
                };
                sink(event);
            }) as Box<dyn FnMut()>);
            if let Err(err) = self
                .audio
                .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
            {
                warn!("[media] could not listen for {name}: {err:?}");
                continue;
            }
            self.listeners.push((name, listener));
        }
    }
}
