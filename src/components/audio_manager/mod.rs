//! Audio Manager - binds the page's audio element and browser events to the
//! player core. Browser-only pieces are gated on `wasm32`; other targets get a
//! detached surface so the UI still renders.

use std::time::Duration;

use futures_util::FutureExt;

use crate::player::TaskRuntime;

#[cfg(not(target_arch = "wasm32"))]
mod detached;
#[cfg(target_arch = "wasm32")]
mod page_listeners;
#[cfg(target_arch = "wasm32")]
mod web_audio;

#[cfg(not(target_arch = "wasm32"))]
pub use detached::{install_page_listeners, page_protocol, DetachedAudio as PlatformAudio};
#[cfg(target_arch = "wasm32")]
pub use page_listeners::{install_page_listeners, page_protocol};
#[cfg(target_arch = "wasm32")]
pub use web_audio::{get_or_create_audio_element, WebAudio as PlatformAudio, AUDIO_ELEMENT_ID};

/// The media handle for this target, or `None` if the page has none.
#[cfg(target_arch = "wasm32")]
pub fn platform_audio() -> Option<PlatformAudio> {
    get_or_create_audio_element().map(PlatformAudio::new)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn platform_audio() -> Option<PlatformAudio> {
    Some(PlatformAudio::default())
}

/// Delayed play attempts run on the browser's microtask queue. Listener
/// callbacks fire outside the Dioxus runtime, so `spawn` is not usable here.
#[cfg(target_arch = "wasm32")]
pub fn task_runtime() -> TaskRuntime {
    TaskRuntime::new(
        |task| wasm_bindgen_futures::spawn_local(task),
        |delay: Duration| gloo_timers::future::sleep(delay).boxed_local(),
    )
}

#[cfg(not(target_arch = "wasm32"))]
pub fn task_runtime() -> TaskRuntime {
    TaskRuntime::new(
        |task| {
            dioxus::prelude::spawn(task);
        },
        |delay: Duration| tokio::time::sleep(delay).boxed_local(),
    )
}
