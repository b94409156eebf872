use wasm_bindgen::{closure::Closure, JsCast};
use tracing::warn;
use web_sys::{window, EventTarget, KeyboardEvent};

use super::web_audio::WebAudio;
use crate::player::{DisplaySurface, KeyPress, PlayerHandle};

fn is_editable_shortcut_target(event: &KeyboardEvent) -> bool {
    let Some(target) = event.target() else {
        return false;
    };

    let mut current = target.dyn_into::<web_sys::Element>().ok();
    while let Some(element) = current {
        let tag = element.tag_name().to_ascii_lowercase();
        if tag == "input" || tag == "textarea" || tag == "select" {
            return true;
        }
        if element.has_attribute("contenteditable")
            && element
                .get_attribute("contenteditable")
                .map(|v| v.to_ascii_lowercase() != "false")
                .unwrap_or(true)
        {
            return true;
        }
        current = element.parent_element();
    }

    false
}

fn key_press(event: &KeyboardEvent) -> KeyPress {
    KeyPress {
        key: event.key(),
        code: event.code(),
        modified: event.ctrl_key() || event.meta_key() || event.alt_key(),
        in_editable: event.default_prevented()
            || event.is_composing()
            || is_editable_shortcut_target(event),
        repeat: event.repeat(),
    }
}

fn listen<T: ?Sized>(target: &EventTarget, name: &str, listener: &Closure<T>) {
    if let Err(err) = target.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
    {
        warn!("[page] could not listen for {name}: {err:?}");
    }
}

pub fn page_protocol() -> Option<String> {
    window()?.location().protocol().ok()
}

/// Keyboard shortcuts, tab visibility and connectivity. Attached once for the
/// page's lifetime.
pub fn install_page_listeners<D: DisplaySurface + 'static>(player: &PlayerHandle<WebAudio, D>) {
    let Some(win) = window() else {
        return;
    };
    let Some(doc) = win.document() else {
        return;
    };

    let key_cb = {
        let player = player.clone();
        Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if player.key(&key_press(&event)) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    let visibility_cb = {
        let player = player.clone();
        let doc = doc.clone();
        Closure::wrap(Box::new(move || player.visibility_changed(doc.hidden())) as Box<dyn FnMut()>)
    };
    let online_cb = {
        let player = player.clone();
        Closure::wrap(Box::new(move || player.online()) as Box<dyn FnMut()>)
    };
    let offline_cb = {
        let player = player.clone();
        Closure::wrap(Box::new(move || player.offline()) as Box<dyn FnMut()>)
    };

    listen(&doc, "keydown", &key_cb);
    listen(&doc, "visibilitychange", &visibility_cb);
    listen(&win, "online", &online_cb);
    listen(&win, "offline", &offline_cb);
    key_cb.forget();
    visibility_cb.forget();
    online_cb.forget();
    offline_cb.forget();
}
