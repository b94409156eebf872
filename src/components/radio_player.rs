use crate::components::audio_manager::{
    install_page_listeners, page_protocol, platform_audio, task_runtime, PlatformAudio,
};
use crate::components::Icon;
use crate::config::{load_config, PlayerConfig};
use crate::diagnostics::warn_mixed_content;
use crate::player::{DisplaySurface, IdleDisplay, PlayIcon, PlayerController, PlayerHandle};
use crate::utils::{format_percent, parse_slider_value};
use dioxus::prelude::*;
use tracing::error;

pub type StreamPlayer = PlayerHandle<PlatformAudio, PlayerView>;

/// Display state of the player card. The controller writes it through
/// [`DisplaySurface`]; the components below only read it.
#[derive(Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub status_text: Signal<String>,
    pub playing: Signal<bool>,
    pub loading: Signal<bool>,
    pub error: Signal<bool>,
    pub error_message: Signal<Option<String>>,
    pub icon: Signal<PlayIcon>,
    pub volume: Signal<u8>,
}

impl PlayerView {
    fn card_class(&self) -> String {
        let mut class = String::from("player-card");
        if (self.loading)() {
            class.push_str(" loading");
        }
        if (self.playing)() {
            class.push_str(" playing");
        }
        if (self.error)() {
            class.push_str(" error");
        }
        class
    }
}

fn set_if_changed<T: PartialEq + 'static>(signal: &mut Signal<T>, value: T) {
    if *signal.peek() != value {
        signal.set(value);
    }
}

impl DisplaySurface for PlayerView {
    fn set_status_text(&mut self, text: &str) {
        if *self.status_text.peek() != text {
            self.status_text.set(text.to_string());
        }
    }

    fn set_playing_class(&mut self, on: bool) {
        set_if_changed(&mut self.playing, on);
    }

    fn set_loading_class(&mut self, on: bool) {
        set_if_changed(&mut self.loading, on);
    }

    fn set_error_class(&mut self, on: bool) {
        set_if_changed(&mut self.error, on);
    }

    fn show_error_message(&mut self, message: &str) {
        // One message node at most.
        if self.error_message.peek().is_none() {
            self.error_message.set(Some(message.to_string()));
        }
    }

    fn clear_error_message(&mut self) {
        set_if_changed(&mut self.error_message, None);
    }

    fn set_icon(&mut self, icon: PlayIcon) {
        set_if_changed(&mut self.icon, icon);
    }

    fn set_volume(&mut self, percent: u8) {
        set_if_changed(&mut self.volume, percent);
    }
}

fn build_player(config: &PlayerConfig, view: PlayerView) -> Option<StreamPlayer> {
    let Some(audio) = platform_audio() else {
        error!("no audio element available; player disabled");
        return None;
    };
    match PlayerController::new(config.clone(), audio, view) {
        Ok(controller) => Some(PlayerHandle::new(controller, task_runtime())),
        Err(err) => {
            error!("player disabled: {err}");
            None
        }
    }
}

/// The station card: status, play/pause, volume, error note.
#[component]
pub fn RadioPlayer() -> Element {
    let config = use_hook(load_config);
    // Seeded with the controller's first render; building it writes nothing.
    let idle = IdleDisplay::for_config(&config);
    let view = PlayerView {
        status_text: use_signal(|| idle.status_text.to_string()),
        playing: use_signal(|| false),
        loading: use_signal(|| false),
        error: use_signal(|| false),
        error_message: use_signal(|| None),
        icon: use_signal(|| idle.icon),
        volume: use_signal(|| idle.volume),
    };
    let player = use_hook({
        let config = config.clone();
        move || build_player(&config, view)
    });

    {
        let player = player.clone();
        let endpoints = config.endpoints.clone();
        use_effect(move || {
            if let Some(protocol) = page_protocol() {
                warn_mixed_content(&protocol, endpoints.iter().map(String::as_str));
            }
            if let Some(player) = player.as_ref() {
                install_page_listeners(player);
            }
        });
    }

    let status = (view.status_text)();
    let dot_class = if (view.playing)() {
        "status-indicator playing"
    } else {
        "status-indicator"
    };
    let error_message = (view.error_message)();
    let card_class = view.card_class();
    let station_name = config.station_name.clone();

    rsx! {
        div { class: "{card_class}",
            div { class: "player-header",
                Icon { name: "radio".to_string(), class: "station-icon".to_string() }
                h1 { class: "station-name", "{station_name}" }
            }
            div { class: "status",
                span { id: "statusIndicator", class: "{dot_class}" }
                span { id: "statusText", class: "status-text", "{status}" }
            }
            PlayPauseButton { player: player.clone(), icon: (view.icon)() }
            VolumeControl { player: player.clone(), volume: (view.volume)() }
            if let Some(message) = error_message {
                div { class: "error-message", role: "alert",
                    span { "{message}" }
                    button {
                        r#type: "button",
                        class: "error-dismiss",
                        aria_label: "Închide",
                        onclick: {
                            let player = player.clone();
                            move |_| {
                                if let Some(player) = player.as_ref() {
                                    player.dismiss_error_message();
                                }
                            }
                        },
                        Icon { name: "x".to_string(), class: "icon-sm".to_string() }
                    }
                }
            }
        }
    }
}

#[component]
fn PlayPauseButton(player: Option<StreamPlayer>, icon: PlayIcon) -> Element {
    let disabled = player.is_none();

    rsx! {
        button {
            id: "playPauseBtn",
            r#type: "button",
            class: "play-pause-btn",
            disabled: disabled,
            aria_label: icon.label(),
            onclick: move |_| {
                if let Some(player) = player.as_ref() {
                    player.toggle();
                }
            },
            Icon { name: icon.icon_name().to_string(), class: "icon-lg".to_string() }
        }
    }
}

#[component]
fn VolumeControl(player: Option<StreamPlayer>, volume: u8) -> Element {
    let disabled = player.is_none();
    let readout = format_percent(volume);

    let on_volume_input = move |e: Event<FormData>| {
        if let (Some(player), Some(percent)) = (player.as_ref(), parse_slider_value(&e.value())) {
            player.set_volume(percent);
        }
    };

    rsx! {
        div { class: "volume-control",
            Icon {
                name: if volume == 0 { "volume-off".to_string() } else { "volume".to_string() },
                class: "icon-sm".to_string(),
            }
            input {
                id: "volumeSlider",
                r#type: "range",
                min: "0",
                max: "100",
                step: "1",
                value: "{volume}",
                disabled: disabled,
                oninput: on_volume_input,
            }
            span { id: "volumeValue", class: "volume-value", "{readout}" }
        }
    }
}
