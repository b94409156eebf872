//! Capability seams between the controller and the page.

use std::rc::Rc;

use futures_util::future::LocalBoxFuture;

use crate::config::PlayerConfig;

use super::error::PlayRejection;
use super::state::{PlayIcon, PlaybackState};

/// Lifecycle events reported by the media handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    LoadStart,
    Progress,
    CanPlay,
    CanPlayThrough,
    Waiting,
    Playing,
    Play,
    Pause,
    Ended,
    Error { code: Option<u16> },
    Stalled,
    Suspend,
}

impl MediaEvent {
    /// DOM event names, in the order listeners are attached.
    pub const DOM_NAMES: [&'static str; 12] = [
        "loadstart",
        "progress",
        "canplay",
        "canplaythrough",
        "waiting",
        "playing",
        "play",
        "pause",
        "ended",
        "error",
        "stalled",
        "suspend",
    ];

    /// Maps a DOM event name. `error` carries no code here; the web surface
    /// fills it in from the element.
    pub fn from_dom_name(name: &str) -> Option<Self> {
        Some(match name {
            "loadstart" => MediaEvent::LoadStart,
            "progress" => MediaEvent::Progress,
            "canplay" => MediaEvent::CanPlay,
            "canplaythrough" => MediaEvent::CanPlayThrough,
            "waiting" => MediaEvent::Waiting,
            "playing" => MediaEvent::Playing,
            "play" => MediaEvent::Play,
            "pause" => MediaEvent::Pause,
            "ended" => MediaEvent::Ended,
            "error" => MediaEvent::Error { code: None },
            "stalled" => MediaEvent::Stalled,
            "suspend" => MediaEvent::Suspend,
            _ => return None,
        })
    }
}

pub type PlayOutcome = LocalBoxFuture<'static, Result<(), PlayRejection>>;
pub type MediaEventSink = Rc<dyn Fn(MediaEvent)>;

/// The media handle: source, transport, volume and event subscription.
pub trait PlaybackSurface {
    fn set_source(&mut self, url: &str);
    fn load(&mut self);
    /// Resolves once playback actually starts or the request is refused.
    fn play(&mut self) -> PlayOutcome;
    fn pause(&mut self);
    /// `volume` is normalized to `0.0..=1.0`.
    fn set_volume(&mut self, volume: f64);
    fn subscribe(&mut self, sink: MediaEventSink);
}

/// The visible player card.
pub trait DisplaySurface {
    fn set_status_text(&mut self, text: &str);
    /// Status dot and card `playing` class.
    fn set_playing_class(&mut self, on: bool);
    fn set_loading_class(&mut self, on: bool);
    fn set_error_class(&mut self, on: bool);
    fn show_error_message(&mut self, message: &str);
    fn clear_error_message(&mut self);
    fn set_icon(&mut self, icon: PlayIcon);
    /// Slider position and the `"{percent}%"` readout.
    fn set_volume(&mut self, percent: u8);
}

/// What the controller renders on construction. A display seeded with these
/// values sees no changes until the first user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleDisplay {
    pub status_text: &'static str,
    pub icon: PlayIcon,
    pub volume: u8,
}

impl IdleDisplay {
    pub fn for_config(config: &PlayerConfig) -> Self {
        let state = PlaybackState::default();
        Self {
            status_text: state.phase().status_text(),
            icon: state.icon(),
            volume: config.start_volume(),
        }
    }
}
