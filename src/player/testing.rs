//! Recording fakes for the two surfaces.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures_util::future;
use futures_util::FutureExt;

use super::error::PlayRejection;
use super::state::PlayIcon;
use super::surface::{DisplaySurface, MediaEvent, MediaEventSink, PlayOutcome, PlaybackSurface};

#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    SetSource(String),
    Load,
    Play(String),
    Pause,
    SetVolume(f64),
}

#[derive(Default)]
pub struct MediaLog {
    pub calls: Vec<MediaCall>,
    pub source: Option<String>,
    /// Scripted play outcomes, consumed in order; `Ok` once empty.
    pub outcomes: VecDeque<Result<(), PlayRejection>>,
    pub sink: Option<MediaEventSink>,
}

/// Cloneable so a test can keep a view of the calls after handing the
/// surface to a controller.
#[derive(Clone, Default)]
pub struct FakeMedia(pub Rc<RefCell<MediaLog>>);

impl FakeMedia {
    pub fn with_outcomes(outcomes: impl IntoIterator<Item = Result<(), PlayRejection>>) -> Self {
        let media = Self::default();
        media.0.borrow_mut().outcomes = outcomes.into_iter().collect();
        media
    }

    pub fn calls(&self) -> Vec<MediaCall> {
        self.0.borrow().calls.clone()
    }

    pub fn played_sources(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MediaCall::Play(src) => Some(src),
                _ => None,
            })
            .collect()
    }

    pub fn last_volume(&self) -> Option<f64> {
        self.calls().into_iter().rev().find_map(|call| match call {
            MediaCall::SetVolume(v) => Some(v),
            _ => None,
        })
    }

    /// Emits through whatever sink the controller subscribed.
    pub fn emit(&self, event: MediaEvent) {
        let sink = self.0.borrow().sink.clone();
        if let Some(sink) = sink {
            sink(event);
        }
    }

    pub fn clear_calls(&self) {
        self.0.borrow_mut().calls.clear();
    }
}

impl PlaybackSurface for FakeMedia {
    fn set_source(&mut self, url: &str) {
        let mut log = self.0.borrow_mut();
        log.source = Some(url.to_string());
        log.calls.push(MediaCall::SetSource(url.to_string()));
    }

    fn load(&mut self) {
        self.0.borrow_mut().calls.push(MediaCall::Load);
    }

    fn play(&mut self) -> PlayOutcome {
        let mut log = self.0.borrow_mut();
        let source = log.source.clone().unwrap_or_default();
        log.calls.push(MediaCall::Play(source));
        let outcome = log.outcomes.pop_front().unwrap_or(Ok(()));
        future::ready(outcome).boxed_local()
    }

    fn pause(&mut self) {
        self.0.borrow_mut().calls.push(MediaCall::Pause);
    }

    fn set_volume(&mut self, volume: f64) {
        self.0.borrow_mut().calls.push(MediaCall::SetVolume(volume));
    }

    fn subscribe(&mut self, sink: MediaEventSink) {
        self.0.borrow_mut().sink = Some(sink);
    }
}

#[derive(Debug, Default)]
pub struct DisplayLog {
    pub status: String,
    pub playing: bool,
    pub loading: bool,
    pub error: bool,
    pub icon: Option<PlayIcon>,
    /// Appended unconditionally, like a naive DOM append.
    pub message_nodes: Vec<String>,
    pub volume_readout: String,
    pub slider: u8,
}

#[derive(Clone, Default)]
pub struct FakeDisplay(pub Rc<RefCell<DisplayLog>>);

impl FakeDisplay {
    pub fn status(&self) -> String {
        self.0.borrow().status.clone()
    }

    pub fn icon(&self) -> Option<PlayIcon> {
        self.0.borrow().icon
    }

    pub fn message_count(&self) -> usize {
        self.0.borrow().message_nodes.len()
    }
}

impl DisplaySurface for FakeDisplay {
    fn set_status_text(&mut self, text: &str) {
        self.0.borrow_mut().status = text.to_string();
    }

    fn set_playing_class(&mut self, on: bool) {
        self.0.borrow_mut().playing = on;
    }

    fn set_loading_class(&mut self, on: bool) {
        self.0.borrow_mut().loading = on;
    }

    fn set_error_class(&mut self, on: bool) {
        self.0.borrow_mut().error = on;
    }

    fn show_error_message(&mut self, message: &str) {
        self.0.borrow_mut().message_nodes.push(message.to_string());
    }

    fn clear_error_message(&mut self) {
        self.0.borrow_mut().message_nodes.clear();
    }

    fn set_icon(&mut self, icon: PlayIcon) {
        self.0.borrow_mut().icon = Some(icon);
    }

    fn set_volume(&mut self, percent: u8) {
        let mut log = self.0.borrow_mut();
        log.slider = percent;
        log.volume_readout = format!("{percent}%");
    }
}

/// Resolves an already-settled future or panics.
pub fn settle<T>(future: impl std::future::Future<Output = T>) -> T {
    future.now_or_never().expect("future should be ready")
}
