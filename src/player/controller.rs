use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{ConfigError, PlayerConfig};

use super::endpoints::EndpointList;
use super::error::{PlayRejection, PlaybackFailure};
use super::keyboard::{step_volume, KeyPress, Shortcut};
use super::state::PlaybackState;
#[cfg(test)]
use super::state::Phase;
use super::surface::{DisplaySurface, MediaEvent, PlayOutcome, PlaybackSurface};

/// A play request the controller wants issued after `delay`.
///
/// The attempt id doubles as a cancellation token: once the controller moves
/// on, [`PlayerController::begin_play`] and [`PlayerController::play_settled`]
/// ignore the ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct PlayTicket {
    attempt: u64,
    delay: Duration,
}

impl PlayTicket {
    #[cfg(test)]
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Scheduled(u64),
    InFlight(u64),
}

#[derive(Debug)]
pub enum KeyOutcome {
    Ignored,
    /// The caller should prevent the key's default action.
    Handled(Option<PlayTicket>),
}

/// Binds a media handle and a display to the playback state machine.
pub struct PlayerController<M, D> {
    config: PlayerConfig,
    endpoints: EndpointList,
    state: PlaybackState,
    volume: u8,
    media: M,
    display: D,
    last_attempt: u64,
    attempt: Option<Attempt>,
    message_shown: bool,
}

impl<M: PlaybackSurface, D: DisplaySurface> PlayerController<M, D> {
    pub fn new(config: PlayerConfig, media: M, display: D) -> Result<Self, ConfigError> {
        let endpoints =
            EndpointList::new(config.endpoints.clone()).ok_or(ConfigError::NoEndpoints)?;
        let mut controller = Self {
            volume: config.start_volume(),
            config,
            endpoints,
            state: PlaybackState::default(),
            media,
            display,
            last_attempt: 0,
            attempt: None,
            message_shown: false,
        };
        let primary = controller.endpoints.primary().to_string();
        controller.media.set_source(&primary);
        controller.set_volume(controller.volume);
        controller.render();
        info!(
            station = %controller.config.station_name,
            endpoints = controller.endpoints.len(),
            "player ready"
        );
        Ok(controller)
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Play/pause button. In Error this is a retry from the primary endpoint.
    pub fn toggle(&mut self) -> Option<PlayTicket> {
        if self.state.has_error {
            info!("retrying stream after error");
            return Some(self.connect_primary(self.config.load_settle()));
        }
        if self.state.is_playing {
            self.pause();
            return None;
        }
        if self.state.is_loading {
            debug!("connection attempt cancelled by user");
            self.cancel_attempt();
            self.media.pause();
            self.transition(self.state.paused());
            return None;
        }
        Some(self.connect_primary(self.config.load_settle()))
    }

    pub fn pause(&mut self) {
        self.cancel_attempt();
        self.media.pause();
        self.transition(self.state.paused());
    }

    /// Issues the play request for `ticket`, unless it has been superseded.
    pub fn begin_play(&mut self, ticket: &PlayTicket) -> Option<PlayOutcome> {
        match self.attempt {
            Some(Attempt::Scheduled(id)) if id == ticket.attempt => {
                self.attempt = Some(Attempt::InFlight(id));
                debug!(endpoint = %self.endpoints.current(), attempt = id, "requesting playback");
                Some(self.media.play())
            }
            _ => {
                debug!(attempt = ticket.attempt, "dropping superseded play ticket");
                None
            }
        }
    }

    /// Resolution of the play request started by `begin_play`.
    pub fn play_settled(
        &mut self,
        ticket: &PlayTicket,
        outcome: Result<(), PlayRejection>,
    ) -> Option<PlayTicket> {
        if self.attempt != Some(Attempt::InFlight(ticket.attempt)) {
            debug!(attempt = ticket.attempt, "ignoring outcome of superseded play request");
            return None;
        }
        self.attempt = None;
        match outcome {
            Ok(()) => {
                info!(
                    endpoint = %self.endpoints.current(),
                    index = self.endpoints.index(),
                    "stream playing"
                );
                self.transition(self.state.started());
                None
            }
            Err(rejection) => self.fail(rejection.into()),
        }
    }

    pub fn media_event(&mut self, event: MediaEvent) -> Option<PlayTicket> {
        match event {
            MediaEvent::LoadStart
            | MediaEvent::Progress
            | MediaEvent::CanPlayThrough
            | MediaEvent::Play
            | MediaEvent::Suspend => {
                debug!(?event, "media event");
            }
            MediaEvent::Stalled => {
                warn!(endpoint = %self.endpoints.current(), "stream stalled");
            }
            MediaEvent::Waiting => self.transition(self.state.buffering()),
            MediaEvent::CanPlay => self.transition(self.state.buffered()),
            MediaEvent::Playing => {
                if self.state.has_error {
                    return None;
                }
                if matches!(self.attempt, Some(Attempt::Scheduled(_))) {
                    self.attempt = None;
                }
                self.transition(self.state.started());
            }
            MediaEvent::Pause | MediaEvent::Ended => {
                if self.state.is_playing {
                    self.cancel_attempt();
                    self.transition(self.state.paused());
                }
            }
            MediaEvent::Error { code } => {
                // While a retry is scheduled the element still reports on the
                // source that was just abandoned.
                if matches!(self.attempt, Some(Attempt::Scheduled(_))) {
                    debug!(?code, "ignoring error from abandoned source");
                    return None;
                }
                return self.fail(PlaybackFailure::Media { code });
            }
        }
        None
    }

    /// Slider input, `0..=100`; larger values are clamped.
    pub fn set_volume(&mut self, percent: u8) {
        let percent = percent.min(100);
        self.volume = percent;
        self.media.set_volume(f64::from(percent) / 100.0);
        self.display.set_volume(percent);
    }

    pub fn key(&mut self, press: &KeyPress) -> KeyOutcome {
        let Some(shortcut) = press.shortcut() else {
            return KeyOutcome::Ignored;
        };
        match shortcut {
            Shortcut::TogglePlay => KeyOutcome::Handled(self.toggle()),
            Shortcut::VolumeUp | Shortcut::VolumeDown => {
                self.set_volume(step_volume(self.volume, shortcut));
                KeyOutcome::Handled(None)
            }
        }
    }

    pub fn online(&mut self) -> Option<PlayTicket> {
        if !self.state.has_error {
            return None;
        }
        if !self.config.retry_on_online {
            debug!("back online; automatic retry disabled");
            return None;
        }
        info!("back online, reloading primary stream");
        if self.config.autoplay_on_reconnect {
            return Some(self.connect_primary(self.config.load_settle()));
        }
        self.cancel_attempt();
        let primary = self.endpoints.reset().to_string();
        self.media.set_source(&primary);
        self.media.load();
        self.transition(self.state.cleared());
        None
    }

    pub fn offline(&mut self) {
        if self.state.is_playing {
            self.cancel_attempt();
            self.enter_error(PlaybackFailure::Offline);
        }
    }

    /// Observed only; a hidden tab keeps the stream running.
    pub fn visibility_changed(&mut self, hidden: bool) {
        debug!(hidden, playing = self.state.is_playing, "page visibility changed");
    }

    /// Closes the message node; the error state itself remains.
    pub fn dismiss_error_message(&mut self) {
        if self.message_shown {
            self.message_shown = false;
            self.display.clear_error_message();
        }
    }

    fn connect_primary(&mut self, delay: Duration) -> PlayTicket {
        let primary = self.endpoints.reset().to_string();
        self.media.set_source(&primary);
        self.media.load();
        self.transition(self.state.connecting());
        self.schedule(delay)
    }

    fn schedule(&mut self, delay: Duration) -> PlayTicket {
        self.last_attempt += 1;
        self.attempt = Some(Attempt::Scheduled(self.last_attempt));
        PlayTicket {
            attempt: self.last_attempt,
            delay,
        }
    }

    fn cancel_attempt(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            debug!(?attempt, "play attempt cancelled");
        }
    }

    /// Falls back to the next endpoint when playback was wanted, otherwise
    /// surfaces the error.
    fn fail(&mut self, failure: PlaybackFailure) -> Option<PlayTicket> {
        let wanted = self.state.is_loading || self.state.is_playing;
        if wanted && !matches!(failure, PlaybackFailure::Offline) {
            if let Some(next) = self.endpoints.advance() {
                let next = next.to_string();
                warn!(
                    %failure,
                    endpoint = %next,
                    remaining = self.endpoints.remaining(),
                    "stream failed, trying fallback endpoint"
                );
                self.media.set_source(&next);
                self.media.load();
                self.transition(self.state.connecting());
                return Some(self.schedule(self.config.fallback_delay()));
            }
        }
        self.enter_error(failure);
        None
    }

    fn enter_error(&mut self, failure: PlaybackFailure) {
        warn!(%failure, endpoint = %self.endpoints.current(), "stream connection failed");
        self.attempt = None;
        self.transition(self.state.failed());
    }

    fn transition(&mut self, next: PlaybackState) {
        let prev = self.state;
        self.state = next;
        if prev.phase() != next.phase() {
            debug!(from = ?prev.phase(), to = ?next.phase(), "playback phase changed");
        }
        match (prev.has_error, next.has_error) {
            (false, true) if !self.message_shown => {
                self.message_shown = true;
                self.display.show_error_message(&self.config.error_hint);
            }
            (true, false) => self.dismiss_error_message(),
            _ => {}
        }
        self.render();
    }

    fn render(&mut self) {
        let state = self.state;
        self.display.set_status_text(state.phase().status_text());
        self.display.set_loading_class(state.is_loading && !state.has_error);
        self.display.set_playing_class(state.is_playing && !state.has_error);
        self.display.set_error_class(state.has_error);
        self.display.set_icon(state.icon());
    }
}

#[cfg(test)]
impl<M, D> PlayerController<M, D> {
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn endpoint(&self) -> &str {
        self.endpoints.current()
    }
}
