/// Which icon the play/pause button shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

/// Coarse phase derived from a [`PlaybackState`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Playing,
    Buffering,
    Paused,
    Error,
}

impl Phase {
    pub fn status_text(self) -> &'static str {
        match self {
            Phase::Idle => "Pregătit",
            Phase::Loading => "Se conectează...",
            Phase::Buffering => "Se încarcă...",
            Phase::Playing => "Live",
            Phase::Paused => "Pauză",
            Phase::Error => "Eroare de conexiune",
        }
    }
}

/// Immutable playback snapshot. Every transition returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_loading: bool,
    pub has_error: bool,
    /// Set once playback has started at least once; separates Paused from Idle.
    pub has_started: bool,
}

impl PlaybackState {
    pub fn phase(&self) -> Phase {
        if self.has_error {
            Phase::Error
        } else if self.is_playing && self.is_loading {
            Phase::Buffering
        } else if self.is_playing {
            Phase::Playing
        } else if self.is_loading {
            Phase::Loading
        } else if self.has_started {
            Phase::Paused
        } else {
            Phase::Idle
        }
    }

    pub fn icon(&self) -> PlayIcon {
        if self.is_playing && !self.has_error {
            PlayIcon::Pause
        } else {
            PlayIcon::Play
        }
    }

    /// A connection attempt is underway. Clears any error.
    pub fn connecting(self) -> Self {
        Self {
            is_playing: false,
            is_loading: true,
            has_error: false,
            ..self
        }
    }

    pub fn started(self) -> Self {
        Self {
            is_playing: true,
            is_loading: false,
            has_error: false,
            has_started: true,
        }
    }

    pub fn paused(self) -> Self {
        Self {
            is_playing: false,
            is_loading: false,
            ..self
        }
    }

    pub fn failed(self) -> Self {
        Self {
            is_playing: false,
            is_loading: false,
            has_error: true,
            ..self
        }
    }

    /// Error dismissed without starting a new attempt.
    pub fn cleared(self) -> Self {
        Self {
            has_error: false,
            ..self
        }
    }

    /// `waiting` from the media handle while playing. Leaves an error untouched.
    pub fn buffering(self) -> Self {
        if self.has_error || !self.is_playing {
            return self;
        }
        Self {
            is_loading: true,
            ..self
        }
    }

    /// `canplay` from the media handle: buffering finished while playing.
    pub fn buffered(self) -> Self {
        if self.has_error || !self.is_playing {
            return self;
        }
        Self {
            is_loading: false,
            ..self
        }
    }
}
