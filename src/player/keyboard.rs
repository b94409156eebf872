/// Volume change per arrow key press.
pub const VOLUME_STEP: u8 = 5;

/// Keyboard shortcuts the player understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePlay,
    VolumeUp,
    VolumeDown,
}

/// The parts of a `keydown` event the shortcut mapping looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub code: String,
    pub modified: bool,
    pub in_editable: bool,
    /// Auto-repeat from a held key.
    pub repeat: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn shortcut(&self) -> Option<Shortcut> {
        if self.in_editable || self.modified {
            return None;
        }
        if self.code == "Space" || self.key == " " || self.key == "Spacebar" {
            // A held space bar would otherwise start and cancel in turn.
            return (!self.repeat).then_some(Shortcut::TogglePlay);
        }
        if self.code == "ArrowUp" || self.key == "ArrowUp" {
            return Some(Shortcut::VolumeUp);
        }
        if self.code == "ArrowDown" || self.key == "ArrowDown" {
            return Some(Shortcut::VolumeDown);
        }
        None
    }
}

pub fn step_volume(current: u8, shortcut: Shortcut) -> u8 {
    match shortcut {
        Shortcut::VolumeUp => current.saturating_add(VOLUME_STEP).min(100),
        Shortcut::VolumeDown => current.saturating_sub(VOLUME_STEP),
        Shortcut::TogglePlay => current,
    }
}
