//! Page components for the station player, plus the browser bindings the
//! player core runs against.

pub mod audio_manager;
mod icons;
mod radio_player;

pub use icons::*;
pub use radio_player::*;
