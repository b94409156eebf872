//! Stream player core: playback state, endpoint fallback, and the controller
//! that ties them to a media handle and a display. Nothing in here touches
//! the DOM; the web bindings live in `components::audio_manager`.

mod controller;
mod endpoints;
mod error;
mod handle;
mod keyboard;
mod state;
mod surface;

#[cfg(test)]
mod testing;

pub use controller::PlayerController;
pub use error::PlayRejection;
pub use handle::{PlayerHandle, TaskRuntime};
pub use keyboard::KeyPress;
pub use state::PlayIcon;
pub use surface::{
    DisplaySurface, IdleDisplay, MediaEvent, MediaEventSink, PlayOutcome, PlaybackSurface,
};
