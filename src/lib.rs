//! Ecou FM web player.
//!
//! The player core in [`player`] is DOM-free and runs on the host for tests;
//! [`components`] holds the Dioxus card and the browser bindings the core
//! runs against in the page. The executable in `src/main.rs` only launches it.

pub mod components;
pub mod config;
pub mod diagnostics;
pub mod player;
pub mod utils;
