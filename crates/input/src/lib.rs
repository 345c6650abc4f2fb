//! Terminal input.
//!
//! Maps `crossterm` key and mouse events into [`crate::types::Command`]s and
//! provides a DAS/ARR handler suitable for terminal environments (including
//! terminals without key-release events).

pub mod handler;
pub mod map;

pub use bagtris_types as types;

pub use handler::InputHandler;
pub use map::{map_key, map_mouse};
