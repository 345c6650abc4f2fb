//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and instead renders into a simple framebuffer
//! that is diffed and flushed to the terminal.
//!
//! - `core` stays free of I/O and can be tested headless
//! - board cells can be wider than one column (2 chars wide by default)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use bagtris_core as core;
pub use bagtris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
