//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules, the session state and the screen flow around
//! it. It performs no terminal I/O; the input and term crates sit on either
//! side of it.
//!
//! - **Deterministic**: same seed, same commands, same frame times, same game
//! - **Testable**: boards can be built from text and every rule is a plain call
//! - **Portable**: runs in a terminal, headless, or inside a benchmark
//!
//! # Module Structure
//!
//! - [`shape`]: Tetromino layouts and SRS wall kick tables
//! - [`board`]: 22x10 grid with collision, rotation, T-spin checks and row clears
//! - [`pool`]: 7-bag piece sequence with a 7 to 13 piece preview
//! - [`scoring`]: Clear categories, points, combo and back-to-back
//! - [`game_state`]: One session: commands, gravity, lock delay, hold
//! - [`program`]: Menu and game screens, high score
//! - [`ui`]: Immediate-mode widget declarations
//! - [`config`]: Session tunables and their validation
//! - [`snapshot`]: Render state handed to the presentation layer
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use bagtris_core::GameState;
//! use bagtris_types::Command;
//!
//! let mut game = GameState::with_seed(1, 12345);
//!
//! game.update(Duration::from_millis(16), &[Command::MoveRight, Command::HardDrop]);
//! assert!(game.is_grounded());
//!
//! // The landed piece locks once the lock delay has run out.
//! game.update(Duration::from_millis(600), &[]);
//! assert_eq!(game.board().cells().iter().filter(|b| b.active).count(), 4);
//! ```
//!
//! # Timing
//!
//! - **Gravity**: `1.0 - 0.1 * level` seconds per row, never below zero
//! - **Soft Drop**: 50ms per row when that is faster than gravity
//! - **Lock Delay**: 500ms without a successful down move, move or rotation
//!
//! Call [`GameState::update`](game_state::GameState::update) every frame with
//! the elapsed time.

pub mod board;
pub mod config;
pub mod game_state;
pub mod pool;
pub mod program;
pub mod scoring;
pub mod shape;
pub mod snapshot;
pub mod ui;

pub use bagtris_types as types;

// Re-export commonly used types for convenience
pub use board::{Block, Board, RotationResult, TSpin};
pub use config::{ConfigError, GameConfig};
pub use game_state::{GameState, LockEvent};
pub use pool::ShapePool;
pub use program::{FrameOutcome, Program, Screen};
pub use scoring::{calculate_score, BackToBack, ClearKind, ScoreResult};
pub use shape::Shape;
pub use snapshot::{GameSnapshot, ShapeSnapshot};
pub use ui::{Align, FontSize, UiContext, Widget, WidgetKind};
