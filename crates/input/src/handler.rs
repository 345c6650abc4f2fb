//! DAS/ARR input handler for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::Duration;

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{Command, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_GRACE_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

fn is_left(code: KeyCode) -> bool {
    matches!(code, KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H'))
}

fn is_right(code: KeyCode) -> bool {
    matches!(code, KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L'))
}

fn is_down(code: KeyCode) -> bool {
    matches!(code, KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J'))
}

/// Tracks held keys for auto-repeat and soft drop.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    since_last_key: Duration,
    horizontal_das_timer: Duration,
    horizontal_arr_accumulator: Duration,
    das_delay: Duration,
    arr_rate: Duration,
    key_release_timeout: Duration,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(
            Duration::from_millis(DEFAULT_DAS_MS as u64),
            Duration::from_millis(DEFAULT_ARR_MS as u64),
        )
    }

    /// # Panics
    ///
    /// Panics if `arr_rate` is zero.
    pub fn with_config(das_delay: Duration, arr_rate: Duration) -> Self {
        assert!(!arr_rate.is_zero(), "ARR must be positive");
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            since_last_key: Duration::ZERO,
            horizontal_das_timer: Duration::ZERO,
            horizontal_arr_accumulator: Duration::ZERO,
            das_delay,
            arr_rate,
            key_release_timeout: Duration::from_millis(SOFT_DROP_GRACE_MS as u64),
        }
    }

    pub fn with_key_release_timeout(mut self, timeout: Duration) -> Self {
        self.key_release_timeout = timeout;
        self
    }

    pub fn key_release_timeout(&self) -> Duration {
        self.key_release_timeout
    }

    pub fn soft_drop_held(&self) -> bool {
        self.down_held
    }

    /// Route a key event: held keys go through the repeat logic, everything
    /// else straight through [`map_key`].
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Command> {
        match key.kind {
            KeyEventKind::Release => self.handle_key_release(key.code),
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if is_left(key.code) || is_right(key.code) || is_down(key.code) {
                    self.handle_key_press(key.code)
                } else {
                    map_key(key)
                }
            }
        }
    }

    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Command> {
        if is_left(code) {
            self.since_last_key = Duration::ZERO;
            if self.horizontal == HorizontalDirection::Left {
                return None;
            }
            self.start_horizontal(HorizontalDirection::Left);
            Some(Command::MoveLeft)
        } else if is_right(code) {
            self.since_last_key = Duration::ZERO;
            if self.horizontal == HorizontalDirection::Right {
                return None;
            }
            self.start_horizontal(HorizontalDirection::Right);
            Some(Command::MoveRight)
        } else if is_down(code) {
            self.since_last_key = Duration::ZERO;
            if self.down_held {
                return None;
            }
            self.down_held = true;
            Some(Command::SoftDropOn)
        } else {
            None
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<Command> {
        if (is_left(code) && self.horizontal == HorizontalDirection::Left)
            || (is_right(code) && self.horizontal == HorizontalDirection::Right)
        {
            self.start_horizontal(HorizontalDirection::None);
            None
        } else if is_down(code) && self.down_held {
            self.down_held = false;
            Some(Command::SoftDropOff)
        } else {
            None
        }
    }

    fn start_horizontal(&mut self, direction: HorizontalDirection) {
        self.horizontal = direction;
        self.horizontal_das_timer = Duration::ZERO;
        self.horizontal_arr_accumulator = Duration::ZERO;
    }

    /// Advance held-key timers by one frame and return the generated commands.
    pub fn update(&mut self, elapsed: Duration) -> ArrayVec<Command, 32> {
        let mut commands = ArrayVec::<Command, 32>::new();
        self.since_last_key += elapsed;

        // Auto-release when terminal does not emit release events.
        if self.since_last_key > self.key_release_timeout {
            if self.horizontal != HorizontalDirection::None {
                self.start_horizontal(HorizontalDirection::None);
            }
            if self.down_held {
                self.down_held = false;
                commands.push(Command::SoftDropOff);
            }
        }

        let repeat = match self.horizontal {
            HorizontalDirection::Left => Command::MoveLeft,
            HorizontalDirection::Right => Command::MoveRight,
            HorizontalDirection::None => return commands,
        };

        let prev_das = self.horizontal_das_timer;
        self.horizontal_das_timer += elapsed;
        if self.horizontal_das_timer < self.das_delay {
            return commands;
        }

        let excess = if prev_das < self.das_delay {
            self.horizontal_das_timer - self.das_delay
        } else {
            elapsed
        };
        self.horizontal_arr_accumulator += excess;
        while self.horizontal_arr_accumulator >= self.arr_rate {
            if commands.try_push(repeat).is_err() {
                self.horizontal_arr_accumulator = Duration::ZERO;
                break;
            }
            self.horizontal_arr_accumulator -= self.arr_rate;
        }

        commands
    }

    /// Forget all held keys. Returns `SoftDropOff` if soft drop was held.
    pub fn reset(&mut self) -> Option<Command> {
        let was_down = self.down_held;
        self.start_horizontal(HorizontalDirection::None);
        self.down_held = false;
        self.since_last_key = Duration::ZERO;
        was_down.then_some(Command::SoftDropOff)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
