//! Game state module - one play session
//!
//! This module ties together the board, the shape pool and scoring. Each frame
//! the caller hands over the elapsed time and the commands received since the
//! previous frame; [`GameState::update`] applies them, runs gravity, and locks
//! the current piece once its lock delay has run out.
//!
//! All timers are [`Duration`]s measured against a session clock that only
//! advances while the game is running, so pausing freezes them for free and
//! they can never run backwards.

use std::time::Duration;

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::board::{Board, RotationResult, TSpin};
use crate::config::GameConfig;
use crate::pool::{ShapePool, MAX_PREVIEW};
use crate::scoring::{calculate_score, drop_bonus, gravity_delay, level_for, BackToBack, ClearKind};
use crate::shape::Shape;
use crate::snapshot::{GameSnapshot, ShapeSnapshot};
use crate::types::{Command, RotateDirection, ShapeKind, Vec2, HIDDEN_ROWS};

/// What happened the last time a piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub rows: u32,
    pub clear: ClearKind,
    pub tspin: TSpin,
    /// Everything the lock added to the score, drop bonus included
    pub points: u32,
    pub combo: i32,
    pub back_to_back: bool,
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    pool: ShapePool,
    current: Shape,
    shadow: Shape,
    hold: Option<ShapeKind>,
    has_held: bool,
    /// How the current piece was last transformed, if by rotation
    last_rotation: RotationResult,
    score: u32,
    level: u32,
    lines: u32,
    combo: i32,
    back_to_back: BackToBack,
    /// Session time; frozen while paused
    clock: Duration,
    /// Last gravity step (or spawn)
    drop_clock: Duration,
    /// Last successful down move, move/rotate reset, or spawn
    lock_clock: Duration,
    soft_drop_rows: u32,
    hard_drop_rows: u32,
    soft_dropping: bool,
    paused: bool,
    game_over: bool,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Start a session. The first piece is spawned immediately.
    pub fn new(config: GameConfig) -> Self {
        let pool = match config.seed {
            Some(seed) => ShapePool::new(seed),
            None => ShapePool::from_entropy(),
        };
        Self::with_pool(config, pool)
    }

    /// Deterministic session, mostly for tests and replays
    pub fn with_seed(starting_level: u32, seed: u64) -> Self {
        Self::new(
            GameConfig::default()
                .with_starting_level(starting_level)
                .with_seed(seed),
        )
    }

    fn with_pool(config: GameConfig, pool: ShapePool) -> Self {
        let current = Shape::new(pool.current_shape());
        let board = Board::new();
        let shadow = board.get_shadow(&current);

        info!(
            starting_level = config.starting_level,
            first = ?current.kind(),
            "session started"
        );

        Self {
            config,
            board,
            pool,
            current,
            shadow,
            hold: None,
            has_held: false,
            last_rotation: RotationResult::None,
            score: 0,
            level: config.starting_level,
            lines: 0,
            combo: -1,
            back_to_back: BackToBack::None,
            clock: Duration::ZERO,
            drop_clock: Duration::ZERO,
            lock_clock: Duration::ZERO,
            soft_drop_rows: 0,
            hard_drop_rows: 0,
            soft_dropping: false,
            paused: false,
            game_over: false,
            last_event: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Shape {
        self.current
    }

    pub fn shadow(&self) -> Shape {
        self.shadow
    }

    pub fn hold_piece(&self) -> Option<ShapeKind> {
        self.hold
    }

    pub fn has_held(&self) -> bool {
        self.has_held
    }

    pub fn last_rotation(&self) -> RotationResult {
        self.last_rotation
    }

    pub fn preview(&self) -> ArrayVec<ShapeKind, MAX_PREVIEW> {
        self.pool.get_preview_shapes_array()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn back_to_back(&self) -> BackToBack {
        self.back_to_back
    }

    pub fn soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Session time elapsed while unpaused
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Check if the current piece is resting on something
    pub fn is_grounded(&self) -> bool {
        !self.board.is_valid_move(&self.current, Vec2::DOWN)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (y, row) in out.board.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                let block = self.board.row(y)[x];
                *cell = block.active.then_some(block.color);
            }
        }
        out.current = (!self.game_over).then(|| ShapeSnapshot::from(self.current));
        out.shadow = (!self.game_over).then(|| ShapeSnapshot::from(self.shadow));
        out.hold = self.hold;
        out.can_hold = !self.has_held;
        out.preview = self.preview();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance one frame: apply `commands` in order, then gravity, then the
    /// lock check.
    pub fn update(&mut self, elapsed: Duration, commands: &[Command]) {
        for &command in commands {
            self.apply_command(command);
        }

        if self.paused || self.game_over {
            return;
        }

        self.clock += elapsed;
        self.apply_gravity();
        self.check_lock();
    }

    /// Apply a single command. Returns whether it had any effect.
    ///
    /// While paused only `Pause`, `Reset` and the soft drop key state are
    /// honored. Program-level commands (quit, window, mouse) are ignored here.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::Pause => {
                if self.game_over {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            Command::Reset => {
                self.reset();
                true
            }
            Command::SoftDropOn => {
                self.soft_dropping = true;
                true
            }
            Command::SoftDropOff => {
                self.soft_dropping = false;
                true
            }
            _ if self.paused || self.game_over => false,
            Command::MoveLeft => self.shift(Vec2::LEFT),
            Command::MoveRight => self.shift(Vec2::RIGHT),
            Command::RotateLeft => self.rotate(RotateDirection::Left),
            Command::RotateRight => self.rotate(RotateDirection::Right),
            Command::HardDrop => self.hard_drop(),
            Command::Hold => self.hold(),
            Command::Quit
            | Command::IncreaseWindowSize
            | Command::DecreaseWindowSize
            | Command::MouseClick(_) => false,
        }
    }

    /// Start over with the same configuration and a reshuffled pool
    pub fn reset(&mut self) {
        let mut pool = self.pool.clone();
        pool.reshuffle();
        info!(score = self.score, "session reset");
        *self = Self::with_pool(self.config, pool);
    }

    /// Common bookkeeping after a successful move or rotation
    fn after_transform(&mut self, was_grounded: bool) {
        self.shadow = self.board.get_shadow(&self.current);
        self.lock_clock = self.clock;
        if was_grounded {
            self.drop_clock = self.clock;
        }
        self.hard_drop_rows = 0;
    }

    fn shift(&mut self, delta: Vec2) -> bool {
        let was_grounded = self.is_grounded();
        if !self.board.try_move(&mut self.current, delta) {
            return false;
        }
        self.last_rotation = RotationResult::None;
        self.after_transform(was_grounded);
        true
    }

    fn rotate(&mut self, direction: RotateDirection) -> bool {
        let was_grounded = self.is_grounded();
        let result = self.board.rotate_shape(&mut self.current, direction);
        if !result.succeeded() {
            return false;
        }
        self.last_rotation = result;
        if result == RotationResult::Wallkick && was_grounded {
            self.soft_drop_rows = 0;
        }
        self.after_transform(was_grounded);
        true
    }

    /// Drop to the shadow. The piece still locks through the lock delay.
    fn hard_drop(&mut self) -> bool {
        let mut rows = 0;
        while self.board.try_move(&mut self.current, Vec2::DOWN) {
            rows += 1;
            self.lock_clock = self.clock;
        }
        self.hard_drop_rows += rows;
        self.soft_drop_rows = 0;
        self.last_rotation = RotationResult::None;
        true
    }

    /// Swap the current piece with the hold slot, once per lock
    fn hold(&mut self) -> bool {
        if self.has_held {
            return false;
        }

        let kind = match self.hold.replace(self.current.kind()) {
            Some(held) => held,
            None => self.pool.next_shape(),
        };
        self.current = Shape::new(kind);
        self.has_held = true;
        self.soft_drop_rows = 0;
        self.hard_drop_rows = 0;
        self.last_rotation = RotationResult::None;
        self.shadow = self.board.get_shadow(&self.current);
        self.lock_clock = self.clock;
        self.drop_clock = self.clock;

        if !self.board.is_valid_shape(&self.current) {
            self.end_game("hold spawn blocked");
        }
        true
    }

    fn apply_gravity(&mut self) {
        let level_delay = gravity_delay(self.level);
        let delay = if self.soft_dropping && self.config.soft_drop_delay < level_delay {
            self.config.soft_drop_delay
        } else {
            level_delay
        };

        if self.clock.saturating_sub(self.drop_clock) <= delay {
            return;
        }
        self.drop_clock = self.clock;

        if self.board.try_move(&mut self.current, Vec2::DOWN) {
            self.lock_clock = self.clock;
            self.last_rotation = RotationResult::None;
            if self.soft_dropping {
                self.soft_drop_rows += 1;
            } else {
                self.soft_drop_rows = 0;
            }
        }
    }

    fn check_lock(&mut self) {
        if self.clock.saturating_sub(self.lock_clock) <= self.config.lock_delay {
            return;
        }
        if !self.is_grounded() {
            return;
        }
        self.lock_piece();
    }

    /// Fix the current piece into the board, score it and spawn the next one
    fn lock_piece(&mut self) {
        let piece = self.current;
        let locked_out = piece
            .get_absolute_block_positions()
            .iter()
            .all(|p| p.y < HIDDEN_ROWS as i32);

        self.board.place_shape(&piece);
        let tspin = self.board.check_for_tspin(&piece, self.last_rotation);
        let rows = self.board.remove_full_rows();
        let clear = ClearKind::from_lines(rows, tspin);

        let mut points = 0;
        if clear != ClearKind::None {
            points += drop_bonus(self.hard_drop_rows, self.soft_drop_rows);
        }
        self.hard_drop_rows = 0;
        self.soft_drop_rows = 0;

        // A T-spin without lines still breaks the combo.
        self.combo = if rows > 0 { self.combo + 1 } else { -1 };

        let result = calculate_score(clear, self.level, self.combo, self.back_to_back);
        self.back_to_back = result.streak;
        points = points.saturating_add(result.total);
        self.score = self.score.saturating_add(points);

        self.lines += rows;
        self.level = level_for(self.lines, self.config.starting_level);

        debug!(
            kind = ?piece.kind(),
            rows,
            ?clear,
            points,
            combo = self.combo,
            b2b = result.b2b_applied,
            "piece locked"
        );
        self.last_event = Some(LockEvent {
            rows,
            clear,
            tspin,
            points,
            combo: self.combo,
            back_to_back: result.b2b_applied,
        });

        self.spawn_next();
        if locked_out {
            self.end_game("locked out above the visible field");
        }
    }

    fn spawn_next(&mut self) {
        self.current = Shape::new(self.pool.next_shape());
        self.shadow = self.board.get_shadow(&self.current);
        self.lock_clock = self.clock;
        self.drop_clock = self.clock;
        self.has_held = false;
        self.last_rotation = RotationResult::None;

        if !self.board.is_valid_shape(&self.current) {
            self.end_game("spawn blocked");
        }
    }

    fn end_game(&mut self, reason: &str) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        info!(reason, score = self.score, lines = self.lines, level = self.level, "game over");
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
