//! Shared types module - plain data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is pure data with no external dependencies, so it can be used
//! from the simulation core, the input mapper and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 22 (indexed 0-21, top to bottom)
//! - **Hidden rows**: the top 2 rows are a spawn buffer and are not drawn
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal loop (~60 FPS) |
//! | `GRAVITY_BASE_MS` | 1000 | Gravity delay before the level reduction |
//! | `GRAVITY_STEP_MS` | 100 | Gravity delay removed per level |
//! | `SOFT_DROP_DELAY_MS` | 50 | Gravity delay while soft dropping |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a grounded piece locks |
//! | `SOFT_DROP_GRACE_MS` | 150 | Soft drop auto-release without key-up events |
//!
//! # Examples
//!
//! ```
//! use bagtris_types::{Rotation, RotateDirection, ShapeKind, Vec2, BOARD_COLUMNS, BOARD_ROWS};
//!
//! assert_eq!(ShapeKind::ALL.len(), 7);
//! assert_eq!(Rotation::North.rotate(RotateDirection::Right), Rotation::East);
//! assert_eq!(Vec2::new(1, 2) + Vec2::DOWN, Vec2::new(1, 3));
//! assert_eq!((BOARD_COLUMNS, BOARD_ROWS), (10, 22));
//! ```

use std::ops::{Add, AddAssign, Neg, Sub};

/// Board width in cells
pub const BOARD_COLUMNS: usize = 10;

/// Board height in cells, including the hidden spawn buffer
pub const BOARD_ROWS: usize = 22;

/// Rows at the top of the board that are never drawn
pub const HIDDEN_ROWS: usize = 2;

/// Rows the player actually sees
pub const VISIBLE_ROWS: usize = BOARD_ROWS - HIDDEN_ROWS;

/// Frame interval of the terminal loop (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity delay at level 0, before the per-level reduction
pub const GRAVITY_BASE_MS: u32 = 1000;

/// Gravity delay removed for every level
pub const GRAVITY_STEP_MS: u32 = 100;

/// Gravity delay while the soft drop key is held
pub const SOFT_DROP_DELAY_MS: u32 = 50;

/// Time a grounded piece may rest before it is fixed into the board
pub const LOCK_DELAY_MS: u32 = 500;

/// Soft drop auto-release for terminals that never report key releases
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// DAS (Delayed Auto Shift) delay in milliseconds
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds
pub const DEFAULT_ARR_MS: u32 = 50;

/// Highest level selectable from the menu
pub const MAX_START_LEVEL: u32 = 15;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Combo bonus per combo step, multiplied by the level
pub const COMBO_BASE: u32 = 50;

/// Back-to-back bonus numerator (3/2 = 1.5x multiplier)
pub const B2B_NUMERATOR: u32 = 3;

/// Back-to-back bonus denominator
pub const B2B_DENOMINATOR: u32 = 2;

/// Integer 2D vector, used both for grid positions and offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0, 0);
    pub const DOWN: Vec2 = Vec2::new(0, 1);
    pub const LEFT: Vec2 = Vec2::new(-1, 0);
    pub const RIGHT: Vec2 = Vec2::new(1, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Check whether `p` lies inside (right and bottom edges excluded)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven tetromino kinds
///
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **L**: Orange
/// - **J**: Blue (mirror of L)
/// - **S**: Green
/// - **Z**: Red (mirror of S)
/// - **T**: Purple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    L,
    J,
    S,
    Z,
    T,
}

impl ShapeKind {
    /// All kinds, in the order a fresh bag is filled before shuffling
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::T,
    ];

    /// Single uppercase letter, for compact displays
    ///
    /// ```
    /// use bagtris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::T.letter(), 'T');
    /// ```
    pub fn letter(&self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::O => 'O',
            ShapeKind::L => 'L',
            ShapeKind::J => 'J',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
            ShapeKind::T => 'T',
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (0°)
/// - **East**: 90° clockwise
/// - **South**: 180°
/// - **West**: 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn rotate(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Right => self.rotate_cw(),
            RotateDirection::Left => self.rotate_ccw(),
        }
    }

    /// Index into per-rotation tables (North = 0 ... West = 3)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    pub fn degrees(&self) -> u16 {
        self.index() as u16 * 90
    }
}

/// Direction of a rotation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    /// Counter-clockwise
    Left,
    /// Clockwise
    Right,
}

/// Discrete input commands, drained once per frame
///
/// These come from the terminal input mapper but are deliberately free of any
/// terminal types, so scripted tests can drive the game the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the game (to the menu) or exit the program (from the menu)
    Quit,
    /// Restart the current game, or start one from the menu
    Reset,
    /// Toggle pause
    Pause,
    MoveLeft,
    MoveRight,
    /// Rotate counter-clockwise
    RotateLeft,
    /// Rotate clockwise
    RotateRight,
    /// Soft drop key went down
    SoftDropOn,
    /// Soft drop key went up
    SoftDropOff,
    HardDrop,
    Hold,
    /// Presentation pass-through: grow the board cells
    IncreaseWindowSize,
    /// Presentation pass-through: shrink the board cells
    DecreaseWindowSize,
    /// Pointer click in presentation coordinates
    MouseClick(Vec2),
}
