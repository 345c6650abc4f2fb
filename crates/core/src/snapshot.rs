use arrayvec::ArrayVec;

use crate::pool::MAX_PREVIEW;
use crate::shape::Shape;
use crate::types::{Color, Rotation, ShapeKind, Vec2, BOARD_COLUMNS, BOARD_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeSnapshot {
    pub kind: ShapeKind,
    pub rotation: Rotation,
    pub pos: Vec2,
    pub color: Color,
    /// Absolute board cells, row-major within the piece
    pub cells: [Vec2; 4],
}

impl From<Shape> for ShapeSnapshot {
    fn from(value: Shape) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            pos: value.pos(),
            color: value.color(),
            cells: value.get_absolute_block_positions(),
        }
    }
}

/// Read-only view of a session for presentation. All rows are included; the
/// renderer decides which ones are visible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Option<Color>; BOARD_COLUMNS]; BOARD_ROWS],
    pub current: Option<ShapeSnapshot>,
    pub shadow: Option<ShapeSnapshot>,
    pub hold: Option<ShapeKind>,
    pub can_hold: bool,
    pub preview: ArrayVec<ShapeKind, MAX_PREVIEW>,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub lines: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_COLUMNS]; BOARD_ROWS],
            current: None,
            shadow: None,
            hold: None,
            can_hold: true,
            preview: ArrayVec::new(),
            score: 0,
            high_score: 0,
            level: 0,
            lines: 0,
            paused: false,
            game_over: false,
        }
    }
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}
