//! Board module - manages the game grid
//!
//! The board is a 22x10 grid of [`Block`]s stored as a flat, row-major array.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21 (top to bottom).
//! The top two rows are the hidden spawn buffer.
//!
//! Besides storage, the board answers every legality question about a [`Shape`]:
//! moves, rotations with wall kicks, the shadow projection and T-spin corners.

use arrayvec::ArrayVec;

use crate::shape::Shape;
use crate::types::{Color, RotateDirection, ShapeKind, Vec2, BOARD_COLUMNS, BOARD_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_COLUMNS * BOARD_ROWS;

/// Color used for blocks created by [`Board::from_ascii`]
pub const GARBAGE_COLOR: Color = Color::new(128, 128, 128);

/// A single grid cell. Only `active` cells are occupied; the color of an
/// inactive cell means nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub color: Color,
    pub active: bool,
}

impl Block {
    pub const EMPTY: Block = Block {
        color: Color::new(0, 0, 0),
        active: false,
    };

    pub const fn filled(color: Color) -> Self {
        Self {
            color,
            active: true,
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::EMPTY
    }
}

/// How the last successful rotation was achieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationResult {
    /// No rotation (failed, or the last transform was not a rotation)
    #[default]
    None,
    /// Rotated in place
    Regular,
    /// Rotated after applying one of the wall kick offsets
    Wallkick,
}

impl RotationResult {
    pub fn succeeded(&self) -> bool {
        !matches!(self, RotationResult::None)
    }
}

/// T-spin detection result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TSpin {
    #[default]
    None,
    /// Three corners blocked, reached with a wall kick
    Mini,
    /// Three corners blocked, reached with a plain rotation
    Regular,
}

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * COLUMNS + x)
    cells: [Block; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Block::EMPTY; BOARD_SIZE],
        }
    }

    /// Build a board from text rows, top-aligned. `.` is empty, anything else
    /// is a filled block. Missing rows are empty; extra columns are ignored.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().take(BOARD_ROWS).enumerate() {
            for (x, ch) in row.chars().take(BOARD_COLUMNS).enumerate() {
                if ch != '.' {
                    board.cells[y * BOARD_COLUMNS + x] = Block::filled(GARBAGE_COLOR);
                }
            }
        }
        board
    }

    /// Render occupancy as text rows (`#` filled, `.` empty)
    pub fn to_ascii(&self) -> Vec<String> {
        (0..BOARD_ROWS)
            .map(|y| {
                self.row(y)
                    .iter()
                    .map(|b| if b.active { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(pos: Vec2) -> Option<usize> {
        if pos.x < 0 || pos.x >= BOARD_COLUMNS as i32 || pos.y < 0 || pos.y >= BOARD_ROWS as i32 {
            return None;
        }
        Some((pos.y as usize) * BOARD_COLUMNS + (pos.x as usize))
    }

    pub fn columns(&self) -> usize {
        BOARD_COLUMNS
    }

    pub fn rows(&self) -> usize {
        BOARD_ROWS
    }

    /// Get the block at `pos`, or `None` when out of bounds
    pub fn get(&self, pos: Vec2) -> Option<Block> {
        Self::index(pos).map(|idx| self.cells[idx])
    }

    /// Set the block at `pos`. Returns false if out of bounds
    pub fn set(&mut self, pos: Vec2, block: Block) -> bool {
        match Self::index(pos) {
            Some(idx) => {
                self.cells[idx] = block;
                true
            }
            None => false,
        }
    }

    /// One row of blocks, left to right
    pub fn row(&self, y: usize) -> &[Block] {
        let start = y * BOARD_COLUMNS;
        &self.cells[start..start + BOARD_COLUMNS]
    }

    /// Reference to the flat cell array
    pub fn cells(&self) -> &[Block] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Block::EMPTY);
    }

    /// A spot is valid when it is inside the grid and unoccupied
    pub fn is_valid_spot(&self, pos: Vec2) -> bool {
        matches!(self.get(pos), Some(block) if !block.active)
    }

    pub fn is_valid_shape(&self, shape: &Shape) -> bool {
        shape
            .get_absolute_block_positions()
            .iter()
            .all(|&p| self.is_valid_spot(p))
    }

    /// Would `shape` be valid after moving by `delta`? Never mutates `shape`.
    pub fn is_valid_move(&self, shape: &Shape, delta: Vec2) -> bool {
        self.is_valid_shape(&shape.translated(delta))
    }

    /// Move `shape` by `delta` if the destination is valid
    pub fn try_move(&self, shape: &mut Shape, delta: Vec2) -> bool {
        if !self.is_valid_move(shape, delta) {
            return false;
        }
        shape.pos += delta;
        true
    }

    /// Where `shape` would come to rest if dropped straight down
    pub fn get_shadow(&self, shape: &Shape) -> Shape {
        let mut shadow = *shape;
        while self.try_move(&mut shadow, Vec2::DOWN) {}
        shadow
    }

    /// Rotate `shape` one step, falling back to its wall kicks.
    ///
    /// Kick offsets are y-up, so their y is negated before being applied. On
    /// failure the shape is left untouched.
    pub fn rotate_shape(&self, shape: &mut Shape, direction: RotateDirection) -> RotationResult {
        let rotated = shape.rotated(direction);
        if self.is_valid_shape(&rotated) {
            *shape = rotated;
            return RotationResult::Regular;
        }

        for &kick in shape.get_wallkicks(direction) {
            let kicked = rotated.translated(Vec2::new(kick.x, -kick.y));
            if self.is_valid_shape(&kicked) {
                *shape = kicked;
                return RotationResult::Wallkick;
            }
        }

        RotationResult::None
    }

    /// Detect a T-spin from corner occupancy of the 3x3 T box
    pub fn check_for_tspin(&self, shape: &Shape, last_rotation: RotationResult) -> TSpin {
        if shape.kind() != ShapeKind::T || !last_rotation.succeeded() {
            return TSpin::None;
        }

        const CORNERS: [Vec2; 4] = [
            Vec2::new(0, 0),
            Vec2::new(2, 0),
            Vec2::new(0, 2),
            Vec2::new(2, 2),
        ];
        let blocked = CORNERS
            .iter()
            .filter(|&&c| !self.is_valid_spot(shape.pos() + c))
            .count();

        if blocked < 3 {
            return TSpin::None;
        }
        match last_rotation {
            RotationResult::Wallkick => TSpin::Mini,
            _ => TSpin::Regular,
        }
    }

    /// Write the shape's blocks into the grid. Blocks outside the grid are dropped.
    pub fn place_shape(&mut self, shape: &Shape) {
        let block = Block::filled(shape.color());
        for p in shape.get_absolute_block_positions() {
            self.set(p, block);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < BOARD_ROWS && self.row(y).iter().all(|b| b.active)
    }

    fn clear_row(&mut self, y: usize) {
        let start = y * BOARD_COLUMNS;
        self.cells[start..start + BOARD_COLUMNS].fill(Block::EMPTY);
    }

    fn move_row(&mut self, from: usize, to: usize) {
        let src = from * BOARD_COLUMNS;
        self.cells
            .copy_within(src..src + BOARD_COLUMNS, to * BOARD_COLUMNS);
    }

    /// Clear every full row and compact the rest downward.
    ///
    /// Returns the number of rows cleared (0-4).
    ///
    /// # Panics
    ///
    /// Panics if more than four rows are full at once; a single piece cannot
    /// complete more than four.
    pub fn remove_full_rows(&mut self) -> u32 {
        let mut full = ArrayVec::<usize, 4>::new();
        for y in 0..BOARD_ROWS {
            if self.is_row_full(y) {
                assert!(full.try_push(y).is_ok(), "more than 4 rows full at once");
            }
        }

        let (Some(&top), Some(&bottom)) = (full.first(), full.last()) else {
            return 0;
        };

        for &y in &full {
            self.clear_row(y);
        }

        // Rows inside the cleared span close the gaps left below them.
        let mut shift = 0;
        for y in (top..=bottom).rev() {
            if full.contains(&y) {
                shift += 1;
            } else {
                self.move_row(y, y + shift);
            }
        }

        // Everything above the span falls by the full count.
        let total = full.len();
        for y in (0..top).rev() {
            self.move_row(y, y + total);
        }
        for y in 0..total {
            self.clear_row(y);
        }

        total as u32
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(Vec2::new(0, 0)), Some(0));
        assert_eq!(Board::index(Vec2::new(9, 0)), Some(9));
        assert_eq!(Board::index(Vec2::new(0, 1)), Some(10));
        assert_eq!(Board::index(Vec2::new(9, 21)), Some(219));
        assert_eq!(Board::index(Vec2::new(-1, 0)), None);
        assert_eq!(Board::index(Vec2::new(10, 0)), None);
        assert_eq!(Board::index(Vec2::new(0, 22)), None);
    }

    #[test]
    fn test_ascii_roundtrip_keeps_occupancy() {
        let board = Board::from_ascii(&["#.........", "", "..##......"]);
        let text = board.to_ascii();
        assert_eq!(text[0], "#.........");
        assert_eq!(text[1], "..........");
        assert_eq!(text[2], "..##......");
        assert_eq!(board.cells.iter().filter(|b| b.active).count(), 3);
    }

    #[test]
    fn test_rotate_uses_kick_when_blocked_in_place() {
        // T pointing north against the left wall: rotating left needs a kick.
        let board = Board::new();
        let mut t = Shape::new(ShapeKind::T)
            .with_rotation(Rotation::East)
            .at(Vec2::new(-1, 5));
        assert!(board.is_valid_shape(&t));

        let result = board.rotate_shape(&mut t, RotateDirection::Left);
        assert_eq!(result, RotationResult::Wallkick);
        assert_eq!(t.rotation(), Rotation::North);
        assert!(board.is_valid_shape(&t));
        // R->0 first kick is (+1, 0).
        assert_eq!(t.pos(), Vec2::new(0, 5));
    }

    #[test]
    fn test_failed_rotation_leaves_shape_alone() {
        // I piece lying on the floor of a one-row-deep well it cannot stand up in.
        let mut rows = vec![""; 18];
        rows.extend(["##########", "##########", "....######", "##########"]);
        let board = Board::from_ascii(&rows);
        let mut i = Shape::new(ShapeKind::I).at(Vec2::new(0, 19));
        assert!(board.is_valid_shape(&i));
        let before = i;

        assert_eq!(board.rotate_shape(&mut i, RotateDirection::Right), RotationResult::None);
        assert_eq!(i, before);
    }

    #[test]
    fn test_place_shape_colors_cells() {
        let mut board = Board::new();
        let o = Shape::new(ShapeKind::O).at(Vec2::new(0, 20));
        board.place_shape(&o);
        for p in o.get_absolute_block_positions() {
            assert_eq!(board.get(p), Some(Block::filled(o.color())));
        }
    }
}
