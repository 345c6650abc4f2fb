//! Shape module - tetromino layouts and SRS wall kick tables
//!
//! Every kind owns a constant table of four 4x4 boolean layouts, one per rotation
//! state, selected by [`ShapeKind`]. Wall kicks are stored in guideline notation
//! (y grows upward); the board inverts y when applying them.
//! Reference: https://tetris.wiki/SRS

use crate::types::{Color, RotateDirection, Rotation, ShapeKind, Vec2};

/// One rotation state: `layout[y][x]`, y grows downward
pub type Layout = [[bool; 4]; 4];

/// Spawn position of the 4x4 box origin
pub const SPAWN_POSITION: Vec2 = Vec2::new(3, 0);

const fn layout(rows: [&[u8; 4]; 4]) -> Layout {
    let mut out = [[false; 4]; 4];
    let mut y = 0;
    while y < 4 {
        let mut x = 0;
        while x < 4 {
            out[y][x] = rows[y][x] == b'#';
            x += 1;
        }
        y += 1;
    }
    out
}

const I_LAYOUTS: [Layout; 4] = [
    layout([b"....", b"####", b"....", b"...."]),
    layout([b"..#.", b"..#.", b"..#.", b"..#."]),
    layout([b"....", b"....", b"####", b"...."]),
    layout([b".#..", b".#..", b".#..", b".#.."]),
];

const O_LAYOUT: Layout = layout([b".##.", b".##.", b"....", b"...."]);
const O_LAYOUTS: [Layout; 4] = [O_LAYOUT; 4];

const L_LAYOUTS: [Layout; 4] = [
    layout([b"..#.", b"###.", b"....", b"...."]),
    layout([b".#..", b".#..", b".##.", b"...."]),
    layout([b"....", b"###.", b"#...", b"...."]),
    layout([b"##..", b".#..", b".#..", b"...."]),
];

const J_LAYOUTS: [Layout; 4] = [
    layout([b"#...", b"###.", b"....", b"...."]),
    layout([b".##.", b".#..", b".#..", b"...."]),
    layout([b"....", b"###.", b"..#.", b"...."]),
    layout([b".#..", b".#..", b"##..", b"...."]),
];

const S_LAYOUTS: [Layout; 4] = [
    layout([b".##.", b"##..", b"....", b"...."]),
    layout([b".#..", b".##.", b"..#.", b"...."]),
    layout([b"....", b".##.", b"##..", b"...."]),
    layout([b"#...", b"##..", b".#..", b"...."]),
];

const Z_LAYOUTS: [Layout; 4] = [
    layout([b"##..", b".##.", b"....", b"...."]),
    layout([b"..#.", b".##.", b".#..", b"...."]),
    layout([b"....", b"##..", b".##.", b"...."]),
    layout([b".#..", b"##..", b"#...", b"...."]),
];

const T_LAYOUTS: [Layout; 4] = [
    layout([b".#..", b"###.", b"....", b"...."]),
    layout([b".#..", b".##.", b".#..", b"...."]),
    layout([b"....", b"###.", b".#..", b"...."]),
    layout([b".#..", b"##..", b".#..", b"...."]),
];

/// Kick candidates per rotation state, then per direction (`[left, right]`)
type KickTable = [[[Vec2; 4]; 2]; 4];

const fn v(x: i32, y: i32) -> Vec2 {
    Vec2::new(x, y)
}

/// J, L, S, T, Z share this table. East and West kick the same way in both
/// directions.
const JLSTZ_KICKS: KickTable = [
    // North: 0->L, 0->R
    [
        [v(1, 0), v(1, 1), v(0, -2), v(1, -2)],
        [v(-1, 0), v(-1, 1), v(0, -2), v(-1, -2)],
    ],
    // East: R->0, R->2
    [
        [v(1, 0), v(1, -1), v(0, 2), v(1, 2)],
        [v(1, 0), v(1, -1), v(0, 2), v(1, 2)],
    ],
    // South: 2->R, 2->L
    [
        [v(-1, 0), v(-1, 1), v(0, -2), v(-1, -2)],
        [v(1, 0), v(1, 1), v(0, -2), v(1, -2)],
    ],
    // West: L->2, L->0
    [
        [v(-1, 0), v(-1, -1), v(0, 2), v(-1, 2)],
        [v(-1, 0), v(-1, -1), v(0, 2), v(-1, 2)],
    ],
];

const I_KICKS: KickTable = [
    // North: 0->L, 0->R
    [
        [v(-1, 0), v(2, 0), v(-1, 2), v(2, -1)],
        [v(-2, 0), v(1, 0), v(-2, -1), v(1, 2)],
    ],
    // East: R->0, R->2
    [
        [v(2, 0), v(-1, 0), v(2, 1), v(-1, -2)],
        [v(-1, 0), v(2, 0), v(-1, 2), v(2, -1)],
    ],
    // South: 2->R, 2->L
    [
        [v(1, 0), v(-2, 0), v(1, -2), v(-2, 1)],
        [v(2, 0), v(-1, 0), v(2, 1), v(-1, -2)],
    ],
    // West: L->2, L->0
    [
        [v(-2, 0), v(1, 0), v(-2, -1), v(1, 2)],
        [v(1, 0), v(-2, 0), v(1, -2), v(-2, 1)],
    ],
];

fn layouts(kind: ShapeKind) -> &'static [Layout; 4] {
    match kind {
        ShapeKind::I => &I_LAYOUTS,
        ShapeKind::O => &O_LAYOUTS,
        ShapeKind::L => &L_LAYOUTS,
        ShapeKind::J => &J_LAYOUTS,
        ShapeKind::S => &S_LAYOUTS,
        ShapeKind::Z => &Z_LAYOUTS,
        ShapeKind::T => &T_LAYOUTS,
    }
}

fn kick_table(kind: ShapeKind) -> Option<&'static KickTable> {
    match kind {
        ShapeKind::O => None,
        ShapeKind::I => Some(&I_KICKS),
        _ => Some(&JLSTZ_KICKS),
    }
}

/// Display color of a kind
pub fn kind_color(kind: ShapeKind) -> Color {
    match kind {
        ShapeKind::I => Color::new(80, 220, 220),
        ShapeKind::O => Color::new(240, 220, 80),
        ShapeKind::L => Color::new(255, 165, 0),
        ShapeKind::J => Color::new(80, 120, 220),
        ShapeKind::S => Color::new(100, 220, 120),
        ShapeKind::Z => Color::new(220, 80, 80),
        ShapeKind::T => Color::new(200, 120, 220),
    }
}

/// A tetromino: kind, rotation state and the position of its 4x4 box.
///
/// Shapes are plain values. Copy one to probe a move without touching the
/// original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: ShapeKind,
    rotation: Rotation,
    pub(crate) pos: Vec2,
}

impl Shape {
    /// A new shape in spawn orientation at [`SPAWN_POSITION`]
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            pos: SPAWN_POSITION,
        }
    }

    /// Same shape with its box origin at `pos`
    pub fn at(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    /// Same shape in the given rotation state
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn color(&self) -> Color {
        kind_color(self.kind)
    }

    pub fn layout(&self) -> &'static Layout {
        &layouts(self.kind)[self.rotation.index()]
    }

    /// The four occupied cells inside the 4x4 box, row-major.
    ///
    /// # Panics
    ///
    /// Panics if the layout table does not have exactly four occupied cells.
    pub fn get_local_block_positions(&self) -> [Vec2; 4] {
        let mut out = [Vec2::ZERO; 4];
        let mut n = 0;
        for (y, row) in self.layout().iter().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                if filled {
                    assert!(n < 4, "{:?} {:?} layout has more than 4 cells", self.kind, self.rotation);
                    out[n] = Vec2::new(x as i32, y as i32);
                    n += 1;
                }
            }
        }
        assert_eq!(n, 4, "{:?} {:?} layout has {} cells", self.kind, self.rotation, n);
        out
    }

    /// The four occupied cells in board coordinates
    pub fn get_absolute_block_positions(&self) -> [Vec2; 4] {
        self.get_local_block_positions().map(|p| p + self.pos)
    }

    /// Kick offsets to try, in order, when rotating from the current state.
    ///
    /// Offsets use y-up notation. The O piece never kicks.
    pub fn get_wallkicks(&self, direction: RotateDirection) -> &'static [Vec2] {
        let dir = match direction {
            RotateDirection::Left => 0,
            RotateDirection::Right => 1,
        };
        match kick_table(self.kind) {
            Some(table) => &table[self.rotation.index()][dir],
            None => &[],
        }
    }

    /// Copy translated by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            pos: self.pos + delta,
            ..*self
        }
    }

    /// Copy with the rotation state advanced one step (no kicks)
    pub fn rotated(&self, direction: RotateDirection) -> Self {
        Self {
            rotation: self.rotation.rotate(direction),
            ..*self
        }
    }
}
