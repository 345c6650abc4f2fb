//! GameView: maps a `core::GameSnapshot` and the frame's UI widgets into a
//! terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::shape::kind_color;
use crate::core::{GameSnapshot, ShapeSnapshot, Widget, WidgetKind};
use crate::core::ui::FontSize;
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::{Color, Rect, ShapeKind, BOARD_COLUMNS, BOARD_ROWS, HIDDEN_ROWS, VISIBLE_ROWS};

/// Narrowest and widest board cell, in terminal columns
pub const MIN_CELL_W: u16 = 1;
pub const MAX_CELL_W: u16 = 4;

const PANEL_BG: Color = Color::new(0, 0, 0);
const BOARD_BG: Color = Color::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// The viewport in the coordinate space UI widgets use
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(MIN_CELL_W, MAX_CELL_W),
            cell_h: cell_h.max(1),
        }
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    /// Apply a window size request; the cell width stays within 1..=4.
    pub fn scale(&mut self, delta: i32) {
        let w = (self.cell_w as i32 + delta).clamp(MIN_CELL_W as i32, MAX_CELL_W as i32);
        self.cell_w = w as u16;
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// `snap` is `None` when no game is on screen (menu). Widgets are drawn
    /// last, on top of everything else.
    pub fn render_into(
        &self,
        snap: Option<&GameSnapshot>,
        widgets: &[Widget],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        if let Some(snap) = snap {
            self.draw_game(fb, snap, viewport);
        }
        for widget in widgets {
            draw_widget(fb, widget);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: Option<&GameSnapshot>, widgets: &[Widget], viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, widgets, viewport, &mut fb);
        fb
    }

    /// Top-left corner of the board frame for `viewport`
    pub fn board_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_COLUMNS as u16 * self.cell_w + 2,
            VISIBLE_ROWS as u16 * self.cell_h + 2,
        )
    }

    fn draw_game(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.board_origin(viewport);

        let border = CellStyle {
            fg: Color::new(200, 200, 200),
            bg: PANEL_BG,
            bold: false,
            dim: false,
        };
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells; the hidden spawn rows are never drawn.
        for y in HIDDEN_ROWS..BOARD_ROWS {
            for x in 0..BOARD_COLUMNS {
                match snap.board[y][x] {
                    Some(color) => self.draw_block(fb, start_x, start_y, x as i32, y as i32, color),
                    None => self.draw_empty_cell(fb, start_x, start_y, x as i32, y as i32),
                }
            }
        }

        if let Some(shadow) = &snap.shadow {
            let style = CellStyle {
                fg: Color::new(140, 140, 140),
                bg: BOARD_BG,
                bold: false,
                dim: true,
            };
            for p in shadow.cells {
                self.fill_cell(fb, start_x, start_y, p.x, p.y, '░', style);
            }
        }

        if let Some(current) = &snap.current {
            self.draw_shape(fb, start_x, start_y, current);
        }

        self.draw_side_panel(fb, snap, viewport, start_x.saturating_add(frame_w).saturating_add(2), start_y);
    }

    fn draw_shape(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, shape: &ShapeSnapshot) {
        for p in shape.cells {
            self.draw_block(fb, start_x, start_y, p.x, p.y, shape.color);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: i32, y: i32) {
        let style = CellStyle {
            fg: Color::new(90, 90, 100),
            bg: BOARD_BG,
            bold: false,
            dim: true,
        };
        self.fill_cell(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: i32, y: i32, color: Color) {
        let style = CellStyle {
            fg: color,
            bg: BOARD_BG,
            bold: true,
            dim: false,
        };
        self.fill_cell(fb, start_x, start_y, x, y, '█', style);
    }

    /// Fill one board cell given in board coordinates. Cells in the hidden
    /// rows or outside the grid are skipped.
    #[allow(clippy::too_many_arguments)]
    fn fill_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: i32, y: i32, ch: char, style: CellStyle) {
        let hidden = HIDDEN_ROWS as i32;
        if x < 0 || x >= BOARD_COLUMNS as i32 || y < hidden || y >= BOARD_ROWS as i32 {
            return;
        }
        let px = start_x + 1 + x as u16 * self.cell_w;
        let py = start_y + 1 + (y - hidden) as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, panel_x: u16, start_y: u16) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            fg: Color::new(220, 220, 220),
            bg: PANEL_BG,
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Color::new(200, 200, 200),
            bg: PANEL_BG,
            bold: false,
            dim: false,
        };

        let mut y = start_y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("HIGH", snap.high_score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        match snap.hold {
            Some(kind) => {
                let style = CellStyle {
                    dim: !snap.can_hold,
                    ..piece_style(kind)
                };
                fb.put_char(panel_x, y, kind.letter(), style);
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for &kind in snap.preview.iter().take(5) {
            if y >= viewport.height {
                break;
            }
            fb.put_char(panel_x, y, kind.letter(), piece_style(kind));
            y = y.saturating_add(1);
        }
    }
}

fn piece_style(kind: ShapeKind) -> CellStyle {
    CellStyle {
        fg: kind_color(kind),
        bg: PANEL_BG,
        bold: true,
        dim: false,
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_widget(fb: &mut FrameBuffer, widget: &Widget) {
    if widget.rect.y < 0 || widget.rect.y >= fb.height() as i32 {
        return;
    }
    let style = match widget.kind {
        WidgetKind::Label => CellStyle {
            bold: widget.font == FontSize::Heading,
            ..CellStyle::default()
        },
        WidgetKind::Button => CellStyle {
            fg: Color::new(255, 255, 255),
            bg: Color::new(50, 50, 80),
            bold: true,
            dim: false,
        },
        WidgetKind::Spinbox { .. } => CellStyle {
            fg: Color::new(240, 220, 80),
            ..CellStyle::default()
        },
    };
    // Text hanging off the left edge is clipped, not dropped.
    let x = widget.rect.x;
    let skip = x.min(0).unsigned_abs() as usize;
    for (i, ch) in widget.text.chars().skip(skip).enumerate() {
        let cx = x.max(0) + i as i32;
        if cx >= fb.width() as i32 {
            break;
        }
        fb.put_char(cx as u16, widget.rect.y as u16, ch, style);
    }
}
