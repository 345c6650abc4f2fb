//! Terminal output.
//!
//! [`TerminalRenderer`] owns raw mode, the alternate screen and mouse capture.
//! Each frame it compares the new framebuffer with the one it flushed last and
//! writes only the changed spans of each row; the first frame, and any frame
//! after a resize or [`TerminalRenderer::invalidate`], repaints everything.
//!
//! The `encode_*` functions only build escape sequences into a byte buffer, so
//! they can be tested without a terminal.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    queue,
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal,
};

use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::Color;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently shows; `None` forces a repaint
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen with mouse reporting on.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        queue!(
            self.out,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.flush()
    }

    /// Undo [`enter`](Self::enter). Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        queue!(
            self.out,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        )?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (after a resize, for instance).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Flush `fb` to the terminal and take ownership of it as the shown frame.
    ///
    /// On return `fb` holds the previously shown buffer, ready to be drawn
    /// into again, so no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let mut spare = match self.shown.take() {
            Some(shown) if shown.width() == fb.width() && shown.height() == fb.height() => {
                encode_diff_into(&shown, fb, &mut self.out)?;
                shown
            }
            shown => {
                encode_full_into(fb, &mut self.out)?;
                let mut spare = shown.unwrap_or_else(|| FrameBuffer::new(0, 0));
                spare.resize(fb.width(), fb.height());
                spare
            }
        };
        self.flush()?;

        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Queues cells, emitting style escapes only where the style changes.
struct SpanWriter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> SpanWriter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        queue!(self.out, cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn cells(&mut self, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            self.set_style(cell.style)?;
            queue!(self.out, Print(cell.ch))?;
        }
        Ok(())
    }

    fn set_style(&mut self, next: CellStyle) -> Result<()> {
        let prev = match self.style {
            Some(prev) if prev == next => return Ok(()),
            other => other,
        };

        // Dropping bold or dim needs a full attribute reset, which also
        // clears the colors.
        let reset = prev.is_some_and(|p| (p.bold && !next.bold) || (p.dim && !next.dim));
        if reset {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        let fresh = prev.is_none() || reset;

        if fresh || prev.is_some_and(|p| p.fg != next.fg) {
            queue!(self.out, SetForegroundColor(term_color(next.fg)))?;
        }
        if fresh || prev.is_some_and(|p| p.bg != next.bg) {
            queue!(self.out, SetBackgroundColor(term_color(next.bg)))?;
        }
        if next.bold && (fresh || prev.is_some_and(|p| !p.bold)) {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if next.dim && (fresh || prev.is_some_and(|p| !p.dim)) {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }

        self.style = Some(next);
        Ok(())
    }

    fn finish(self) -> Result<()> {
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

fn rows(fb: &FrameBuffer) -> impl Iterator<Item = (u16, &[Cell])> {
    let width = fb.width().max(1) as usize;
    (0..fb.height()).zip(fb.cells().chunks(width))
}

/// Encode a repaint of the whole screen into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All))?;
    let mut w = SpanWriter::new(out);
    for (y, row) in rows(fb) {
        w.move_to(0, y)?;
        w.cells(row)?;
    }
    w.finish()
}

/// Encode only the cells of `next` that differ from `prev` into `out`.
///
/// Both buffers must have the same size.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut w = SpanWriter::new(out);
    for ((y, old), (_, new)) in rows(prev).zip(rows(next)) {
        for (start, end) in changed_spans(old, new) {
            w.move_to(start as u16, y)?;
            w.cells(&new[start..end])?;
        }
    }
    w.finish()
}

/// Half-open column ranges where two rows differ, adjacent changes merged
fn changed_spans<'a>(old: &'a [Cell], new: &'a [Cell]) -> impl Iterator<Item = (usize, usize)> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < new.len() && old.get(x) == Some(&new[x]) {
            x += 1;
        }
        if x >= new.len() {
            return None;
        }
        let start = x;
        while x < new.len() && old.get(x) != Some(&new[x]) {
            x += 1;
        }
        Some((start, x))
    })
}
