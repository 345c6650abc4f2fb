//! Immediate-mode UI context
//!
//! Widgets are declared every frame between [`UiContext::begin_frame`] calls.
//! Declaring a button or spinbox also answers whether it was clicked this
//! frame, so screen code reads top to bottom with no retained widget state.
//! The declarations are kept for the renderer, which draws them as-is.
//!
//! Coordinates are terminal cells, the same space mouse clicks arrive in.

use crate::types::{Rect, Vec2};

/// Which point of the widget `pos` refers to, horizontally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    #[default]
    Body,
    /// Letter-spaced
    Heading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Label,
    Button,
    Spinbox { value: u32, min: u32, max: u32 },
}

/// One declared widget, laid out and ready to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub kind: WidgetKind,
    /// Display text, already formatted for `font`
    pub text: String,
    pub rect: Rect,
    pub font: FontSize,
}

/// Per-frame widget declarations plus the clicks they are tested against
#[derive(Debug, Clone, Default)]
pub struct UiContext {
    viewport: Rect,
    clicks: Vec<Vec2>,
    widgets: Vec<Widget>,
}

fn display_text(text: &str, font: FontSize) -> String {
    match font {
        FontSize::Body => text.to_string(),
        FontSize::Heading => {
            let mut out = String::with_capacity(text.len() * 2);
            for (i, ch) in text.chars().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push(ch);
            }
            out
        }
    }
}

fn place(pos: Vec2, width: i32, align: Align) -> Rect {
    let x = match align {
        Align::Left => pos.x,
        Align::Center => pos.x - width / 2,
        Align::Right => pos.x - width,
    };
    Rect::new(x, pos.y, width, 1)
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget last frame's widgets and take this frame's clicks.
    pub fn begin_frame(&mut self, viewport: Rect, clicks: &[Vec2]) {
        self.viewport = viewport;
        self.clicks.clear();
        self.clicks.extend_from_slice(clicks);
        self.widgets.clear();
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    fn clicked(&self, rect: Rect) -> bool {
        self.clicks.iter().any(|&p| rect.contains(p))
    }

    fn push(&mut self, kind: WidgetKind, text: String, rect: Rect, font: FontSize) {
        self.widgets.push(Widget {
            kind,
            text,
            rect,
            font,
        });
    }

    pub fn label(&mut self, text: &str, pos: Vec2, align: Align, font: FontSize) {
        let text = display_text(text, font);
        let rect = place(pos, text.chars().count() as i32, align);
        self.push(WidgetKind::Label, text, rect, font);
    }

    /// Declare a button. Returns true when it was clicked this frame.
    pub fn button(&mut self, text: &str, pos: Vec2, align: Align, font: FontSize) -> bool {
        let text = format!("[ {} ]", display_text(text, font));
        let rect = place(pos, text.chars().count() as i32, align);
        let clicked = self.clicked(rect);
        self.push(WidgetKind::Button, text, rect, font);
        clicked
    }

    /// Declare a `label < value >` spinbox and return the value after this
    /// frame's clicks on its arrows, clamped to `min..=max`.
    #[allow(clippy::too_many_arguments)]
    pub fn spinbox(
        &mut self,
        label: &str,
        value: u32,
        min: u32,
        max: u32,
        pos: Vec2,
        align: Align,
        font: FontSize,
    ) -> u32 {
        let prefix = format!("{}  ", display_text(label, font));
        let body = format!("< {value:>2} >");
        let prefix_w = prefix.chars().count() as i32;
        let body_w = body.chars().count() as i32;
        let rect = place(pos, prefix_w + body_w, align);

        let dec = Rect::new(rect.x + prefix_w, rect.y, 1, 1);
        let inc = Rect::new(rect.x + rect.w - 1, rect.y, 1, 1);
        let mut next = value;
        for &p in &self.clicks {
            if dec.contains(p) {
                next = next.saturating_sub(1);
            } else if inc.contains(p) {
                next = next.saturating_add(1);
            }
        }
        let next = next.clamp(min, max);

        self.push(
            WidgetKind::Spinbox {
                value: next,
                min,
                max,
            },
            format!("{prefix}< {next:>2} >"),
            rect,
            font,
        );
        next
    }
}
