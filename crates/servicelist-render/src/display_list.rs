//! A recording [`Painter`].
//!
//! `DisplayList` stores every primitive it receives, already clipped to the
//! active clip, in call order. Headless hosts can replay it; tests assert on
//! it.

use crate::font::{Font, TextAlign};
use crate::painter::Painter;
use crate::pixmap::Pixmap;
use crate::types::{Color, Rect};

/// One recorded draw primitive.
#[derive(Debug, Clone)]
pub enum PaintCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
    },
    Pixmap {
        rect: Rect,
        pixmap: Pixmap,
    },
    Text {
        rect: Rect,
        text: String,
        font: Font,
        color: Color,
        align: TextAlign,
    },
}

impl PaintCommand {
    /// The (clipped) rectangle the command covers.
    pub fn rect(&self) -> Rect {
        match self {
            Self::FillRect { rect, .. }
            | Self::StrokeRect { rect, .. }
            | Self::Pixmap { rect, .. }
            | Self::Text { rect, .. } => *rect,
        }
    }
}

/// Recording painter with a clip stack.
#[derive(Debug, Default)]
pub struct DisplayList {
    commands: Vec<PaintCommand>,
    clip: Option<Rect>,
    clip_stack: Vec<Option<Rect>>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in call order.
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Text of every recorded text command, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                PaintCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Drop recorded commands and reset the clip. Keeps capacity.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip = None;
        self.clip_stack.clear();
    }

    /// Clip `rect`; `None` means fully clipped away.
    fn clipped(&self, rect: Rect) -> Option<Rect> {
        match self.clip {
            Some(clip) => clip.intersect(&rect),
            None if rect.is_empty() => None,
            None => Some(rect),
        }
    }
}

impl Painter for DisplayList {
    fn save(&mut self) {
        self.clip_stack.push(self.clip);
    }

    fn restore(&mut self) {
        if let Some(clip) = self.clip_stack.pop() {
            self.clip = clip;
        }
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.clip = Some(match self.clip {
            Some(current) => current.intersect(&rect).unwrap_or(Rect::ZERO),
            None => rect,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if let Some(rect) = self.clipped(rect) {
            self.commands.push(PaintCommand::FillRect { rect, color });
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        if let Some(rect) = self.clipped(rect) {
            self.commands.push(PaintCommand::StrokeRect { rect, color, width });
        }
    }

    fn draw_pixmap(&mut self, rect: Rect, pixmap: &Pixmap) {
        if let Some(rect) = self.clipped(rect) {
            self.commands.push(PaintCommand::Pixmap {
                rect,
                pixmap: pixmap.clone(),
            });
        }
    }

    fn draw_text(&mut self, rect: Rect, text: &str, font: &Font, color: Color, align: TextAlign) {
        if text.is_empty() {
            return;
        }
        if let Some(rect) = self.clipped(rect) {
            self.commands.push(PaintCommand::Text {
                rect,
                text: text.to_string(),
                font: font.clone(),
                color,
                align,
            });
        }
    }
}
