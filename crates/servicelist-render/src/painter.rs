//! The draw-surface and style seams.
//!
//! [`Painter`] is the narrow drawing interface the engine paints against; a
//! host wraps its own surface (framebuffer, GPU renderer, LCD) in it.
//! [`ListboxStyle`] exposes the active window style's defaults, which the
//! engine falls back to whenever a color slot or font was not configured.
//!
//! # State Stack
//!
//! Painters keep a clip stack. Every `clip_rect` intersects with the current
//! clip and is undone by the matching `restore`:
//!
//! ```ignore
//! painter.save();
//! painter.clip_rect(row_rect);
//! painter.fill_rect(row_rect, Color::BLUE);
//! painter.restore();
//! ```

use crate::font::{Font, TextAlign};
use crate::pixmap::Pixmap;
use crate::types::{Color, Rect};

/// Primitive 2D drawing operations.
pub trait Painter {
    /// Push the current clip onto the state stack.
    fn save(&mut self);

    /// Pop the state stack. A `restore` without `save` is ignored.
    fn restore(&mut self);

    /// Intersect the current clip with `rect`.
    fn clip_rect(&mut self, rect: Rect);

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw the outline of a rectangle, `width` pixels wide, inside `rect`.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Blit a pixmap with its top-left corner at `rect.origin`.
    ///
    /// Pixels outside `rect` are not drawn.
    fn draw_pixmap(&mut self, rect: Rect, pixmap: &Pixmap);

    /// Draw a single line of text vertically centered in `rect`.
    fn draw_text(&mut self, rect: Rect, text: &str, font: &Font, color: Color, align: TextAlign);
}

/// Colors a window style provides for list rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleColor {
    Background,
    BackgroundSelected,
    Foreground,
    ForegroundSelected,
}

/// The active window style, read at paint time.
pub trait ListboxStyle {
    /// Default color for a role.
    fn color(&self, role: StyleColor) -> Color;

    /// Default row font.
    fn font(&self) -> &Font;

    /// Optional background pixmap for unselected/selected rows.
    fn background_pixmap(&self, _selected: bool) -> Option<&Pixmap> {
        None
    }

    /// Background color for a row in the given selection state.
    fn background(&self, selected: bool) -> Color {
        self.color(if selected {
            StyleColor::BackgroundSelected
        } else {
            StyleColor::Background
        })
    }

    /// Foreground color for a row in the given selection state.
    fn foreground(&self, selected: bool) -> Color {
        self.color(if selected {
            StyleColor::ForegroundSelected
        } else {
            StyleColor::Foreground
        })
    }
}

/// A plain style with fixed colors and one font.
#[derive(Debug, Clone)]
pub struct DefaultStyle {
    pub background: Color,
    pub background_selected: Color,
    pub foreground: Color,
    pub foreground_selected: Color,
    pub font: Font,
    pub selection_pixmap: Option<Pixmap>,
}

impl Default for DefaultStyle {
    fn default() -> Self {
        Self {
            background: Color::from_rgb8(16, 16, 32),
            background_selected: Color::from_rgb8(51, 102, 204),
            foreground: Color::from_rgb8(230, 230, 230),
            foreground_selected: Color::WHITE,
            font: Font::default(),
            selection_pixmap: None,
        }
    }
}

impl ListboxStyle for DefaultStyle {
    fn color(&self, role: StyleColor) -> Color {
        match role {
            StyleColor::Background => self.background,
            StyleColor::BackgroundSelected => self.background_selected,
            StyleColor::Foreground => self.foreground,
            StyleColor::ForegroundSelected => self.foreground_selected,
        }
    }

    fn font(&self) -> &Font {
        &self.font
    }

    fn background_pixmap(&self, selected: bool) -> Option<&Pixmap> {
        if selected {
            self.selection_pixmap.as_ref()
        } else {
            None
        }
    }
}
