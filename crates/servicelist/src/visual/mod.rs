//! Visual configuration of list rows.
//!
//! Owned by the content object and mutated by the widget between paints:
//! the visual mode, the per-element geometry and fonts, the pixmap table,
//! the color table and the scalar [`ListOptions`].

mod color;
mod element;
mod options;

pub use color::{ColorSlot, ColorTable};
pub use element::{ElementKind, ElementSlot, ElementTable, PixmapKind, PixmapTable};
pub use options::{IconMode, ListOptions, NumberingMode, ProgressViewMode, RecordIndicatorMode};

use servicelist_render::{Point, Rect, Size};

/// How much of a row is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualMode {
    /// Background and service name only.
    #[default]
    Simple,
    /// Every configured element.
    Complex,
}

/// Everything the descriptor engine reads at paint time.
#[derive(Debug, Clone, Default)]
pub struct VisualConfig {
    pub mode: VisualMode,
    pub elements: ElementTable,
    pub pixmaps: PixmapTable,
    pub colors: ColorTable,
    /// Row height lives in `options.item_height`.
    pub options: ListOptions,
    pub item_width: f32,
}

impl VisualConfig {
    /// Width and height of one row.
    pub fn item_size(&self) -> Size {
        Size::new(self.item_width, self.options.item_height as f32)
    }

    /// The rect of a row at the origin.
    pub fn row_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.item_size())
    }
}
