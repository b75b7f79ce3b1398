//! Drawing vocabulary for the service list engine.
//!
//! This crate knows nothing about services. It defines what a row can be
//! made of and how it reaches a screen:
//!
//! - [`Point`], [`Size`], [`Rect`], [`Color`]: geometry and color
//! - [`Font`]: skin font descriptor with width estimation and elision
//! - [`Pixmap`]: decoded images with fit/crop scaling
//! - [`Painter`]: the draw-surface trait a host implements
//! - [`ListboxStyle`]: the active style's default colors and font
//! - [`DisplayList`]: a recording painter for headless use and tests
//!
//! # Example
//!
//! ```
//! use servicelist_render::{Color, DisplayList, Painter, Rect};
//!
//! let mut painter = DisplayList::new();
//! painter.save();
//! painter.clip_rect(Rect::new(0.0, 0.0, 100.0, 30.0));
//! painter.fill_rect(Rect::new(0.0, 0.0, 400.0, 30.0), Color::BLUE);
//! painter.restore();
//!
//! assert_eq!(painter.commands()[0].rect().width(), 100.0);
//! ```

mod display_list;
mod error;
mod font;
mod painter;
mod pixmap;
mod types;

pub use display_list::{DisplayList, PaintCommand};
pub use error::{RenderError, RenderResult};
pub use font::{Font, TextAlign, ELLIPSIS};
pub use painter::{DefaultStyle, ListboxStyle, Painter, StyleColor};
pub use pixmap::Pixmap;
pub use types::{Color, Point, Rect, Size};
