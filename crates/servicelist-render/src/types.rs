//! Basic geometry and color types.
//!
//! Coordinates are logical pixels relative to the listbox, `f32` throughout.

use bytemuck::{Pod, Zeroable};

/// A position inside or relative to a row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a row, element or pixmap.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `true` when nothing drawn in this size would be visible.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// An axis-aligned rectangle: top-left `origin` plus `size`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Self = Self::from_origin_size(Point::ZERO, Size::ZERO);

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::from_origin_size(Point::new(x, y), Size::new(width, height))
    }

    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left() + self.width()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top() + self.height()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.left() + self.width() * 0.5,
            self.top() + self.height() * 0.5,
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// The overlapping part of `self` and `other`, `None` if they only
    /// touch or are disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let (x0, y0) = (self.left().max(other.left()), self.top().max(other.top()));
        let (x1, y1) = (
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        );
        (x0 < x1 && y0 < y1).then(|| Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Shrink by `amount` on every side; a negative amount grows.
    ///
    /// The size never goes negative.
    #[inline]
    pub fn deflate(&self, amount: f32) -> Rect {
        Rect::new(
            self.left() + amount,
            self.top() + amount,
            (self.width() - 2.0 * amount).max(0.0),
            (self.height() - 2.0 * amount).max(0.0),
        )
    }

    /// Shift by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect::from_origin_size(Point::new(self.left() + dx, self.top() + dy), self.size)
    }

    /// Shift by a row offset.
    #[inline]
    pub fn translate(&self, by: Point) -> Rect {
        self.offset(by.x, by.y)
    }

    /// Same origin, new width.
    #[inline]
    pub fn with_width(&self, width: f32) -> Rect {
        Rect::new(self.left(), self.top(), width.max(0.0), self.height())
    }

    /// Split off the left `width` pixels; returns `(left, rest)`.
    ///
    /// `gap` pixels between the two parts are dropped.
    pub fn split_left(&self, width: f32, gap: f32) -> (Rect, Rect) {
        let width = width.clamp(0.0, self.width());
        let rest_x = (self.left() + width + gap).min(self.right());
        (
            self.with_width(width),
            Rect::new(rest_x, self.top(), self.right() - rest_x, self.height()),
        )
    }

    /// Split into `(top, bottom)` halves.
    pub fn split_rows(&self) -> (Rect, Rect) {
        let half = self.height() * 0.5;
        (
            Rect::new(self.left(), self.top(), self.width(), half),
            Rect::new(self.left(), self.top() + half, self.width(), half),
        )
    }
}

/// An RGBA color, premultiplied, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::from_rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::from_rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::from_rgb(1.0, 1.0, 0.0);
    pub const GRAY: Self = Self::from_rgb(0.5, 0.5, 0.5);

    /// Premultiplied components as given.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque color from 8-bit channels.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, u8::MAX)
    }

    /// Straight (non-premultiplied) 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let unit = |c: u8| f32::from(c) / 255.0;
        let alpha = unit(a);
        Self::new(unit(r) * alpha, unit(g) * alpha, unit(b) * alpha, alpha)
    }

    /// A skin color value, `0xTTRRGGBB`.
    ///
    /// Skins store transparency rather than opacity in the top byte, so
    /// `0x00` there means fully opaque.
    pub fn from_argb_skin(value: u32) -> Self {
        let [t, r, g, b] = value.to_be_bytes();
        Self::from_rgba8(r, g, b, u8::MAX - t)
    }

    /// Whether the color would draw anything.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.a > 0.0
    }
}
