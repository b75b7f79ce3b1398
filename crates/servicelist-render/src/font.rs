//! Font descriptors and text fitting.
//!
//! Rasterization belongs to the host's drawing surface. The engine only needs
//! to know roughly how wide a string is so it can elide text to an element's
//! width before handing it over; [`Font::measure`] provides that estimate
//! from the font's average glyph advance.

use unicode_segmentation::UnicodeSegmentation;

/// Ellipsis appended to elided text.
pub const ELLIPSIS: &str = "...";

/// Ratio of average glyph advance to point size used when no explicit
/// advance is configured.
const DEFAULT_ADVANCE_RATIO: f32 = 0.55;

/// Horizontal alignment of text inside its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A font as named by a skin: family plus pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Family name as the drawing surface knows it.
    pub family: String,
    /// Pixel size.
    pub size: f32,
    /// Average glyph advance in pixels; `None` derives it from `size`.
    pub advance: Option<f32>,
}

impl Font {
    /// Create a font with the given family and pixel size.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            advance: None,
        }
    }

    /// Override the average glyph advance used by [`measure`](Self::measure).
    pub fn with_advance(mut self, advance: f32) -> Self {
        self.advance = Some(advance);
        self
    }

    /// Average width of one grapheme.
    #[inline]
    pub fn average_advance(&self) -> f32 {
        self.advance.unwrap_or(self.size * DEFAULT_ADVANCE_RATIO)
    }

    /// Estimated rendered width of `text`.
    pub fn measure(&self, text: &str) -> f32 {
        text.graphemes(true).count() as f32 * self.average_advance()
    }

    /// Fit `text` into `width` pixels, eliding the tail with [`ELLIPSIS`].
    ///
    /// Text that already fits is returned unchanged. If not even the
    /// ellipsis fits, the result is empty.
    pub fn elide(&self, text: &str, width: f32) -> String {
        if self.measure(text) <= width {
            return text.to_string();
        }
        let advance = self.average_advance();
        if advance <= 0.0 {
            return text.to_string();
        }
        let slots = (width / advance).floor() as usize;
        let ellipsis = ELLIPSIS.len();
        if slots < ellipsis {
            return String::new();
        }
        let mut out: String = text.graphemes(true).take(slots - ellipsis).collect();
        out.truncate(out.trim_end().len());
        out.push_str(ELLIPSIS);
        out
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("Regular", 20.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono() -> Font {
        Font::new("Mono", 10.0).with_advance(10.0)
    }

    #[test]
    fn test_measure_counts_graphemes() {
        let font = mono();
        assert_eq!(font.measure("abc"), 30.0);
        // "e" + combining acute accent is one grapheme
        assert_eq!(font.measure("e\u{301}"), 10.0);
    }

    #[test]
    fn test_elide_keeps_fitting_text() {
        assert_eq!(mono().elide("Das Erste", 200.0), "Das Erste");
    }

    #[test]
    fn test_elide_truncates_with_ellipsis() {
        assert_eq!(mono().elide("Das Erste HD", 80.0), "Das E...");
    }

    #[test]
    fn test_elide_drops_trailing_space_before_ellipsis() {
        assert_eq!(mono().elide("ab cdef", 60.0), "ab...");
    }

    #[test]
    fn test_elide_too_narrow() {
        assert_eq!(mono().elide("ZDF", 20.0), "");
    }
}
