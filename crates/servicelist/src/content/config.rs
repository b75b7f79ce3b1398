//! Visual configuration setters.
//!
//! Raw integer indices from a scripting layer go through
//! [`ElementKind::from_index`], [`PixmapKind::from_index`] and
//! [`ColorSlot::from_index`] first; the setters here take the typed kinds
//! and cannot fail.

use servicelist_core::logging::targets;
use servicelist_render::{Color, Font, Pixmap, Rect, Size};

use super::ServiceListContent;
use crate::error::Result;
use crate::visual::{
    ColorSlot, ElementKind, IconMode, ListOptions, NumberingMode, PixmapKind, ProgressViewMode,
    RecordIndicatorMode, VisualConfig, VisualMode,
};

impl ServiceListContent {
    /// The configuration read by [`describe_current`](Self::describe_current).
    pub fn visual(&self) -> &VisualConfig {
        &self.visual
    }

    pub fn set_visual_mode(&mut self, mode: VisualMode) {
        tracing::debug!(target: targets::CONFIG, ?mode, "visual mode");
        self.visual.mode = mode;
    }

    /// Place an element inside the row, or hide it with `None`.
    pub fn set_element_position(&mut self, kind: ElementKind, rect: Option<Rect>) {
        tracing::trace!(target: targets::CONFIG, ?kind, ?rect, "element position");
        self.visual.elements.set_rect(kind, rect);
    }

    /// Font of an element; `None` uses the style's row font.
    pub fn set_element_font(&mut self, kind: ElementKind, font: Option<Font>) {
        self.visual.elements.set_font(kind, font);
    }

    pub fn set_pixmap(&mut self, kind: PixmapKind, pixmap: Option<Pixmap>) {
        tracing::trace!(target: targets::CONFIG, ?kind, set = pixmap.is_some(), "pixmap");
        self.visual.pixmaps.set(kind, pixmap);
    }

    /// Load a pixmap table entry from an image file.
    pub fn load_pixmap(&mut self, kind: PixmapKind, path: impl AsRef<std::path::Path>) -> Result<()> {
        let pixmap = Pixmap::from_file(path)?;
        self.set_pixmap(kind, Some(pixmap));
        Ok(())
    }

    /// Set a color slot, or return it to the style default with `None`.
    pub fn set_color(&mut self, slot: ColorSlot, color: Option<Color>) {
        match color {
            Some(color) => self.visual.colors.set(slot, color),
            None => self.visual.colors.unset(slot),
        }
    }

    /// Replace every scalar option at once.
    pub fn set_options(&mut self, options: ListOptions) {
        tracing::debug!(target: targets::CONFIG, ?options, "options replaced");
        self.visual.options = options;
    }

    /// Parse TOML options and apply them.
    pub fn load_options(&mut self, text: &str) -> Result<()> {
        let options = ListOptions::from_toml_str(text)?;
        self.set_options(options);
        Ok(())
    }

    pub fn options(&self) -> &ListOptions {
        &self.visual.options
    }

    /// Row size as laid out by the widget.
    pub fn set_size(&mut self, size: Size) {
        self.visual.item_width = size.width;
        self.visual.options.item_height = size.height.max(0.0) as u32;
    }

    pub fn size_hint(&self) -> Size {
        self.visual.item_size()
    }

    pub fn item_height(&self) -> u32 {
        self.visual.options.item_height
    }

    pub fn set_item_height(&mut self, height: u32) {
        self.visual.options.item_height = height;
    }

    pub fn set_hide_number_marker(&mut self, hide: bool) {
        self.visual.options.hide_number_marker = hide;
    }

    pub fn set_show_two_lines(&mut self, two_lines: bool) {
        self.visual.options.show_two_lines = two_lines;
    }

    pub fn set_progress_view_mode(&mut self, mode: ProgressViewMode) {
        self.visual.options.progress_view_mode = mode;
    }

    pub fn set_progress_text_width(&mut self, width: u32) {
        self.visual.options.progress_text_width = width;
    }

    pub fn set_progress_unit(&mut self, unit: impl Into<String>) {
        self.visual.options.progress_unit = unit.into();
    }

    pub fn set_picon_downsize(&mut self, downsize: i32) {
        self.visual.options.picon_downsize = downsize;
    }

    pub fn set_picon_ratio(&mut self, ratio: u32) {
        self.visual.options.picon_ratio = ratio;
    }

    pub fn set_servicetype_icon_mode(&mut self, mode: IconMode) {
        self.visual.options.servicetype_icon_mode = mode;
    }

    pub fn set_crypto_icon_mode(&mut self, mode: IconMode) {
        self.visual.options.crypto_icon_mode = mode;
    }

    pub fn set_record_indicator_mode(&mut self, mode: RecordIndicatorMode) {
        self.visual.options.record_indicator_mode = mode;
    }

    pub fn set_column_width(&mut self, width: u32) {
        self.visual.options.column_width = width;
    }

    pub fn set_channel_numbers_visible(&mut self, visible: bool) {
        self.visual.options.channel_numbers_visible = visible;
    }

    pub fn set_progressbar_height(&mut self, height: u32) {
        self.visual.options.progressbar_height = height;
    }

    pub fn set_progressbar_border_width(&mut self, width: u32) {
        self.visual.options.progressbar_border_width = width;
    }

    pub fn set_nonplayable_margins(&mut self, margins: u32) {
        self.visual.options.nonplayable_margins = margins;
    }

    pub fn set_items_distances(&mut self, distance: u32) {
        self.visual.options.items_distances = distance;
    }

    pub fn set_numbering_mode(&mut self, mode: NumberingMode) {
        self.visual.options.numbering_mode = mode;
    }

    pub fn set_time_format(&mut self, format: impl Into<String>) {
        self.visual.options.time_format = format.into();
    }
}
