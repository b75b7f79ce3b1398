//! Paint adapter: replays a row descriptor on a [`Painter`].

use servicelist_core::logging::{span_names, targets};
use servicelist_core::PerfSpan;
use servicelist_render::{ListboxStyle, Painter, Point, Rect};

use crate::content::ServiceListContent;
use crate::descriptor::{RowDescriptor, Visual};

/// Draw `row` with its top-left corner at `offset`, back to front, clipped
/// to the row.
pub fn paint_row(painter: &mut dyn Painter, row: &RowDescriptor, offset: Point) {
    let bounds = Rect::from_origin_size(offset, row.size);
    painter.save();
    painter.clip_rect(bounds);
    for element in row.z_ordered() {
        let rect = element.rect.translate(offset);
        match &element.visual {
            Visual::Fill(color) => painter.fill_rect(rect, *color),
            Visual::Pixmap(pixmap) => painter.draw_pixmap(rect, pixmap),
            Visual::Text {
                text,
                font,
                color,
                align,
            } => painter.draw_text(rect, text, font, *color, *align),
            Visual::Stroke { color, width } => painter.stroke_rect(rect, *color, *width),
        }
    }
    painter.restore();
}

impl ServiceListContent {
    /// Paint the row at the cursor.
    ///
    /// The widget calls this once per visible row, moving the cursor in
    /// between. Nothing is drawn at the end sentinel. Only draws; the list,
    /// the cursor and the marked set are left alone.
    pub fn paint(&self, painter: &mut dyn Painter, style: &dyn ListboxStyle, offset: Point, selected: bool) {
        let _span = PerfSpan::new(span_names::PAINT);
        let Some(row) = self.describe_current(style, selected) else {
            tracing::trace!(target: targets::PAINT, "nothing to paint at end of list");
            return;
        };
        paint_row(painter, &row, offset);
    }
}
