//! Visual descriptor engine.
//!
//! [`ServiceListContent::describe_current`] turns the element at the cursor
//! into a flat list of [`VisualElement`]s: what to draw, where inside the
//! row, and on which [`Layer`]. Live data (names, events, recording state,
//! picons) is pulled from the providers on every call. Anything a provider
//! cannot answer leaves its element out; nothing here fails.
//!
//! Geometry is relative to the row's top-left corner. The paint adapter
//! translates it to the row's position on screen.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, Utc};
use servicelist_core::logging::{span_names, targets};
use servicelist_core::PerfSpan;
use servicelist_render::{Color, Font, ListboxStyle, Pixmap, Point, Rect, Size, TextAlign};

use crate::content::ServiceListContent;
use crate::provider::{EventInfo, EventSlot, PiconKey, RecordType, ServiceInfo};
use crate::reference::{Delivery, ServiceKind, ServiceReference};
use crate::visual::{
    ColorSlot, ElementKind, IconMode, NumberingMode, PixmapKind, ProgressViewMode,
    RecordIndicatorMode, VisualMode,
};

/// Paint order of a row, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Icon,
    Text,
    Progress,
    Border,
}

/// What an element draws.
#[derive(Debug, Clone)]
pub enum Visual {
    Fill(Color),
    Pixmap(Pixmap),
    Text {
        text: String,
        font: Font,
        color: Color,
        align: TextAlign,
    },
    Stroke {
        color: Color,
        width: f32,
    },
}

/// One drawable piece of a row.
#[derive(Debug, Clone)]
pub struct VisualElement {
    /// The configured element this belongs to; `None` for the row
    /// background.
    pub kind: Option<ElementKind>,
    pub layer: Layer,
    pub rect: Rect,
    pub visual: Visual,
}

impl VisualElement {
    /// The text drawn by this element, if any.
    pub fn text(&self) -> Option<&str> {
        match &self.visual {
            Visual::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// The color drawn by this element, if it has one.
    pub fn color(&self) -> Option<Color> {
        match &self.visual {
            Visual::Fill(color) => Some(*color),
            Visual::Text { color, .. } | Visual::Stroke { color, .. } => Some(*color),
            Visual::Pixmap(_) => None,
        }
    }
}

/// Everything needed to paint the row at the cursor.
#[derive(Debug, Clone)]
pub struct RowDescriptor {
    pub size: Size,
    pub selected: bool,
    /// Elements in the order they were computed. Paint sorts them by layer.
    pub elements: Vec<VisualElement>,
}

impl RowDescriptor {
    /// Elements belonging to `kind`.
    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = &VisualElement> {
        self.elements.iter().filter(move |e| e.kind == Some(kind))
    }

    /// First text drawn by `kind`.
    pub fn text_of(&self, kind: ElementKind) -> Option<&str> {
        self.elements_of(kind).find_map(VisualElement::text)
    }

    /// Every text in computation order.
    pub fn texts(&self) -> Vec<&str> {
        self.elements.iter().filter_map(VisualElement::text).collect()
    }

    /// Elements sorted back to front. Elements on one layer keep their
    /// relative order.
    pub fn z_ordered(&self) -> Vec<&VisualElement> {
        let mut ordered: Vec<_> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.layer);
        ordered
    }
}

/// Center `pixmap`, scaled down to fit, inside `area`.
fn fit_centered(pixmap: &Pixmap, area: Rect) -> Option<(Rect, Pixmap)> {
    if area.is_empty() {
        return None;
    }
    let scaled = pixmap.scaled_to_fit(area.size);
    let size = scaled.size();
    let center = area.center();
    let rect = Rect::from_origin_size(
        Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
        size,
    );
    Some((rect, scaled))
}

/// Format `time` with a strftime pattern, falling back to `%H:%M` when the
/// pattern is invalid.
fn format_time(time: DateTime<Utc>, offset: FixedOffset, pattern: &str) -> String {
    let local = time.with_timezone(&offset);
    let mut out = String::new();
    if write!(out, "{}", local.format(pattern)).is_err() {
        tracing::debug!(target: targets::DESCRIPTOR, pattern, "invalid time format");
        out.clear();
        let _ = write!(out, "{}", local.format("%H:%M"));
    }
    out
}

/// Per-row state shared by the element builders.
struct RowBuilder<'a> {
    content: &'a ServiceListContent,
    style: &'a dyn ListboxStyle,
    service: &'a ServiceReference,
    info: Option<ServiceInfo>,
    name: String,
    selected: bool,
    marked: bool,
    playable: bool,
    foreground: Color,
    now: Option<EventInfo>,
    next: Option<EventInfo>,
    elements: Vec<VisualElement>,
}

impl<'a> RowBuilder<'a> {
    fn new(content: &'a ServiceListContent, style: &'a dyn ListboxStyle, selected: bool) -> Option<Self> {
        let service = content.get_current()?;
        let info = content.providers.info.info(service);
        let name = info
            .as_ref()
            .map(|info| info.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| service.name().to_string());
        let marked = content.move_mode || content.is_marked(service);
        let playable = !service.is_playable_kind()
            || content.ignore.as_ref() == Some(service)
            || info.as_ref().is_none_or(|info| info.playable);

        let mut builder = Self {
            content,
            style,
            service,
            info,
            name,
            selected,
            marked,
            playable,
            foreground: style.foreground(selected),
            now: None,
            next: None,
            elements: Vec::new(),
        };
        builder.foreground = builder.row_foreground();
        if service.is_playable_kind() && content.visual.mode == VisualMode::Complex {
            builder.now = content.providers.events.event(service, EventSlot::Now);
            builder.next = content.providers.events.event(service, EventSlot::Next);
        }
        Some(builder)
    }

    fn color(&self, slot: ColorSlot) -> Option<Color> {
        self.content.visual.colors.get(slot)
    }

    /// `unselected` or `selected` depending on the row state.
    fn pick(&self, unselected: ColorSlot, selected: ColorSlot) -> Option<Color> {
        self.color(if self.selected { selected } else { unselected })
    }

    fn pixmap(&self, kind: PixmapKind) -> Option<&'a Pixmap> {
        self.content.visual.pixmaps.get(kind)
    }

    fn font(&self, kind: ElementKind) -> Font {
        self.content
            .visual
            .elements
            .font(kind)
            .cloned()
            .unwrap_or_else(|| self.style.font().clone())
    }

    fn is_recorded(&self, filter: RecordType) -> bool {
        self.service.is_playable_kind() && self.content.check_service_is_recorded(self.service, filter)
    }

    fn recording_foreground(&self) -> Option<Color> {
        let colors = &self.content.visual.colors;
        let color_mode =
            self.content.visual.options.record_indicator_mode == RecordIndicatorMode::Color;
        let real = colors.is_set(ColorSlot::ServiceRecorded)
            || (color_mode && colors.is_set(ColorSlot::ServiceRecordingColor));
        if real && self.is_recorded(RecordType::REAL) {
            let recording = if color_mode { self.color(ColorSlot::ServiceRecordingColor) } else { None };
            return recording.or_else(|| self.color(ColorSlot::ServiceRecorded));
        }
        if colors.is_set(ColorSlot::ServiceStreamed) && self.is_recorded(RecordType::STREAMING) {
            return self.color(ColorSlot::ServiceStreamed);
        }
        if colors.is_set(ColorSlot::ServicePseudoRecorded) && self.is_recorded(RecordType::PSEUDO) {
            return self.color(ColorSlot::ServicePseudoRecorded);
        }
        None
    }

    /// Foreground for the name and number.
    ///
    /// Marked beats unavailable, which beats recording, fallback tuner and
    /// advertisement, in that order. Unset slots fall through to the style.
    fn row_foreground(&self) -> Color {
        let base = self.style.foreground(self.selected);
        let info = self.info.as_ref();
        let chosen = if self.marked {
            self.pick(ColorSlot::MarkedForeground, ColorSlot::MarkedForegroundSelected)
        } else if !self.playable {
            self.color(ColorSlot::ServiceNotAvail)
        } else if let Some(color) = self.recording_foreground() {
            Some(color)
        } else if info.is_some_and(|info| info.fallback) {
            self.pick(ColorSlot::ServiceItemFallback, ColorSlot::ServiceItemFallbackSelected)
        } else if info.is_some_and(|info| info.advertisement) {
            self.color(ColorSlot::ServiceAdvertismentColor)
        } else {
            None
        };
        chosen.unwrap_or(base)
    }

    fn event_foreground(&self) -> Color {
        if !self.playable {
            if let Some(color) = self.color(ColorSlot::ServiceNotAvail) {
                return color;
            }
        }
        let fallback = self.info.as_ref().is_some_and(|info| info.fallback);
        let tuned = if fallback {
            self.pick(
                ColorSlot::EventForegroundFallback,
                ColorSlot::EventForegroundSelectedFallback,
            )
        } else {
            None
        };
        tuned
            .or_else(|| self.pick(ColorSlot::EventForeground, ColorSlot::EventForegroundSelected))
            .unwrap_or(self.foreground)
    }

    fn push(&mut self, kind: Option<ElementKind>, layer: Layer, rect: Rect, visual: Visual) {
        if rect.is_empty() {
            return;
        }
        self.elements.push(VisualElement {
            kind,
            layer,
            rect,
            visual,
        });
    }

    fn push_text(&mut self, kind: ElementKind, rect: Rect, text: &str, color: Color, align: TextAlign) {
        let font = self.font(kind);
        let text = font.elide(text, rect.width());
        if text.is_empty() {
            return;
        }
        self.push(
            Some(kind),
            Layer::Text,
            rect,
            Visual::Text {
                text,
                font,
                color,
                align,
            },
        );
    }

    fn push_pixmap(&mut self, kind: ElementKind, layer: Layer, area: Rect, pixmap: &Pixmap) {
        if let Some((rect, scaled)) = fit_centered(pixmap, area) {
            self.push(Some(kind), layer, rect, Visual::Pixmap(scaled));
        }
    }

    fn background(&mut self, row: Rect) {
        let style = self.style;
        let mut rect = row;
        if self.selected && !self.playable {
            rect = row.deflate(self.content.visual.options.nonplayable_margins as f32);
        }
        if let Some(pixmap) = style.background_pixmap(self.selected) {
            self.push(None, Layer::Background, rect, Visual::Pixmap(pixmap.clone()));
        }
        let color = if self.marked {
            self.pick(ColorSlot::MarkedBackground, ColorSlot::MarkedBackgroundSelected)
        } else {
            None
        }
        .unwrap_or_else(|| style.background(self.selected));
        if color.is_visible() {
            self.push(None, Layer::Background, rect, Visual::Fill(color));
        }
    }

    fn simple(&mut self, row: Rect) {
        let name = self.name.clone();
        let font = self.style.font().clone();
        let text = font.elide(&name, row.width());
        if !text.is_empty() {
            self.push(
                Some(ElementKind::ServiceName),
                Layer::Text,
                row,
                Visual::Text {
                    text,
                    font,
                    color: self.foreground,
                    align: TextAlign::Left,
                },
            );
        }
    }

    fn complex(&mut self) {
        let content = self.content;
        let elements = &content.visual.elements;
        for kind in ElementKind::ALL {
            let Some(rect) = elements.rect(kind) else {
                continue;
            };
            match kind {
                ElementKind::ServiceNumber => self.number(rect),
                ElementKind::MarkerPixmap => {
                    if self.service.is_marker() {
                        if let Some(pixmap) = self.pixmap(PixmapKind::Marker) {
                            self.push_pixmap(kind, Layer::Icon, rect, pixmap);
                        }
                    }
                }
                ElementKind::FolderPixmap => {
                    let pixmap = match self.service.kind() {
                        ServiceKind::Folder => self.pixmap(PixmapKind::Folder),
                        ServiceKind::Group => self.pixmap(PixmapKind::ServiceGroup),
                        _ => None,
                    };
                    if let Some(pixmap) = pixmap {
                        self.push_pixmap(kind, Layer::Icon, rect, pixmap);
                    }
                }
                ElementKind::PiconPixmap => self.picon(rect),
                ElementKind::RecordServicePixmap => {
                    if content.visual.options.record_indicator_mode == RecordIndicatorMode::Icon {
                        if let Some(pixmap) = self.pixmap(PixmapKind::RecordService) {
                            if self.is_recorded(RecordType::ANY) {
                                self.push_pixmap(kind, Layer::Icon, rect, pixmap);
                            }
                        }
                    }
                }
                ElementKind::ServiceEventProgressbar => self.progress(rect),
                ElementKind::ServiceName => self.name_column(rect),
                ElementKind::ServiceTime => self.time(rect),
                ElementKind::ServiceInfo => {
                    if let Some(title) = self.now.as_ref().map(|event| event.title.clone()) {
                        let color = self.event_foreground();
                        self.push_text(kind, rect, &title, color, TextAlign::Left);
                    }
                }
                ElementKind::NextEventInfo => {
                    if let Some(title) = self.next.as_ref().map(|event| event.title.clone()) {
                        let color = self
                            .pick(
                                ColorSlot::ServiceDescriptionColor,
                                ColorSlot::ServiceDescriptionColorSelected,
                            )
                            .unwrap_or(self.foreground);
                        self.push_text(kind, rect, &title, color, TextAlign::Left);
                    }
                }
                ElementKind::ServiceTypePixmap => {
                    if content.visual.options.servicetype_icon_mode == IconMode::Off {
                        if let Some(pixmap) = self.type_pixmap() {
                            self.push_pixmap(kind, Layer::Icon, rect, pixmap);
                        }
                    }
                }
            }
        }
    }

    fn number(&mut self, rect: Rect) {
        let content = self.content;
        let options = &content.visual.options;
        if !options.channel_numbers_visible {
            return;
        }
        let shown = match self.service.kind() {
            ServiceKind::Marker => self.service.flags().numbered_marker && !options.hide_number_marker,
            ServiceKind::Folder | ServiceKind::Ignore => false,
            ServiceKind::Service | ServiceKind::Group => true,
        };
        if !shown {
            return;
        }
        let number = match options.numbering_mode {
            NumberingMode::Channel => self.service.number(),
            NumberingMode::Position => {
                let row = content.cursor_resolve(content.cursor_get());
                u32::try_from(row + 1).ok()
            }
        };
        if let Some(number) = number {
            let color = self.foreground;
            self.push_text(ElementKind::ServiceNumber, rect, &number.to_string(), color, TextAlign::Right);
        }
    }

    fn type_pixmap(&self) -> Option<&'a Pixmap> {
        if self.service.is_group() {
            return self.pixmap(PixmapKind::ServiceGroup);
        }
        let kind = match self.service.delivery()? {
            Delivery::Satellite => PixmapKind::DvbS,
            Delivery::Terrestrial => PixmapKind::DvbT,
            Delivery::Cable => PixmapKind::DvbC,
            Delivery::Stream => PixmapKind::Stream,
        };
        self.pixmap(kind)
    }

    fn picon(&mut self, rect: Rect) {
        if !self.service.is_playable_kind() {
            return;
        }
        let content = self.content;
        let options = &content.visual.options;
        let resolved = content.providers.picons.as_ref().and_then(|resolver| {
            let key = PiconKey::new(self.service, &self.name);
            let path = resolver.resolve(&key);
            if path.is_none() {
                tracing::debug!(target: targets::PICON, service = %self.service, "no picon");
            }
            path
        });
        let pixmap = resolved
            .and_then(|path| content.picons.load(&path))
            .or_else(|| self.pixmap(PixmapKind::Picon).cloned());
        let Some(pixmap) = pixmap else {
            return;
        };

        let area = rect.deflate(options.picon_downsize as f32);
        let pixmap = if options.picon_ratio > 0 {
            pixmap.cropped_to_ratio(options.picon_ratio as f32 / 100.0)
        } else {
            pixmap
        };
        self.push_pixmap(ElementKind::PiconPixmap, Layer::Icon, area, &pixmap);
    }

    fn progress(&mut self, rect: Rect) {
        let content = self.content;
        let options = &content.visual.options;
        let now = content.providers.clock.now();
        let Some(event) = self.now.clone() else {
            return;
        };
        let Some(ratio) = event.progress_at(now) else {
            tracing::trace!(target: targets::DESCRIPTOR, service = %self.service, "no running event");
            return;
        };
        let remaining = event.remaining_minutes(now);
        let bar_color = self
            .pick(
                ColorSlot::ServiceEventProgressbarColor,
                ColorSlot::ServiceEventProgressbarColorSelected,
            )
            .unwrap_or(self.foreground);
        // Textual modes draw into a right-aligned slice of the reserved width.
        let text_rect = match options.progress_text_width as f32 {
            w if w > 0.0 && w < rect.width() => {
                Rect::new(rect.right() - w, rect.top(), w, rect.height())
            }
            _ => rect,
        };

        match options.progress_view_mode {
            ProgressViewMode::Off => {}
            ProgressViewMode::Percent => {
                let text = format!("{}%", (ratio * 100.0).round() as i32);
                self.push_text(
                    ElementKind::ServiceEventProgressbar,
                    text_rect,
                    &text,
                    bar_color,
                    TextAlign::Right,
                );
            }
            ProgressViewMode::Minutes => {
                let Some(minutes) = remaining else {
                    return;
                };
                let text = format!("+{minutes} {}", options.progress_unit);
                self.push_text(
                    ElementKind::ServiceEventProgressbar,
                    text_rect,
                    text.trim_end(),
                    bar_color,
                    TextAlign::Right,
                );
            }
            ProgressViewMode::Bar => {
                let height = match options.progressbar_height {
                    0 => rect.height(),
                    h => (h as f32).min(rect.height()),
                };
                let bar = Rect::new(
                    rect.left(),
                    rect.top() + (rect.height() - height) / 2.0,
                    rect.width(),
                    height,
                );
                let border = options.progressbar_border_width as f32;
                let inner = bar.deflate(border);
                let filled = inner.with_width(inner.width() * ratio.clamp(0.0, 1.0));

                match self.pixmap(PixmapKind::ServiceEventProgressbar) {
                    Some(pixmap) => self.push(
                        Some(ElementKind::ServiceEventProgressbar),
                        Layer::Progress,
                        filled,
                        Visual::Pixmap(pixmap.clone()),
                    ),
                    None => self.push(
                        Some(ElementKind::ServiceEventProgressbar),
                        Layer::Progress,
                        filled,
                        Visual::Fill(bar_color),
                    ),
                }

                if border > 0.0 {
                    let color = self
                        .pick(
                            ColorSlot::ServiceEventProgressbarBorderColor,
                            ColorSlot::ServiceEventProgressbarBorderColorSelected,
                        )
                        .or_else(|| {
                            self.pick(
                                ColorSlot::EventBorderForeground,
                                ColorSlot::EventBorderForegroundSelected,
                            )
                        })
                        .unwrap_or(self.foreground);
                    self.push(
                        Some(ElementKind::ServiceEventProgressbar),
                        Layer::Border,
                        bar,
                        Visual::Stroke {
                            color,
                            width: border,
                        },
                    );
                }
            }
        }
    }

    fn time(&mut self, rect: Rect) {
        let content = self.content;
        let Some(event) = self.now.as_ref() else {
            return;
        };
        let offset = content.providers.clock.display_offset();
        let pattern = &content.visual.options.time_format;
        let text = format!(
            "{} - {}",
            format_time(event.start, offset, pattern),
            format_time(event.end(), offset, pattern)
        );
        let color = self.event_foreground();
        self.push_text(ElementKind::ServiceTime, rect, &text, color, TextAlign::Left);
    }

    /// Inline icons requested for one side of the name.
    fn inline_icons(&self, side: IconMode) -> Vec<&'a Pixmap> {
        let options = &self.content.visual.options;
        let elements = &self.content.visual.elements;
        let mut icons = Vec::new();
        if side == IconMode::BeforeName
            && options.record_indicator_mode == RecordIndicatorMode::Icon
            && elements.rect(ElementKind::RecordServicePixmap).is_none()
        {
            if let Some(pixmap) = self.pixmap(PixmapKind::Record) {
                if self.is_recorded(RecordType::ANY) {
                    icons.push(pixmap);
                }
            }
        }
        if options.servicetype_icon_mode == side {
            icons.extend(self.type_pixmap());
        }
        if options.crypto_icon_mode == side && self.info.as_ref().is_some_and(|info| info.crypted) {
            icons.extend(self.pixmap(PixmapKind::Crypto));
        }
        icons
    }

    /// Place `icons` left to right from the start of `area`; returns what
    /// is left of it.
    fn place_icons(&mut self, icons: &[&Pixmap], mut area: Rect) -> Rect {
        let gap = self.content.visual.options.items_distances as f32;
        for icon in icons {
            let width = area.height() * icon.width() as f32 / icon.height().max(1) as f32;
            let (left, rest) = area.split_left(width.min(area.width()), gap);
            self.push_pixmap(ElementKind::ServiceName, Layer::Icon, left, icon);
            area = rest;
        }
        area
    }

    fn name_column(&mut self, rect: Rect) {
        let content = self.content;
        let options = &content.visual.options;
        let two_lines = options.show_two_lines;
        let column_width = options.column_width as f32;
        let gap = options.items_distances as f32;
        let event_inline = content.visual.elements.rect(ElementKind::ServiceInfo).is_none();

        let (line, second) = if two_lines {
            let (top, bottom) = rect.split_rows();
            (top, Some(bottom))
        } else {
            (rect, None)
        };

        let decorated = self.service.is_playable_kind();
        let before = if decorated { self.inline_icons(IconMode::BeforeName) } else { Vec::new() };
        let area = self.place_icons(&before, line);

        let font = self.font(ElementKind::ServiceName);
        let name_width = if column_width > 0.0 {
            column_width
        } else {
            font.measure(&self.name)
        }
        .min(area.width());
        let (name_rect, rest) = area.split_left(name_width, gap);
        let name = self.name.clone();
        let color = self.foreground;
        self.push_text(ElementKind::ServiceName, name_rect, &name, color, TextAlign::Left);

        if !decorated {
            return;
        }
        let after = self.inline_icons(IconMode::AfterName);
        let rest = self.place_icons(&after, rest);

        if !event_inline {
            return;
        }
        let Some(title) = self.now.as_ref().map(|event| event.title.clone()) else {
            return;
        };
        let event_rect = second.unwrap_or(rest);
        let color = self.event_foreground();
        self.push_text(ElementKind::ServiceInfo, event_rect, &title, color, TextAlign::Left);
    }
}

impl ServiceListContent {
    /// Compute what the row at the cursor looks like.
    ///
    /// `None` when the cursor is at the end sentinel. Does not modify the
    /// content; the only cached state is the picon cache.
    pub fn describe_current(&self, style: &dyn ListboxStyle, selected: bool) -> Option<RowDescriptor> {
        let _span = PerfSpan::new(span_names::DESCRIBE);
        let row = self.visual.row_rect();
        let mut builder = RowBuilder::new(self, style, selected)?;

        builder.background(row);
        match self.visual.mode {
            VisualMode::Simple => builder.simple(row),
            VisualMode::Complex => builder.complex(),
        }

        tracing::trace!(
            target: targets::DESCRIPTOR,
            service = %builder.service,
            elements = builder.elements.len(),
            selected,
            "row described"
        );
        Some(RowDescriptor {
            size: row.size,
            selected,
            elements: builder.elements,
        })
    }
}
