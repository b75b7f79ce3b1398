//! Row elements and the pixmap table.
//!
//! Both enumerations are closed and small. Configuration for them lives in
//! fixed arrays indexed by [`ElementKind::index`] and [`PixmapKind::index`].

use servicelist_render::{Font, Pixmap, Rect};

use crate::error::{Result, ServiceListError};

/// A visual element of a complex-mode row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Channel number or list position.
    ServiceNumber,
    /// Icon drawn for marker rows.
    MarkerPixmap,
    /// Icon drawn for folder rows.
    FolderPixmap,
    /// Channel logo.
    PiconPixmap,
    /// Recording indicator icon.
    RecordServicePixmap,
    /// Elapsed fraction of the running event.
    ServiceEventProgressbar,
    /// Service display name.
    ServiceName,
    /// Start and end time of the running event.
    ServiceTime,
    /// Title of the running event.
    ServiceInfo,
    /// Title of the following event.
    NextEventInfo,
    /// Delivery system icon (satellite, terrestrial, cable, stream).
    ServiceTypePixmap,
}

impl ElementKind {
    pub const COUNT: usize = 11;

    pub const ALL: [ElementKind; Self::COUNT] = [
        Self::ServiceNumber,
        Self::MarkerPixmap,
        Self::FolderPixmap,
        Self::PiconPixmap,
        Self::RecordServicePixmap,
        Self::ServiceEventProgressbar,
        Self::ServiceName,
        Self::ServiceTime,
        Self::ServiceInfo,
        Self::NextEventInfo,
        Self::ServiceTypePixmap,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Convert a raw index from a scripting layer.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ServiceListError::InvalidElement(index))
    }
}

impl TryFrom<usize> for ElementKind {
    type Error = ServiceListError;

    fn try_from(index: usize) -> Result<Self> {
        Self::from_index(index)
    }
}

/// A slot of the pixmap table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixmapKind {
    DvbS,
    DvbT,
    DvbC,
    Stream,
    ServiceGroup,
    Folder,
    Marker,
    /// Placeholder drawn when no picon resolves.
    Picon,
    /// Icon for a service being recorded.
    RecordService,
    /// Fill texture of the progress bar.
    ServiceEventProgressbar,
    Crypto,
    Record,
}

impl PixmapKind {
    pub const COUNT: usize = 12;

    pub const ALL: [PixmapKind; Self::COUNT] = [
        Self::DvbS,
        Self::DvbT,
        Self::DvbC,
        Self::Stream,
        Self::ServiceGroup,
        Self::Folder,
        Self::Marker,
        Self::Picon,
        Self::RecordService,
        Self::ServiceEventProgressbar,
        Self::Crypto,
        Self::Record,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Convert a raw index from a scripting layer.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ServiceListError::InvalidPixmap(index))
    }
}

impl TryFrom<usize> for PixmapKind {
    type Error = ServiceListError;

    fn try_from(index: usize) -> Result<Self> {
        Self::from_index(index)
    }
}

/// Geometry and font configured for one element.
///
/// An element without a rect is not drawn. An element without a font uses
/// the style's row font.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSlot {
    pub rect: Option<Rect>,
    pub font: Option<Font>,
}

/// Per-element geometry and fonts.
#[derive(Debug, Clone)]
pub struct ElementTable {
    slots: [ElementSlot; ElementKind::COUNT],
}

impl Default for ElementTable {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| ElementSlot::default()),
        }
    }
}

impl ElementTable {
    #[inline]
    pub fn get(&self, kind: ElementKind) -> &ElementSlot {
        &self.slots[kind.index()]
    }

    #[inline]
    pub fn rect(&self, kind: ElementKind) -> Option<Rect> {
        self.slots[kind.index()].rect
    }

    #[inline]
    pub fn font(&self, kind: ElementKind) -> Option<&Font> {
        self.slots[kind.index()].font.as_ref()
    }

    pub fn set_rect(&mut self, kind: ElementKind, rect: Option<Rect>) {
        self.slots[kind.index()].rect = rect;
    }

    pub fn set_font(&mut self, kind: ElementKind, font: Option<Font>) {
        self.slots[kind.index()].font = font;
    }
}

/// The pixmap table.
#[derive(Debug, Clone)]
pub struct PixmapTable {
    pixmaps: [Option<Pixmap>; PixmapKind::COUNT],
}

impl Default for PixmapTable {
    fn default() -> Self {
        Self {
            pixmaps: std::array::from_fn(|_| None),
        }
    }
}

impl PixmapTable {
    #[inline]
    pub fn get(&self, kind: PixmapKind) -> Option<&Pixmap> {
        self.pixmaps[kind.index()].as_ref()
    }

    pub fn set(&mut self, kind: PixmapKind, pixmap: Option<Pixmap>) {
        self.pixmaps[kind.index()] = pixmap;
    }
}
