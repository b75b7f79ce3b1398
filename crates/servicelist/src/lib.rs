//! Content and navigation engine for set-top-box service lists.
//!
//! `servicelist` is the model behind a scrollable list of broadcast
//! services, folders and markers. It keeps the entries of the active root
//! in order, moves a cursor over them, tracks a marked set for multi-select
//! and drag reordering, and computes what each row looks like from live
//! service, event, recording and picon data.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use servicelist::prelude::*;
//!
//! struct Favourites;
//!
//! impl ServiceListProvider for Favourites {
//!     fn list(&self, _root: &ServiceReference) -> Option<Vec<ServiceReference>> {
//!         Some(vec![
//!             ServiceReference::marker("Public"),
//!             ServiceReference::service("1:0:19:283D:3FB:1:C00000:0:0:0:", "Das Erste HD"),
//!             ServiceReference::service("1:0:19:2B66:3F3:1:C00000:0:0:0:", "ZDF HD"),
//!         ])
//!     }
//! }
//!
//! let mut content = ServiceListContent::new(Providers::new(Arc::new(Favourites)));
//! content.set_root(ServiceReference::folder("1:7:1:", "Favourites"), false);
//! content.set_size(Size::new(400.0, 30.0));
//!
//! assert_eq!(content.get_next_beginning_with_char('z'), Some(2));
//!
//! let mut painter = DisplayList::new();
//! content.cursor_set(1);
//! content.paint(&mut painter, &DefaultStyle::default(), Point::new(0.0, 30.0), true);
//! assert_eq!(painter.texts(), vec!["Das Erste HD"]);
//! ```
//!
//! # Architecture
//!
//! - [`ServiceReference`]: the immutable entry value type
//! - [`provider`]: traits for the service database, EPG, recorder, picon
//!   lookup and clock, bundled in [`Providers`]
//! - [`ServiceListContent`]: list store, cursor, snapshots, marked set and
//!   visual configuration
//! - [`descriptor`]: per-row [`RowDescriptor`] computation
//! - [`paint`]: replays a descriptor on a [`Painter`](servicelist_render::Painter)

pub mod content;
pub mod descriptor;
pub mod error;
pub mod marked;
pub mod paint;
pub mod picon;
pub mod provider;
pub mod reference;
pub mod visual;

pub use content::{ContentSignals, CursorSnapshot, ServiceListContent, SnapshotKey};
pub use descriptor::{Layer, RowDescriptor, Visual, VisualElement};
pub use error::{Result, ServiceListError};
pub use marked::MarkedSet;
pub use picon::PiconCache;
pub use provider::{
    Clock, EventInfo, EventInfoProvider, EventSlot, FixedClock, NullProvider, PiconKey,
    PiconResolver, Providers, RecordType, RecordingProvider, ServiceInfo, ServiceInfoProvider,
    ServiceListProvider, SystemClock,
};
pub use reference::{
    Delivery, DvbTriplet, ServiceFlags, ServiceKind, ServiceReference, NAMESPACE_CABLE,
    NAMESPACE_TERRESTRIAL,
};
pub use visual::{
    ColorSlot, ColorTable, ElementKind, ElementSlot, ElementTable, IconMode, ListOptions,
    NumberingMode, PixmapKind, PixmapTable, ProgressViewMode, RecordIndicatorMode, VisualConfig,
    VisualMode,
};

pub use servicelist_core::{ConnectionId, Signal};
pub use servicelist_render as render;

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        ColorSlot, ElementKind, EventInfo, EventInfoProvider, EventSlot, ListOptions, PixmapKind,
        Providers, RecordType, ServiceInfo, ServiceInfoProvider, ServiceKind, ServiceListContent,
        ServiceListProvider, ServiceReference, VisualMode,
    };
    pub use servicelist_render::{
        Color, DefaultStyle, DisplayList, Font, ListboxStyle, Painter, Pixmap, Point, Rect, Size,
    };
}
