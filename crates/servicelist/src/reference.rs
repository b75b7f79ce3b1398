//! Service references: the value type every list entry is made of.
//!
//! A [`ServiceReference`] identifies a service, a folder (bouquet), a marker
//! (section heading), a group (alternatives) or a placeholder. References are
//! small and immutable once built. Identity is the kind, path, locator and
//! flags: the display name and the channel number belong to one bouquet's
//! listing and take no part in equality, hashing or ordering. That total
//! order is what the marked-set uses for membership; list sorting asks the
//! service list provider instead.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// What kind of entry a reference names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ServiceKind {
    /// A playable (tunable or streamable) service.
    #[default]
    Service,
    /// A folder/bouquet whose children form another list.
    Folder,
    /// A section heading inside a list.
    Marker,
    /// A group of alternative services.
    Group,
    /// A listed placeholder that never takes part in playability checks.
    Ignore,
}

/// Per-entry flags carried alongside the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ServiceFlags {
    /// Listed but skipped when counting cursor steps and visible rows.
    pub invisible: bool,
    /// A marker that shows a channel number.
    pub numbered_marker: bool,
}

/// DVB locator fields used to identify a broadcast service.
///
/// These are what picon file names are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DvbTriplet {
    /// Service type (TV, radio, HD, ...).
    pub service_type: u16,
    pub service_id: u16,
    pub transport_stream_id: u16,
    pub original_network_id: u16,
    /// DVB namespace; the upper 16 bits carry the orbital position or the
    /// terrestrial/cable marker.
    pub namespace: u32,
}

/// Namespace high word used for terrestrial services.
pub const NAMESPACE_TERRESTRIAL: u32 = 0xEEEE;
/// Namespace high word used for cable services.
pub const NAMESPACE_CABLE: u32 = 0xFFFF;

/// How a service is delivered, used to pick its type icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Satellite,
    Terrestrial,
    Cable,
    Stream,
}

/// An immutable reference to a list entry.
///
/// # Example
///
/// ```
/// use servicelist::{ServiceKind, ServiceReference};
///
/// let heading = ServiceReference::marker("News");
/// let ard = ServiceReference::service("1:0:19:283D:3FB:1:C00000:0:0:0:", "Das Erste HD")
///     .with_number(1);
///
/// assert_eq!(heading.kind(), ServiceKind::Marker);
/// assert_eq!(ard.number(), Some(1));
/// assert_ne!(heading, ard);
///
/// // The same service listed under another bouquet.
/// let listed = ServiceReference::service("1:0:19:283D:3FB:1:C00000:0:0:0:", "Das Erste")
///     .with_number(12);
/// assert_eq!(listed, ard);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ServiceReference {
    path: String,
    kind: ServiceKind,
    dvb: Option<DvbTriplet>,
    number: Option<u32>,
    name: String,
    flags: ServiceFlags,
}

impl ServiceReference {
    /// Create a reference of any kind.
    pub fn new(kind: ServiceKind, path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            name: name.into(),
            ..Default::default()
        }
    }

    /// A playable service.
    pub fn service(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ServiceKind::Service, path, name)
    }

    /// A folder (bouquet) entry.
    pub fn folder(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ServiceKind::Folder, path, name)
    }

    /// A section marker. Markers are identified by their text.
    pub fn marker(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(ServiceKind::Marker, format!("marker:{name}"), name)
    }

    /// A group of alternatives.
    pub fn group(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ServiceKind::Group, path, name)
    }

    /// Attach a channel number.
    pub fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }

    /// Attach DVB locator fields.
    pub fn with_dvb(mut self, dvb: DvbTriplet) -> Self {
        self.dvb = Some(dvb);
        self
    }

    /// Replace the flags.
    pub fn with_flags(mut self, flags: ServiceFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the entry invisible.
    pub fn invisible(mut self) -> Self {
        self.flags.invisible = true;
        self
    }

    #[inline]
    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Provider-specific identifier.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name stored with the reference; may be empty when the metadata
    /// provider is the source of truth.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    #[inline]
    pub fn dvb(&self) -> Option<DvbTriplet> {
        self.dvb
    }

    #[inline]
    pub fn flags(&self) -> ServiceFlags {
        self.flags
    }

    #[inline]
    pub fn is_marker(&self) -> bool {
        self.kind == ServiceKind::Marker
    }

    #[inline]
    pub fn is_folder(&self) -> bool {
        self.kind == ServiceKind::Folder
    }

    #[inline]
    pub fn is_group(&self) -> bool {
        self.kind == ServiceKind::Group
    }

    #[inline]
    pub fn is_invisible(&self) -> bool {
        self.flags.invisible
    }

    /// Services and groups; the entries that can be tuned and carry events.
    #[inline]
    pub fn is_playable_kind(&self) -> bool {
        matches!(self.kind, ServiceKind::Service | ServiceKind::Group)
    }

    /// Delivery system, derived from the path and DVB namespace.
    ///
    /// Returns `None` for non-service entries and services without a
    /// locator that are not streams.
    pub fn delivery(&self) -> Option<Delivery> {
        if self.kind != ServiceKind::Service {
            return None;
        }
        if self.path.contains("://") || self.path.contains("%3a//") {
            return Some(Delivery::Stream);
        }
        let dvb = self.dvb?;
        Some(match dvb.namespace >> 16 {
            NAMESPACE_TERRESTRIAL => Delivery::Terrestrial,
            NAMESPACE_CABLE => Delivery::Cable,
            _ => Delivery::Satellite,
        })
    }
}

impl ServiceReference {
    fn identity(&self) -> (ServiceKind, &str, Option<DvbTriplet>, ServiceFlags) {
        (self.kind, &self.path, self.dvb, self.flags)
    }
}

impl PartialEq for ServiceReference {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for ServiceReference {}

impl Hash for ServiceReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for ServiceReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ServiceReference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl fmt::Display for ServiceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{} ({})", self.name, self.path)
        }
    }
}
