//! Capabilities the engine consumes from the rest of the receiver.
//!
//! The engine never talks to the service database, the EPG, the recorder or
//! the picon directory directly. Each is a narrow trait injected through
//! [`Providers`] when the content object is built, which keeps paint
//! deterministic under test: swap in stubs and a [`FixedClock`].
//!
//! Every query is synchronous and must not block. A provider that has
//! nothing to say returns `None`/empty and the engine degrades the affected
//! visual element to blank.

use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, Offset, TimeDelta, Utc};

use crate::reference::{DvbTriplet, ServiceReference};

/// Enumerates the children of a root reference.
pub trait ServiceListProvider {
    /// Direct children of `root` in provider order, or `None` if `root`
    /// cannot be listed.
    fn list(&self, root: &ServiceReference) -> Option<Vec<ServiceReference>>;

    /// Sort order applied by [`ServiceListContent::sort`](crate::ServiceListContent::sort).
    fn compare(&self, a: &ServiceReference, b: &ServiceReference) -> Ordering {
        a.name().to_lowercase().cmp(&b.name().to_lowercase())
    }

    /// Persist moving `service` to `position` inside `root`.
    ///
    /// Returns `false` when the list under `root` is not editable.
    fn move_service(
        &self,
        _root: &ServiceReference,
        _service: &ServiceReference,
        _position: usize,
    ) -> bool {
        false
    }
}

/// Static metadata for one service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceInfo {
    /// Display name.
    pub name: String,
    /// Whether the service can be tuned right now.
    pub playable: bool,
    /// Scrambled (conditional access) service.
    pub crypted: bool,
    /// Served by a fallback (remote) tuner.
    pub fallback: bool,
    /// Flagged as an advertisement channel.
    pub advertisement: bool,
}

impl ServiceInfo {
    /// A playable service with the given name.
    pub fn playable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            playable: true,
            ..Default::default()
        }
    }
}

/// Looks up static metadata for a reference.
pub trait ServiceInfoProvider {
    fn info(&self, service: &ServiceReference) -> Option<ServiceInfo>;
}

/// Which scheduled event to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSlot {
    /// The event airing now.
    Now,
    /// The event after it.
    Next,
}

/// One EPG event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInfo {
    pub title: String,
    pub start: DateTime<Utc>,
    pub duration: TimeDelta,
}

impl EventInfo {
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, duration: TimeDelta) -> Self {
        Self {
            title: title.into(),
            start,
            duration,
        }
    }

    /// End of the event.
    #[inline]
    pub fn end(&self) -> DateTime<Utc> {
        self.start + self.duration
    }

    /// Elapsed fraction of the event at `now`, in `[0, 1]`.
    ///
    /// `None` when the event is not running at `now` or has no duration.
    pub fn progress_at(&self, now: DateTime<Utc>) -> Option<f32> {
        let duration = self.duration.num_seconds();
        if duration <= 0 {
            return None;
        }
        let elapsed = (now - self.start).num_seconds();
        if elapsed < 0 || elapsed > duration {
            return None;
        }
        Some((elapsed as f64 / duration as f64) as f32)
    }

    /// Whole minutes left at `now`, rounded up. `None` when not running.
    pub fn remaining_minutes(&self, now: DateTime<Utc>) -> Option<i64> {
        self.progress_at(now)?;
        let secs = (self.end() - now).num_seconds();
        Some((secs + 59) / 60)
    }
}

/// Looks up the current and next event of a service.
pub trait EventInfoProvider {
    fn event(&self, service: &ServiceReference, slot: EventSlot) -> Option<EventInfo>;
}

/// Filter over the kinds of running recordings.
///
/// Values combine with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordType(u32);

impl RecordType {
    /// A recording written to disk.
    pub const REAL: Self = Self(0x01);
    /// A service streamed to a client.
    pub const STREAMING: Self = Self(0x02);
    /// A service held open without writing (timeshift, PiP).
    pub const PSEUDO: Self = Self(0x04);
    /// Recording of unknown origin.
    pub const UNKNOWN: Self = Self(0x08);
    /// Started by a timer.
    pub const FROM_TIMER: Self = Self(0x1000);
    /// Started as an instant recording.
    pub const FROM_INSTANT: Self = Self(0x2000);
    /// Started by an EPG refresh.
    pub const FROM_EPG_REFRESH: Self = Self(0x4000);
    /// Started by the special fast-zap jump.
    pub const FROM_SPECIAL_JUMP_FAST_ZAP: Self = Self(0x8000);
    /// Every kind of recording.
    pub const ANY: Self = Self(0xFF);

    /// Raw bit value.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether any bit of `other` is set in `self`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for RecordType {
    fn default() -> Self {
        Self::ANY
    }
}

impl std::ops::BitOr for RecordType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// The recording/navigation subsystem.
pub trait RecordingProvider {
    /// Services currently recorded under `filter`.
    fn recorded_services(&self, filter: RecordType) -> Vec<ServiceReference>;
}

/// Fields a picon lookup may use to build a file name.
#[derive(Debug, Clone, Copy)]
pub struct PiconKey<'a> {
    /// Provider path of the service.
    pub path: &'a str,
    /// Display name, for name-based picon packs.
    pub name: &'a str,
    /// DVB locator, when the service has one.
    pub dvb: Option<DvbTriplet>,
}

impl<'a> PiconKey<'a> {
    pub fn new(service: &'a ServiceReference, name: &'a str) -> Self {
        Self {
            path: service.path(),
            name,
            dvb: service.dvb(),
        }
    }
}

/// Maps service identity to a picon image file.
pub trait PiconResolver {
    fn resolve(&self, key: &PiconKey<'_>) -> Option<PathBuf>;
}

impl<F> PiconResolver for F
where
    F: Fn(&PiconKey<'_>) -> Option<PathBuf>,
{
    fn resolve(&self, key: &PiconKey<'_>) -> Option<PathBuf> {
        self(key)
    }
}

/// Wall clock used for event progress and time columns.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Offset event times are displayed in.
    fn display_offset(&self) -> FixedOffset {
        *Local::now().offset()
    }
}

/// The system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant, displaying in a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now: DateTime<Utc>,
    pub offset: FixedOffset,
}

impl FixedClock {
    /// Stopped at `now`, displaying UTC.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self {
            now,
            offset: Utc.fix(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn display_offset(&self) -> FixedOffset {
        self.offset
    }
}

/// A provider that knows nothing.
///
/// Default stand-in for every capability a host does not wire up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProvider;

impl ServiceListProvider for NullProvider {
    fn list(&self, _root: &ServiceReference) -> Option<Vec<ServiceReference>> {
        None
    }
}

impl ServiceInfoProvider for NullProvider {
    fn info(&self, _service: &ServiceReference) -> Option<ServiceInfo> {
        None
    }
}

impl EventInfoProvider for NullProvider {
    fn event(&self, _service: &ServiceReference, _slot: EventSlot) -> Option<EventInfo> {
        None
    }
}

impl RecordingProvider for NullProvider {
    fn recorded_services(&self, _filter: RecordType) -> Vec<ServiceReference> {
        Vec::new()
    }
}

/// The bundle of capabilities a content object is built with.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use servicelist::{NullProvider, Providers};
///
/// let providers = Providers::new(Arc::new(NullProvider));
/// assert!(providers.picons.is_none());
/// ```
#[derive(Clone)]
pub struct Providers {
    pub services: Arc<dyn ServiceListProvider>,
    pub info: Arc<dyn ServiceInfoProvider>,
    pub events: Arc<dyn EventInfoProvider>,
    pub recordings: Arc<dyn RecordingProvider>,
    pub picons: Option<Arc<dyn PiconResolver>>,
    pub clock: Arc<dyn Clock>,
}

impl Providers {
    /// Only a service list; everything else knows nothing and the clock is
    /// the system clock.
    pub fn new(services: Arc<dyn ServiceListProvider>) -> Self {
        Self {
            services,
            info: Arc::new(NullProvider),
            events: Arc::new(NullProvider),
            recordings: Arc::new(NullProvider),
            picons: None,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_info(mut self, info: Arc<dyn ServiceInfoProvider>) -> Self {
        self.info = info;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventInfoProvider>) -> Self {
        self.events = events;
        self
    }

    pub fn with_recordings(mut self, recordings: Arc<dyn RecordingProvider>) -> Self {
        self.recordings = recordings;
        self
    }

    pub fn with_picons(mut self, picons: Arc<dyn PiconResolver>) -> Self {
        self.picons = Some(picons);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
