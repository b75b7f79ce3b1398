//! Stub providers shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use parking_lot::Mutex;
use servicelist::{
    EventInfo, EventInfoProvider, EventSlot, FixedClock, PiconKey, PiconResolver, Providers,
    RecordType, RecordingProvider, ServiceInfo, ServiceInfoProvider, ServiceListContent,
    ServiceListProvider, ServiceReference,
};

/// Route engine logs to the test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("servicelist=trace")
        .try_init();
}

pub fn svc(name: &str) -> ServiceReference {
    ServiceReference::service(format!("1:0:1:{name}:0:0:0:0:0:0:"), name)
}

pub fn favourites() -> ServiceReference {
    ServiceReference::folder("1:7:1:0:0:0:0:0:0:0:", "Favourites")
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap()
}

/// In-memory service database keyed by root path.
#[derive(Default)]
pub struct StubServices {
    pub roots: HashMap<String, Vec<ServiceReference>>,
    pub moves: Mutex<Vec<(ServiceReference, usize)>>,
}

impl StubServices {
    pub fn with_root(root: &ServiceReference, entries: Vec<ServiceReference>) -> Self {
        let mut roots = HashMap::new();
        roots.insert(root.path().to_string(), entries);
        Self {
            roots,
            ..Default::default()
        }
    }
}

impl ServiceListProvider for StubServices {
    fn list(&self, root: &ServiceReference) -> Option<Vec<ServiceReference>> {
        self.roots.get(root.path()).cloned()
    }

    fn move_service(&self, _root: &ServiceReference, service: &ServiceReference, position: usize) -> bool {
        self.moves.lock().push((service.clone(), position));
        true
    }
}

#[derive(Default)]
pub struct StubInfo(pub HashMap<ServiceReference, ServiceInfo>);

impl ServiceInfoProvider for StubInfo {
    fn info(&self, service: &ServiceReference) -> Option<ServiceInfo> {
        self.0.get(service).cloned()
    }
}

#[derive(Default)]
pub struct StubEvents(pub HashMap<(ServiceReference, bool), EventInfo>);

impl StubEvents {
    pub fn now(mut self, service: &ServiceReference, title: &str, start: DateTime<Utc>, secs: i64) -> Self {
        self.0.insert(
            (service.clone(), true),
            EventInfo::new(title, start, TimeDelta::seconds(secs)),
        );
        self
    }

    pub fn next(mut self, service: &ServiceReference, title: &str, start: DateTime<Utc>, secs: i64) -> Self {
        self.0.insert(
            (service.clone(), false),
            EventInfo::new(title, start, TimeDelta::seconds(secs)),
        );
        self
    }
}

impl EventInfoProvider for StubEvents {
    fn event(&self, service: &ServiceReference, slot: EventSlot) -> Option<EventInfo> {
        self.0.get(&(service.clone(), slot == EventSlot::Now)).cloned()
    }
}

/// Recordings as (service, kind) pairs.
#[derive(Default)]
pub struct StubRecordings(pub Vec<(ServiceReference, RecordType)>);

impl RecordingProvider for StubRecordings {
    fn recorded_services(&self, filter: RecordType) -> Vec<ServiceReference> {
        self.0
            .iter()
            .filter(|(_, kind)| filter.intersects(*kind))
            .map(|(service, _)| service.clone())
            .collect()
    }
}

/// Resolves picons as `<dir>/<name>.png`.
pub struct DirPicons(pub PathBuf);

impl PiconResolver for DirPicons {
    fn resolve(&self, key: &PiconKey<'_>) -> Option<PathBuf> {
        let path = self.0.join(format!("{}.png", key.name));
        path.exists().then_some(path)
    }
}

/// Content over `entries` under the favourites root, clock stopped at
/// `t0() + 15 min`.
pub fn content_with(entries: Vec<ServiceReference>, configure: impl FnOnce(Providers) -> Providers) -> ServiceListContent {
    init_tracing();
    let services = Arc::new(StubServices::with_root(&favourites(), entries));
    let providers = Providers::new(services)
        .with_clock(Arc::new(FixedClock::utc(t0() + TimeDelta::minutes(15))));
    let mut content = ServiceListContent::new(configure(providers));
    content.set_root(favourites(), false);
    content
}

pub fn content(names: &[&str]) -> ServiceListContent {
    content_with(names.iter().map(|name| svc(name)).collect(), |p| p)
}
