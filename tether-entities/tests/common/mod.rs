#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tether_entities::{Entity, EntityFactory, NativeApi};
use tether_types::{EntityKind, Handle};

/// In-memory stand-in for the native server: a settable set of live handles
/// plus call counters for the two query primitives.
#[derive(Default)]
pub struct MockNative {
    live: Mutex<HashSet<(EntityKind, i64)>>,
    validity_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl MockNative {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&self, kind: EntityKind, handle: i64) {
        self.live.lock().unwrap().insert((kind, handle));
    }

    pub fn destroy(&self, kind: EntityKind, handle: i64) {
        self.live.lock().unwrap().remove(&(kind, handle));
    }

    pub fn is_live(&self, kind: EntityKind, handle: i64) -> bool {
        self.live.lock().unwrap().contains(&(kind, handle))
    }

    pub fn validity_calls(&self) -> usize {
        self.validity_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl NativeApi for MockNative {
    fn is_entity_valid(&self, kind: EntityKind, handle: Handle) -> bool {
        self.validity_calls.fetch_add(1, Ordering::SeqCst);
        self.is_live(kind, handle.as_raw())
    }

    fn entity_handles(&self, kind: EntityKind) -> Vec<Handle> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let live = self.live.lock().unwrap();
        let mut handles: Vec<Handle> = live
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, raw)| Handle::from_raw(*raw))
            .collect();
        handles.sort_unstable();
        handles
    }
}

/// Factory that counts constructions, for single-construction assertions.
pub struct CountingFactory {
    kind: EntityKind,
    created: AtomicUsize,
}

impl CountingFactory {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            created: AtomicUsize::new(0),
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl EntityFactory for CountingFactory {
    fn create(&self, handle: Handle) -> Entity {
        self.created.fetch_add(1, Ordering::SeqCst);
        Entity::new(handle, self.kind)
    }
}
