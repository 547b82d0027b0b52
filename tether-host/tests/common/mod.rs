#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tether_entities::NativeApi;
use tether_host::{PluginMeta, Runtime};
use tether_types::{EntityKind, Handle};

/// In-memory stand-in for the native server.
#[derive(Default)]
pub struct MockNative {
    live: Mutex<HashSet<(EntityKind, i64)>>,
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

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl NativeApi for MockNative {
    fn is_entity_valid(&self, kind: EntityKind, handle: Handle) -> bool {
        self.live
            .lock()
            .unwrap()
            .contains(&(kind, handle.as_raw()))
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

/// A loaded runtime over a throwaway directory and a mock native layer.
pub struct TestBridge {
    pub dir: TempDir,
    pub native: Arc<MockNative>,
    pub runtime: Arc<Runtime>,
}

pub fn bridge() -> TestBridge {
    let dir = tempfile::tempdir().unwrap();
    let native = Arc::new(MockNative::new());
    let api = Arc::clone(&native) as Arc<dyn NativeApi>;
    let runtime = Runtime::load(dir.path(), api).unwrap();
    TestBridge {
        dir,
        native,
        runtime,
    }
}

pub fn meta(name: &str) -> PluginMeta {
    PluginMeta::new(format!("com.example.{name}"), name, "1.0.0")
}
