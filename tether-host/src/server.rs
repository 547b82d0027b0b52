//! The per-domain server facade.

use crate::args::EventArg;
use crate::router::{EventKey, EventRouter};
use crate::runtime::Runtime;
use std::sync::{Arc, Weak};
use tether_entities::{EntityFactory, EntityRef, PoolRegistry};
use tether_types::{EntityKind, EventType, Handle};

/// A plugin domain's window onto the bridge.
///
/// Every domain gets its own facade and its own router behind it, but the
/// pools are process-global: two domains resolving the same handle observe
/// the same wrapper. The facade holds the runtime weakly, so a facade kept
/// alive past teardown degrades to no-ops instead of keeping the runtime
/// alive.
pub struct Server {
    pools: Arc<PoolRegistry>,
    router: EventRouter,
    runtime: Weak<Runtime>,
}

impl Server {
    pub(crate) fn new(label: String, pools: Arc<PoolRegistry>, runtime: Weak<Runtime>) -> Arc<Self> {
        Arc::new(Self {
            router: EventRouter::new(label),
            pools,
            runtime,
        })
    }

    // ── Entities ────────────────────────────────────────────────

    /// Resolves a raw native handle of `kind` through the shared pools.
    pub fn resolve(&self, kind: EntityKind, handle: Handle) -> EntityRef {
        self.pools.resolve(kind, handle)
    }

    /// Live-wrapper snapshot for `kind`.
    #[must_use]
    pub fn entities(&self, kind: EntityKind) -> Vec<EntityRef> {
        self.pools.snapshot(kind)
    }

    #[must_use]
    pub fn players(&self) -> Vec<EntityRef> {
        self.entities(EntityKind::Player)
    }

    #[must_use]
    pub fn npcs(&self) -> Vec<EntityRef> {
        self.entities(EntityKind::Npc)
    }

    #[must_use]
    pub fn doors(&self) -> Vec<EntityRef> {
        self.entities(EntityKind::Door)
    }

    #[must_use]
    pub fn objects(&self) -> Vec<EntityRef> {
        self.entities(EntityKind::Object)
    }

    #[must_use]
    pub fn pickups(&self) -> Vec<EntityRef> {
        self.entities(EntityKind::Pickup)
    }

    #[must_use]
    pub fn text3ds(&self) -> Vec<EntityRef> {
        self.entities(EntityKind::Text3d)
    }

    #[must_use]
    pub fn vehicles(&self) -> Vec<EntityRef> {
        self.entities(EntityKind::Vehicle)
    }

    /// Replaces the wrapper factory for `kind`. Meant to run during plugin
    /// startup, before the first resolution of that kind.
    pub fn override_entity_factory(&self, kind: EntityKind, factory: Arc<dyn EntityFactory>) {
        self.pools.override_factory(kind, factory);
    }

    // ── Events ──────────────────────────────────────────────────

    /// Registers a handler for a native event type. The handler receives the
    /// arguments documented on [`EventType`]; a payload that fails to decode
    /// arrives as an empty list instead.
    pub fn on_event<F>(&self, event: EventType, handler: F)
    where
        F: Fn(&[EventArg]) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.router.on(event, handler);
    }

    /// Registers a handler for a custom named event.
    pub fn on_custom<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[EventArg]) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.router.on_custom(name, handler);
    }

    /// Number of handlers this domain has for `key`.
    #[must_use]
    pub fn handler_count(&self, key: &EventKey) -> usize {
        self.router.handler_count(key)
    }

    /// Fires a custom event across every loaded domain, this one included,
    /// and returns false when any domain vetoes. Safe to call from inside a
    /// handler. After teardown this is a no-op that reports allow.
    pub fn call_event(&self, name: &str, args: &[EventArg]) -> bool {
        match self.runtime.upgrade() {
            Some(runtime) => runtime.call_event(name, args),
            None => true,
        }
    }

    pub(crate) fn dispatch(&self, key: &EventKey, args: &[EventArg]) -> bool {
        self.router.dispatch(key, args)
    }
}
