//! Per-kind wrapper caches.

use crate::entity::EntityRef;
use crate::factory::EntityFactory;
use crate::native::NativeApi;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tether_types::{EntityKind, Handle};
use tracing::debug;

/// Cache of live wrappers for one entity kind.
///
/// The pool is the single source of truth for managed identity: at most one
/// wrapper exists per live handle, and resolving the same handle returns the
/// same `Arc` until that wrapper is evicted. Eviction is pull-based. The
/// native layer never announces destruction, so staleness is only discovered
/// when a caller validates.
pub struct EntityPool {
    kind: EntityKind,
    native: Arc<dyn NativeApi>,
    refresh: Arc<AtomicBool>,
    entities: Mutex<Vec<EntityRef>>,
}

impl EntityPool {
    pub(crate) fn new(
        kind: EntityKind,
        native: Arc<dyn NativeApi>,
        refresh: Arc<AtomicBool>,
    ) -> Arc<Self> {
        Arc::new(Self {
            kind,
            native,
            refresh,
            entities: Mutex::new(Vec::new()),
        })
    }

    /// The entity kind this pool caches.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Resolves `handle` to its wrapper, constructing one with `factory` on
    /// a miss.
    ///
    /// One critical section covers the whole find-or-insert, so racing
    /// callers observe exactly one construction per handle. The scan runs
    /// newest-first since recently streamed entities are the common lookups.
    /// A hit returns without a validity check: a stale wrapper for a
    /// just-destroyed handle is an accepted race that the next validation
    /// surfaces.
    pub fn resolve(self: &Arc<Self>, handle: Handle, factory: &dyn EntityFactory) -> EntityRef {
        let mut entities = self.lock();
        for entity in entities.iter().rev() {
            if entity.handle() == handle {
                return Arc::clone(entity);
            }
        }
        let mut entity = factory.create(handle);
        entity.pool = Arc::downgrade(self);
        let entity = Arc::new(entity);
        entities.push(Arc::clone(&entity));
        entity
    }

    /// Re-checks `entity` against the native authority. An invalid wrapper
    /// is evicted before false is returned; a gone handle is never an error.
    pub fn validate(&self, entity: &EntityRef) -> bool {
        if self.native.is_entity_valid(entity.kind(), entity.handle()) {
            return true;
        }
        debug!(kind = %self.kind, handle = %entity.handle(), "evicting dead entity");
        self.remove(entity);
        false
    }

    /// Evicts `entity` from the cache. Idempotent: removing a wrapper that
    /// is no longer present is a no-op. Matching is by allocation, so a
    /// successor wrapper for a reused handle is never evicted by mistake.
    pub fn remove(&self, entity: &EntityRef) {
        let mut entities = self.lock();
        if let Some(index) = entities.iter().position(|e| Arc::ptr_eq(e, entity)) {
            entities.remove(index);
        }
    }

    /// Read-only copy of the current collection.
    ///
    /// While refreshing is enabled this first asks the native layer for its
    /// authoritative handle list and discards the result. The round-trip
    /// makes the native side rebuild its own bookkeeping for any other
    /// scripting environments in the process; it does not reconcile this
    /// pool. The lock is released before the copy is returned, so callers
    /// can run arbitrary code against it.
    #[must_use]
    pub fn snapshot(&self) -> Vec<EntityRef> {
        if self.refresh.load(Ordering::Relaxed) {
            let _ = self.native.entity_handles(self.kind);
        }
        self.lock().clone()
    }

    /// Number of cached wrappers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned lock is recovered; the collection is consistent after every
    // critical section, panicking caller or not.
    fn lock(&self) -> MutexGuard<'_, Vec<EntityRef>> {
        self.entities
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}
