//! The per-kind pool registry.

use crate::entity::EntityRef;
use crate::factory::{DefaultEntityFactory, EntityFactory};
use crate::native::NativeApi;
use crate::pool::EntityPool;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tether_types::{EntityKind, Handle};
use tracing::info;

/// Owns one [`EntityPool`] per entity kind for the lifetime of the process,
/// along with the per-kind wrapper factories and the snapshot-refresh flag
/// the pools share.
pub struct PoolRegistry {
    pools: [Arc<EntityPool>; 7],
    factories: RwLock<[Arc<dyn EntityFactory>; 7]>,
    refresh: Arc<AtomicBool>,
}

// EntityKind::ALL lists variants in declaration order, so the discriminant
// doubles as the slot index.
fn slot(kind: EntityKind) -> usize {
    kind as usize
}

impl PoolRegistry {
    /// Builds the seven pools over the given native seam. `refreshing` seeds
    /// the snapshot-refresh flag (see [`EntityPool::snapshot`]).
    #[must_use]
    pub fn new(native: Arc<dyn NativeApi>, refreshing: bool) -> Arc<Self> {
        let refresh = Arc::new(AtomicBool::new(refreshing));
        let pools = EntityKind::ALL
            .map(|kind| EntityPool::new(kind, Arc::clone(&native), Arc::clone(&refresh)));
        let factories = EntityKind::ALL
            .map(|kind| Arc::new(DefaultEntityFactory::new(kind)) as Arc<dyn EntityFactory>);
        Arc::new(Self {
            pools,
            factories: RwLock::new(factories),
            refresh,
        })
    }

    /// The pool caching `kind`.
    #[must_use]
    pub fn pool(&self, kind: EntityKind) -> &Arc<EntityPool> {
        &self.pools[slot(kind)]
    }

    /// Resolves `handle` through the pool for `kind`, using the installed
    /// factory for that kind.
    pub fn resolve(&self, kind: EntityKind, handle: Handle) -> EntityRef {
        let factory = Arc::clone(&self.read_factories()[slot(kind)]);
        self.pool(kind).resolve(handle, factory.as_ref())
    }

    /// Replaces the wrapper factory for `kind`. Overrides are meant to be
    /// installed before the first resolution of that kind; wrappers that
    /// already exist are not rebuilt.
    pub fn override_factory(&self, kind: EntityKind, factory: Arc<dyn EntityFactory>) {
        info!(kind = %kind, "entity factory overridden");
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(|poison| poison.into_inner());
        factories[slot(kind)] = factory;
    }

    /// Re-checks `entity` against the native authority via its pool.
    pub fn validate(&self, entity: &EntityRef) -> bool {
        self.pool(entity.kind()).validate(entity)
    }

    /// Evicts `entity` from its pool. Idempotent.
    pub fn remove(&self, entity: &EntityRef) {
        self.pool(entity.kind()).remove(entity);
    }

    /// Read-only copy of the current collection for `kind`.
    #[must_use]
    pub fn snapshot(&self, kind: EntityKind) -> Vec<EntityRef> {
        self.pool(kind).snapshot()
    }

    /// Stops the snapshot refresh round-trips for every pool. Meant for
    /// servers where this bridge is the only scripting environment; the
    /// round-trip only exists to keep other environments' views fresh.
    pub fn disable_refreshing(&self) {
        info!("entity snapshot refreshing disabled");
        self.refresh.store(false, Ordering::Relaxed);
    }

    /// Whether snapshots still run the native refresh round-trip.
    #[must_use]
    pub fn refreshing_enabled(&self) -> bool {
        self.refresh.load(Ordering::Relaxed)
    }

    fn read_factories(&self) -> std::sync::RwLockReadGuard<'_, [Arc<dyn EntityFactory>; 7]> {
        self.factories
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}
