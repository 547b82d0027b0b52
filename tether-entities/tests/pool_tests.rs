mod common;

use common::{CountingFactory, MockNative};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use tether_entities::{NativeApi, PoolRegistry};
use tether_types::{EntityKind, Handle};

fn setup() -> (Arc<MockNative>, Arc<PoolRegistry>) {
    let native = Arc::new(MockNative::new());
    let registry = PoolRegistry::new(Arc::clone(&native) as Arc<dyn NativeApi>, true);
    (native, registry)
}

// ── Resolution ──────────────────────────────────────────────────

#[test]
fn resolving_the_same_handle_returns_the_same_wrapper() {
    let (native, registry) = setup();
    native.spawn(EntityKind::Player, 7);

    let first = registry.resolve(EntityKind::Player, Handle::from_raw(7));
    let second = registry.resolve(EntityKind::Player, Handle::from_raw(7));

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.pool(EntityKind::Player).len(), 1);
}

#[test]
fn distinct_handles_get_distinct_wrappers() {
    let (_, registry) = setup();

    let a = registry.resolve(EntityKind::Player, Handle::from_raw(1));
    let b = registry.resolve(EntityKind::Player, Handle::from_raw(2));

    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(a.handle(), Handle::from_raw(1));
    assert_eq!(b.handle(), Handle::from_raw(2));
}

#[test]
fn hits_skip_the_validity_check() {
    let (native, registry) = setup();
    native.spawn(EntityKind::Player, 7);
    let first = registry.resolve(EntityKind::Player, Handle::from_raw(7));

    // The native object dies, but nothing validates. The cached wrapper is
    // still handed out as-is.
    native.destroy(EntityKind::Player, 7);
    let second = registry.resolve(EntityKind::Player, Handle::from_raw(7));

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(native.validity_calls(), 0);
}

#[test]
fn resolving_a_dead_handle_still_creates_a_wrapper() {
    let (native, registry) = setup();

    let ghost = registry.resolve(EntityKind::Npc, Handle::from_raw(404));
    assert_eq!(registry.pool(EntityKind::Npc).len(), 1);

    // First validation notices and evicts.
    assert!(!registry.validate(&ghost));
    assert!(registry.pool(EntityKind::Npc).is_empty());
    let _ = native;
}

#[test]
fn concurrent_resolution_constructs_exactly_once() {
    let (_, registry) = setup();
    let factory = CountingFactory::new(EntityKind::Player);
    let pool = registry.pool(EntityKind::Player);

    let wrappers: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| pool.resolve(Handle::from_raw(42), &factory)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(factory.created(), 1);
    for wrapper in &wrappers[1..] {
        assert!(Arc::ptr_eq(&wrappers[0], wrapper));
    }
}

// ── Validation and eviction ─────────────────────────────────────

#[test]
fn validation_keeps_live_wrappers() {
    let (native, registry) = setup();
    native.spawn(EntityKind::Vehicle, 3);
    let vehicle = registry.resolve(EntityKind::Vehicle, Handle::from_raw(3));

    assert!(registry.validate(&vehicle));
    assert_eq!(registry.pool(EntityKind::Vehicle).len(), 1);
}

#[test]
fn failed_validation_evicts_and_later_resolution_starts_fresh() {
    let (native, registry) = setup();
    native.spawn(EntityKind::Player, 7);
    let stale = registry.resolve(EntityKind::Player, Handle::from_raw(7));

    native.destroy(EntityKind::Player, 7);
    assert!(!registry.validate(&stale));
    assert!(registry.pool(EntityKind::Player).is_empty());

    // The handle comes back (native reuse). The new wrapper is a new object.
    native.spawn(EntityKind::Player, 7);
    let fresh = registry.resolve(EntityKind::Player, Handle::from_raw(7));
    assert!(!Arc::ptr_eq(&stale, &fresh));
}

#[test]
fn is_alive_validates_through_the_owning_pool() {
    let (native, registry) = setup();
    native.spawn(EntityKind::Npc, 11);
    let npc = registry.resolve(EntityKind::Npc, Handle::from_raw(11));

    assert!(npc.is_alive());
    native.destroy(EntityKind::Npc, 11);
    assert!(!npc.is_alive());
    assert!(registry.pool(EntityKind::Npc).is_empty());
}

#[test]
fn is_alive_is_false_once_the_pool_is_gone() {
    let entity = {
        let (native, registry) = setup();
        native.spawn(EntityKind::Player, 1);
        registry.resolve(EntityKind::Player, Handle::from_raw(1))
    };
    assert!(!entity.is_alive());
}

#[test]
fn remove_is_idempotent() {
    let (_, registry) = setup();
    let entity = registry.resolve(EntityKind::Door, Handle::from_raw(5));

    registry.remove(&entity);
    registry.remove(&entity);
    assert!(registry.pool(EntityKind::Door).is_empty());
}

#[test]
fn removing_a_stale_wrapper_spares_its_successor() {
    let (_, registry) = setup();
    let old = registry.resolve(EntityKind::Door, Handle::from_raw(5));
    registry.remove(&old);

    let new = registry.resolve(EntityKind::Door, Handle::from_raw(5));
    registry.remove(&old);

    let snapshot = registry.snapshot(EntityKind::Door);
    assert_eq!(snapshot.len(), 1);
    assert!(Arc::ptr_eq(&snapshot[0], &new));
}

// ── Snapshots ───────────────────────────────────────────────────

#[test]
fn snapshot_reflects_evictions() {
    let (native, registry) = setup();
    for raw in [10, 20, 30] {
        native.spawn(EntityKind::Player, raw);
        registry.resolve(EntityKind::Player, Handle::from_raw(raw));
    }

    native.destroy(EntityKind::Player, 20);
    let doomed = registry.resolve(EntityKind::Player, Handle::from_raw(20));
    assert!(!registry.validate(&doomed));

    let handles: Vec<i64> = registry
        .snapshot(EntityKind::Player)
        .iter()
        .map(|e| e.handle().as_raw())
        .collect();
    assert_eq!(handles, vec![10, 30]);
}

#[test]
fn snapshot_runs_the_native_refresh_roundtrip() {
    let (native, registry) = setup();
    registry.snapshot(EntityKind::Player);
    registry.snapshot(EntityKind::Player);
    assert_eq!(native.list_calls(), 2);
}

#[test]
fn snapshot_ignores_the_native_list_contents() {
    let (native, registry) = setup();
    for raw in [1, 2, 3] {
        native.spawn(EntityKind::Player, raw);
    }

    // The native side knows three players, but nothing resolved them. The
    // roundtrip ran, yet the snapshot only reports cached wrappers.
    let snapshot = registry.snapshot(EntityKind::Player);
    assert!(snapshot.is_empty());
    assert_eq!(native.list_calls(), 1);
}

#[test]
fn disabled_refreshing_skips_the_roundtrip() {
    let native = Arc::new(MockNative::new());
    let registry = PoolRegistry::new(Arc::clone(&native) as Arc<dyn NativeApi>, false);

    registry.snapshot(EntityKind::Player);
    assert_eq!(native.list_calls(), 0);
}
