use pretty_assertions::assert_eq;
use serial_test::serial;
use std::ffi::{CStr, CString, c_char};
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tether_ffi::{
    NativeHooks, current_runtime, tether_call_event, tether_execute_event, tether_load,
    tether_unload,
};
use tether_host::PluginMeta;
use tether_types::{EntityKind, EventType, Handle};

// Hook-side world state: which (kind, handle) pairs the fake native server
// considers alive, plus a release counter for the list buffers.
static LIVE: Mutex<Vec<(String, i64)>> = Mutex::new(Vec::new());
static RELEASES: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C" fn hook_valid(handle: i64, kind: *const c_char) -> bool {
    let kind = unsafe { CStr::from_ptr(kind) }.to_string_lossy().into_owned();
    LIVE.lock().unwrap().contains(&(kind, handle))
}

unsafe extern "C" fn hook_list(kind: *const c_char, out_len: *mut usize) -> *mut i64 {
    let kind = unsafe { CStr::from_ptr(kind) }.to_string_lossy().into_owned();
    let handles: Vec<i64> = LIVE
        .lock()
        .unwrap()
        .iter()
        .filter(|(k, _)| *k == kind)
        .map(|(_, raw)| *raw)
        .collect();
    unsafe { *out_len = handles.len() };
    Box::into_raw(handles.into_boxed_slice()) as *mut i64
}

unsafe extern "C" fn hook_release(list: *mut i64, len: usize) {
    RELEASES.fetch_add(1, Ordering::SeqCst);
    let slice = unsafe { std::slice::from_raw_parts_mut(list, len) };
    drop(unsafe { Box::from_raw(slice as *mut [i64]) });
}

fn hooks() -> NativeHooks {
    NativeHooks {
        is_entity_valid: Some(hook_valid),
        entity_list: Some(hook_list),
        release_entity_list: Some(hook_release),
    }
}

fn reset() {
    tether_unload();
    LIVE.lock().unwrap().clear();
    RELEASES.store(0, Ordering::SeqCst);
}

fn load_bridge() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let path = CString::new(dir.path().to_str().unwrap()).unwrap();
    let table = hooks();
    unsafe { tether_load(path.as_ptr(), &table) };
    dir
}

fn execute(type_id: i32, payload: &str) -> bool {
    let payload = CString::new(payload).unwrap();
    unsafe { tether_execute_event(type_id, payload.as_ptr()) }
}

fn call(name: &str, args_json: &str) -> bool {
    let name = CString::new(name).unwrap();
    let args = CString::new(args_json).unwrap();
    unsafe { tether_call_event(name.as_ptr(), args.as_ptr()) }
}

// ── Lifecycle ───────────────────────────────────────────────────

#[test]
#[serial]
fn load_brings_up_the_runtime_and_layout() {
    reset();
    let dir = load_bridge();

    let runtime = current_runtime().expect("runtime after load");
    assert!(dir.path().join("tether").join("data").join("global.toml").is_file());
    assert!(runtime.domains().is_empty());

    tether_unload();
    assert!(current_runtime().is_none());
}

#[test]
#[serial]
fn duplicate_load_keeps_the_first_runtime() {
    reset();
    let _dir = load_bridge();
    let first = current_runtime().unwrap();

    let other_dir = tempfile::tempdir().unwrap();
    let path = CString::new(other_dir.path().to_str().unwrap()).unwrap();
    let table = hooks();
    unsafe { tether_load(path.as_ptr(), &table) };

    let still = current_runtime().unwrap();
    assert!(Arc::ptr_eq(&first, &still));
    reset();
}

#[test]
#[serial]
fn unload_without_load_is_harmless() {
    reset();
    tether_unload();
    tether_unload();
    assert!(current_runtime().is_none());
}

#[test]
#[serial]
fn null_arguments_never_crash_the_surface() {
    reset();
    unsafe {
        tether_load(ptr::null(), ptr::null());
        assert!(current_runtime().is_none());
        assert!(tether_execute_event(EventType::PlayerJoin.id(), ptr::null()));
        assert!(tether_call_event(ptr::null(), ptr::null()));
    }

    // With a loaded bridge, a null payload is still the neutral verdict.
    let _dir = load_bridge();
    unsafe {
        assert!(tether_execute_event(EventType::PlayerJoin.id(), ptr::null()));
    }
    reset();
}

// ── Event flow ──────────────────────────────────────────────────

#[test]
#[serial]
fn events_flow_through_the_c_surface() {
    reset();
    let _dir = load_bridge();
    let runtime = current_runtime().unwrap();

    let domain = runtime.register_plugin(PluginMeta::new("com.example.mod", "mod", "0.1.0"));
    domain
        .server()
        .unwrap()
        .on_event(EventType::PlayerChat, |args| {
            Ok(args[1].as_str() != Some("spam"))
        });

    assert!(execute(EventType::PlayerChat.id(), "[1, \"hello\"]"));
    assert!(!execute(EventType::PlayerChat.id(), "[1, \"spam\"]"));
    reset();
}

#[test]
#[serial]
fn custom_events_cross_the_boundary() {
    reset();
    let _dir = load_bridge();
    let runtime = current_runtime().unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let domain = runtime.register_plugin(PluginMeta::new("com.example.eco", "eco", "0.1.0"));
    {
        let calls = Arc::clone(&calls);
        domain.server().unwrap().on_custom("economy:pay", move |args| {
            calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(args[0].as_str(), Some("rent"));
            assert_eq!(args[1].as_i64(), Some(250));
            assert_eq!(args[2].as_f64(), Some(2.5));
            assert_eq!(args[3].as_bool(), Some(true));
            Ok(false)
        });
    }

    assert!(!call("economy:pay", "[\"rent\", 250, 2.5, true]"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    reset();
}

#[test]
#[serial]
fn nested_custom_arguments_are_rejected() {
    reset();
    let _dir = load_bridge();
    let runtime = current_runtime().unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let domain = runtime.register_plugin(PluginMeta::new("com.example.eco", "eco", "0.1.0"));
    {
        let calls = Arc::clone(&calls);
        domain.server().unwrap().on_custom("data:push", move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        });
    }

    // Nested values violate the flat-argument rule; the event is dropped
    // with the neutral verdict and no handler runs.
    assert!(call("data:push", "[[1, 2]]"));
    assert!(call("data:push", "{\"a\": 1}"));
    assert!(call("data:push", "not json"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // A null argument string means no arguments at all.
    let name = CString::new("data:push").unwrap();
    assert!(!unsafe { tether_call_event(name.as_ptr(), ptr::null()) });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    reset();
}

// ── Hook round-trips ────────────────────────────────────────────

#[test]
#[serial]
fn validity_checks_go_through_the_hook_table() {
    reset();
    let _dir = load_bridge();
    let runtime = current_runtime().unwrap();

    LIVE.lock().unwrap().push(("Player".to_string(), 7));
    let player = runtime
        .pools()
        .resolve(EntityKind::Player, Handle::from_raw(7));
    assert!(player.is_alive());

    LIVE.lock().unwrap().clear();
    assert!(!player.is_alive());
    assert!(runtime.pools().pool(EntityKind::Player).is_empty());
    reset();
}

#[test]
#[serial]
fn snapshots_release_the_native_list_buffer() {
    reset();
    let _dir = load_bridge();
    let runtime = current_runtime().unwrap();

    LIVE.lock().unwrap().push(("Vehicle".to_string(), 3));
    let snapshot = runtime.pools().snapshot(EntityKind::Vehicle);

    // Nothing was resolved, so the snapshot is empty even though the native
    // list round-trip ran and its buffer came back.
    assert!(snapshot.is_empty());
    assert_eq!(RELEASES.load(Ordering::SeqCst), 1);
    reset();
}

#[test]
#[serial]
fn missing_hooks_degrade_instead_of_crashing() {
    reset();
    let dir = tempfile::tempdir().unwrap();
    let path = CString::new(dir.path().to_str().unwrap()).unwrap();
    let empty = NativeHooks::default();
    unsafe { tether_load(path.as_ptr(), &empty) };

    let runtime = current_runtime().unwrap();
    let ghost = runtime
        .pools()
        .resolve(EntityKind::Npc, Handle::from_raw(1));
    assert!(!ghost.is_alive());
    assert!(runtime.pools().snapshot(EntityKind::Npc).is_empty());
    reset();
}
