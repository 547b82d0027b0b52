//! The exported C surface.

use crate::hooks::{HookedNative, NativeHooks};
use std::ffi::{CStr, c_char};
use std::sync::{Arc, Mutex, MutexGuard};
use tether_host::{EventArg, Runtime, init_logging};
use tracing::{error, warn};

static RUNTIME: Mutex<Option<Arc<Runtime>>> = Mutex::new(None);

fn lock_runtime() -> MutexGuard<'static, Option<Arc<Runtime>>> {
    RUNTIME.lock().unwrap_or_else(|poison| poison.into_inner())
}

/// The currently loaded runtime, if any. Managed collaborators living in
/// the same process go through this; the plugin loader registers its
/// domains here.
#[must_use]
pub fn current_runtime() -> Option<Arc<Runtime>> {
    lock_runtime().clone()
}

unsafe fn cstr_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Loads the bridge. The native host calls this once at startup with its
/// server root and a populated hook table.
///
/// # Safety
/// `server_path` must be null or a valid null-terminated string, and
/// `hooks`, when non-null, must point to a readable [`NativeHooks`] for the
/// duration of the call. The table is copied.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tether_load(server_path: *const c_char, hooks: *const NativeHooks) {
    let Some(path) = (unsafe { cstr_arg(server_path) }) else {
        init_logging(false);
        error!("load called without a usable server path");
        return;
    };
    let hooks = if hooks.is_null() {
        NativeHooks::default()
    } else {
        unsafe { *hooks }
    };

    let mut slot = lock_runtime();
    if slot.is_some() {
        warn!("bridge is already loaded, ignoring duplicate load");
        return;
    }
    match Runtime::load(path, Arc::new(HookedNative::new(hooks))) {
        Ok(runtime) => *slot = Some(runtime),
        Err(err) => {
            init_logging(false);
            error!(error = %err, "bridge failed to load");
        }
    }
}

/// Unloads the bridge, stopping every domain in reverse registration order.
/// Safe to call when load never ran or failed.
#[unsafe(no_mangle)]
pub extern "C" fn tether_unload() {
    let runtime = lock_runtime().take();
    if let Some(runtime) = runtime {
        runtime.unload();
    }
}

/// Native event entry point. Returns false when any plugin domain vetoes
/// the event; the neutral answer for anything unusable is true.
///
/// # Safety
/// `payload` must be null or a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tether_execute_event(type_id: i32, payload: *const c_char) -> bool {
    let Some(runtime) = current_runtime() else {
        return true;
    };
    let Some(payload) = (unsafe { cstr_arg(payload) }) else {
        warn!(type_id, "event payload is missing or not UTF-8, ignoring event");
        return true;
    };
    runtime.execute_event(type_id, payload)
}

/// Raises a custom named event from the native side. `args_json` is a JSON
/// array of flat values: booleans, numbers, and strings. Null stands for no
/// arguments. Returns false when any domain vetoes.
///
/// # Safety
/// `name` and `args_json` must each be null or valid null-terminated
/// strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tether_call_event(name: *const c_char, args_json: *const c_char) -> bool {
    let Some(runtime) = current_runtime() else {
        return true;
    };
    let Some(name) = (unsafe { cstr_arg(name) }) else {
        warn!("custom event name is missing or not UTF-8, ignoring event");
        return true;
    };
    let args = if args_json.is_null() {
        Vec::new()
    } else {
        let Some(raw) = (unsafe { cstr_arg(args_json) }) else {
            warn!(event = name, "custom event arguments are not UTF-8, ignoring event");
            return true;
        };
        match parse_custom_args(raw) {
            Ok(args) => args,
            Err(reason) => {
                warn!(event = name, reason, "unusable custom event arguments, ignoring event");
                return true;
            }
        }
    };
    runtime.call_event(name, &args)
}

fn parse_custom_args(raw: &str) -> Result<Vec<EventArg>, &'static str> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|_| "not valid JSON")?;
    let serde_json::Value::Array(items) = value else {
        return Err("arguments must be a JSON array");
    };
    items.into_iter().map(flat_arg).collect()
}

fn flat_arg(value: serde_json::Value) -> Result<EventArg, &'static str> {
    match value {
        serde_json::Value::Bool(value) => Ok(EventArg::Bool(value)),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Ok(EventArg::Int(int))
            } else if let Some(float) = number.as_f64() {
                Ok(EventArg::Float(float))
            } else {
                Err("number is out of range")
            }
        }
        serde_json::Value::String(text) => Ok(EventArg::Text(text)),
        serde_json::Value::Null => Err("null is not a usable argument"),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Err("arguments must be flat, nesting is not representable")
        }
    }
}
