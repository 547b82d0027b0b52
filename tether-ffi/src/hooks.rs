//! The native hook table and its adapter onto the entity seam.

use std::ffi::{CString, c_char};
use tether_entities::NativeApi;
use tether_types::{EntityKind, Handle};

/// Callbacks into the native server, supplied by the host at load time.
///
/// `entity_list` returns a native-allocated buffer of raw handles and
/// writes its length through `out_len`; the bridge copies the buffer and
/// hands it straight back through `release_entity_list`. A missing hook
/// degrades to "nothing is valid, nothing is listed" instead of failing
/// the load.
#[repr(C)]
#[derive(Clone, Copy, Default)]
pub struct NativeHooks {
    pub is_entity_valid: Option<unsafe extern "C" fn(handle: i64, kind: *const c_char) -> bool>,
    pub entity_list:
        Option<unsafe extern "C" fn(kind: *const c_char, out_len: *mut usize) -> *mut i64>,
    pub release_entity_list: Option<unsafe extern "C" fn(list: *mut i64, len: usize)>,
}

/// [`NativeApi`] over the hook table.
pub(crate) struct HookedNative {
    hooks: NativeHooks,
}

impl HookedNative {
    pub(crate) fn new(hooks: NativeHooks) -> Self {
        Self { hooks }
    }

    fn kind_name(kind: EntityKind) -> CString {
        // Kind names are static ASCII, so this never actually fails.
        CString::new(kind.name()).unwrap_or_default()
    }
}

impl NativeApi for HookedNative {
    fn is_entity_valid(&self, kind: EntityKind, handle: Handle) -> bool {
        let Some(hook) = self.hooks.is_entity_valid else {
            return false;
        };
        let kind = Self::kind_name(kind);
        unsafe { hook(handle.as_raw(), kind.as_ptr()) }
    }

    fn entity_handles(&self, kind: EntityKind) -> Vec<Handle> {
        let Some(hook) = self.hooks.entity_list else {
            return Vec::new();
        };
        let kind_name = Self::kind_name(kind);
        let mut len: usize = 0;
        let list = unsafe { hook(kind_name.as_ptr(), &mut len) };
        if list.is_null() {
            return Vec::new();
        }
        // Copy before release; the buffer belongs to the native side.
        let handles = unsafe { std::slice::from_raw_parts(list, len) }
            .iter()
            .map(|&raw| Handle::from_raw(raw))
            .collect();
        if let Some(release) = self.hooks.release_entity_list {
            unsafe { release(list, len) };
        }
        handles
    }
}
