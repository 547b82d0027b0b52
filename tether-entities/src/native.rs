//! The seam to the native server.

use tether_types::{EntityKind, Handle};

/// Query primitives the native server exposes to the bridge.
///
/// Implementations are pure pass-throughs. Results are never cached on this
/// side of the seam: the native layer creates and destroys objects outside
/// the bridge's control, so every check that matters re-asks. The production
/// implementation lives at the FFI boundary and owns the release of any
/// native-allocated list buffers before returning.
pub trait NativeApi: Send + Sync {
    /// Whether `handle` still names a live object of `kind`.
    fn is_entity_valid(&self, kind: EntityKind, handle: Handle) -> bool;

    /// The authoritative current handle list for `kind`.
    fn entity_handles(&self, kind: EntityKind) -> Vec<Handle>;
}
