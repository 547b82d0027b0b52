//! Core identifier and event types for the Tether bridge.
//!
//! Pure data, no I/O and no native calls. Everything the native wire
//! contract names lives here: opaque entity handles, the entity kinds the
//! server exposes, and the closed native event taxonomy.

mod event;
mod handle;
mod kind;

pub use event::EventType;
pub use handle::Handle;
pub use kind::EntityKind;
