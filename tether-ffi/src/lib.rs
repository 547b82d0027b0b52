//! C ABI for embedding the bridge in the native server process.
//!
//! The native host drives the bridge through four exports: load, unload,
//! execute-event, and call-event. At load it hands over a [`NativeHooks`]
//! table, and the bridge calls back through it for entity validity checks
//! and entity listings. Nothing in this crate propagates an error to the
//! host; failures are logged and collapse to the neutral verdict.
//!
//! Managed collaborators compiled into the same process (the plugin loader
//! above all) reach the live runtime through [`current_runtime`].

mod bridge;
mod hooks;

pub use bridge::{
    current_runtime, tether_call_event, tether_execute_event, tether_load, tether_unload,
};
pub use hooks::NativeHooks;
