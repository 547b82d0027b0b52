//! Entity handle cache for the Tether bridge.
//!
//! The native server owns every game object and names them with opaque
//! handles; this crate owns the managed side of that relationship. Each
//! entity kind gets one [`EntityPool`] holding at most one wrapper per live
//! handle, so repeated resolutions of the same handle observe the same
//! object identity. Validation is pull-based: the native layer never
//! announces destruction, and a wrapper stays cached until a check against
//! the native authority fails and evicts it.

mod entity;
mod factory;
mod native;
mod pool;
mod registry;

pub use entity::{Entity, EntityRef};
pub use factory::{DefaultEntityFactory, EntityFactory};
pub use native::NativeApi;
pub use pool::EntityPool;
pub use registry::PoolRegistry;
