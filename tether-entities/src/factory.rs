//! Wrapper construction.

use crate::entity::Entity;
use tether_types::{EntityKind, Handle};

/// Constructs wrapper objects for one entity kind.
///
/// Factories are pure: handle in, detached wrapper out, no failure path. A
/// handle that is already dead by the time the factory runs is still
/// accepted; the first validation of the wrapper evicts it. Replacements can
/// be installed per kind through [`crate::PoolRegistry::override_factory`],
/// before the first resolution of that kind.
///
/// The pool invokes factories with its critical section held, so
/// implementations must not call back into the pool.
pub trait EntityFactory: Send + Sync {
    /// Builds the wrapper for `handle`.
    fn create(&self, handle: Handle) -> Entity;
}

/// The built-in factory: a plain wrapper of the pool's kind.
pub struct DefaultEntityFactory {
    kind: EntityKind,
}

impl DefaultEntityFactory {
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self { kind }
    }
}

impl EntityFactory for DefaultEntityFactory {
    fn create(&self, handle: Handle) -> Entity {
        Entity::new(handle, self.kind)
    }
}
