//! Managed wrappers over native handles.

use crate::pool::EntityPool;
use std::fmt;
use std::sync::{Arc, Weak};
use tether_types::{EntityKind, Handle};

/// Shared reference to a cached entity wrapper.
///
/// Two `EntityRef`s name the same entity exactly when they are the same
/// allocation (`Arc::ptr_eq`); the owning pool keeps at most one wrapper per
/// live handle.
pub type EntityRef = Arc<Entity>;

/// A managed wrapper for one live native game object.
///
/// Wrappers are created lazily by their pool on first resolution and evicted
/// the moment a validity check fails. A clone that outlives its eviction is
/// dangling: a false [`Entity::is_alive`] means the object is gone and the
/// reference should be dropped.
pub struct Entity {
    handle: Handle,
    kind: EntityKind,
    pub(crate) pool: Weak<EntityPool>,
}

impl Entity {
    /// Builds a detached wrapper. The pool attaches itself on insertion;
    /// factories only ever see detached wrappers.
    #[must_use]
    pub fn new(handle: Handle, kind: EntityKind) -> Self {
        Self {
            handle,
            kind,
            pool: Weak::new(),
        }
    }

    /// The native handle this wrapper stands for.
    #[must_use]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// The entity kind this wrapper belongs to.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Re-checks this wrapper against the native authority through its pool,
    /// evicting it on failure. Returns false once the pool itself is gone.
    pub fn is_alive(self: &Arc<Self>) -> bool {
        match self.pool.upgrade() {
            Some(pool) => pool.validate(self),
            None => false,
        }
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.handle == other.handle
    }
}

impl Eq for Entity {}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("kind", &self.kind)
            .field("handle", &self.handle)
            .finish()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.handle)
    }
}
