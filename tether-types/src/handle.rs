//! Opaque native handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque 64-bit identifier the native server assigns to a live game object.
///
/// A handle carries no type information by itself; the pool holding it knows
/// the kind. The native side may reuse a value after the object it named is
/// destroyed, so a raw handle is only meaningful for as long as the native
/// authority confirms it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Handle(i64);

impl Handle {
    /// Wraps a raw native handle value.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw native value.
    #[must_use]
    pub const fn as_raw(self) -> i64 {
        self.0
    }
}

impl From<i64> for Handle {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<Handle> for i64 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
