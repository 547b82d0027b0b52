//! Per-domain event routing.

use crate::args::EventArg;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tether_types::EventType;
use tracing::warn;

/// Routing key: a native event type, or a custom event by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKey {
    Native(EventType),
    Custom(String),
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKey::Native(event) => f.write_str(event.name()),
            EventKey::Custom(name) => write!(f, "custom:{name}"),
        }
    }
}

type Handler = Arc<dyn Fn(&[EventArg]) -> anyhow::Result<bool> + Send + Sync>;

/// Explicit handler registration for one domain.
///
/// Handlers run in registration order. `Ok(true)` lets the event continue,
/// `Ok(false)` vetoes it, and an `Err` is logged against the owning domain
/// and counts as continue. A key nobody registered for is allowed outright.
pub struct EventRouter {
    label: String,
    handlers: RwLock<HashMap<EventKey, Vec<Handler>>>,
}

impl EventRouter {
    pub(crate) fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a handler for a native event type.
    pub fn on<F>(&self, event: EventType, handler: F)
    where
        F: Fn(&[EventArg]) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.register(EventKey::Native(event), Arc::new(handler));
    }

    /// Registers a handler for a custom named event.
    pub fn on_custom<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[EventArg]) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.register(EventKey::Custom(name.into()), Arc::new(handler));
    }

    /// Number of handlers registered for `key`.
    #[must_use]
    pub fn handler_count(&self, key: &EventKey) -> usize {
        self.read().get(key).map_or(0, Vec::len)
    }

    fn register(&self, key: EventKey, handler: Handler) {
        self.write().entry(key).or_default().push(handler);
    }

    /// Runs every handler for `key` and folds their verdicts. The handler
    /// list is snapshotted first, so a handler may register further handlers
    /// without deadlocking; additions only take effect from the next event.
    pub(crate) fn dispatch(&self, key: &EventKey, args: &[EventArg]) -> bool {
        let handlers: Vec<Handler> = match self.read().get(key) {
            Some(list) => list.clone(),
            None => return true,
        };
        let mut verdict = true;
        for handler in handlers {
            match handler(args) {
                Ok(true) => {}
                Ok(false) => verdict = false,
                Err(error) => warn!(
                    plugin = %self.label,
                    event = %key,
                    %error,
                    "event handler failed, treating as allow"
                ),
            }
        }
        verdict
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<EventKey, Vec<Handler>>> {
        self.handlers
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<EventKey, Vec<Handler>>> {
        self.handlers
            .write()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}
