//! Plugin execution contexts.

use crate::server::Server;
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::info;
use uuid::Uuid;

/// Unique id for one loaded domain instance. Reloading a plugin creates a
/// fresh domain with a fresh id, so log lines can tell generations apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainId(Uuid);

impl DomainId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static description of a plugin, supplied by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMeta {
    pub id: String,
    pub name: String,
    pub version: String,
}

impl PluginMeta {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Log-friendly label, e.g. `chat-essentials v1.2.0`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} v{}", self.name, self.version)
    }
}

/// One isolated plugin execution context: a plugin's identity plus its own
/// [`Server`] facade, and through the facade its own event router.
///
/// Stopping a domain takes the facade out. A domain that is still listed but
/// has no facade is skipped by the fan-out with an error log; that state
/// normally only exists transiently during teardown.
pub struct PluginDomain {
    id: DomainId,
    meta: PluginMeta,
    server: RwLock<Option<Arc<Server>>>,
}

impl PluginDomain {
    pub(crate) fn new(meta: PluginMeta, server: Arc<Server>) -> Arc<Self> {
        Arc::new(Self {
            id: DomainId::new(),
            meta,
            server: RwLock::new(Some(server)),
        })
    }

    /// This domain instance's id.
    #[must_use]
    pub fn id(&self) -> DomainId {
        self.id
    }

    /// The plugin this domain hosts.
    #[must_use]
    pub fn meta(&self) -> &PluginMeta {
        &self.meta
    }

    /// The domain's server facade, or `None` once the domain is stopped.
    #[must_use]
    pub fn server(&self) -> Option<Arc<Server>> {
        self.server
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    fn take_server(&self) -> Option<Arc<Server>> {
        self.server
            .write()
            .unwrap_or_else(|poison| poison.into_inner())
            .take()
    }
}

impl fmt::Debug for PluginDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDomain")
            .field("id", &self.id)
            .field("meta", &self.meta)
            .finish()
    }
}

/// Ordered collection of loaded domains. Registration order is fan-out
/// order; teardown walks it in reverse.
pub struct DomainManager {
    domains: RwLock<Vec<Arc<PluginDomain>>>,
}

impl DomainManager {
    pub(crate) fn new() -> Self {
        Self {
            domains: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn register(&self, domain: Arc<PluginDomain>) {
        self.write().push(domain);
    }

    /// Point-in-time copy for iteration. A domain stopping mid-iteration
    /// cannot disturb a walk over the copy.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<PluginDomain>> {
        self.read().clone()
    }

    /// Number of loaded domains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Stops `domain`: detaches its facade and removes it from the list.
    /// Idempotent.
    pub fn force_stop(&self, domain: &Arc<PluginDomain>) {
        if domain.take_server().is_some() {
            info!(
                plugin = %domain.meta().display(),
                domain = %domain.id(),
                "plugin domain stopped"
            );
        }
        let mut domains = self.write();
        if let Some(index) = domains.iter().position(|d| Arc::ptr_eq(d, domain)) {
            domains.remove(index);
        }
    }

    /// Stops every domain, newest first.
    pub(crate) fn stop_all_reverse(&self) {
        for domain in self.snapshot().into_iter().rev() {
            self.force_stop(&domain);
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Arc<PluginDomain>>> {
        self.domains
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Arc<PluginDomain>>> {
        self.domains
            .write()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}
