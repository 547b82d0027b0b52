//! Runtime lifecycle and the event dispatch fan-out.

use crate::args::EventArg;
use crate::config::RuntimeConfig;
use crate::decode::decode_event_args;
use crate::domain::{DomainManager, PluginDomain, PluginMeta};
use crate::error::HostResult;
use crate::logging;
use crate::router::EventKey;
use crate::server::Server;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tether_entities::{NativeApi, PoolRegistry};
use tether_types::EventType;
use tracing::{debug, error, info, warn};

/// The fixed directory layout under `{server}/tether`.
#[derive(Debug, Clone)]
pub struct BridgePaths {
    /// The native server's own root.
    pub server: PathBuf,
    /// Bridge root: `{server}/tether`.
    pub app: PathBuf,
    /// Shared managed libraries.
    pub libs: PathBuf,
    /// Plugin binaries, one subdirectory or file per plugin.
    pub plugins: PathBuf,
    /// Log output.
    pub logs: PathBuf,
    /// Config and plugin data.
    pub data: PathBuf,
}

impl BridgePaths {
    fn new(server: PathBuf) -> Self {
        let app = server.join("tether");
        Self {
            libs: app.join("libs"),
            plugins: app.join("plugins"),
            logs: app.join("logs"),
            data: app.join("data"),
            app,
            server,
        }
    }

    /// The global config file inside `data`.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.data.join("global.toml")
    }

    fn ensure(&self) -> std::io::Result<()> {
        for dir in [&self.libs, &self.plugins, &self.logs, &self.data] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Process-wide bridge state.
///
/// One runtime exists per process: the native host creates it on load and
/// drops it on unload. It owns the directory layout, the global config, the
/// shared entity pools, and the ordered domain list every event fans out to.
pub struct Runtime {
    paths: BridgePaths,
    config: RuntimeConfig,
    pools: Arc<PoolRegistry>,
    domains: DomainManager,
    // One fan-out at a time. Reentrant, so a handler can raise a custom
    // event from inside a dispatch without deadlocking itself. There is no
    // dispatch timeout; a handler that blocks stalls every native entry.
    dispatch_gate: ReentrantMutex<()>,
}

impl Runtime {
    /// Brings the bridge up: creates the directory layout, loads or writes
    /// the default config, installs logging, and builds the pools. Errors
    /// are returned for the FFI boundary to log; nothing here reaches the
    /// native caller as a failure.
    pub fn load(server_path: impl Into<PathBuf>, native: Arc<dyn NativeApi>) -> HostResult<Arc<Self>> {
        let paths = BridgePaths::new(server_path.into());
        paths.ensure()?;
        let config = RuntimeConfig::load_or_create(&paths.config_file())?;
        logging::init(config.is_debug);

        info!(version = env!("CARGO_PKG_VERSION"), root = %paths.app.display(), "bridge starting");
        if config.is_debug {
            warn!("debug mode is active");
        }

        let pools = PoolRegistry::new(native, config.entity_refreshing);
        info!("bridge runtime loaded");

        Ok(Arc::new(Self {
            paths,
            config,
            pools,
            domains: DomainManager::new(),
            dispatch_gate: ReentrantMutex::new(()),
        }))
    }

    /// The on-disk layout.
    #[must_use]
    pub fn paths(&self) -> &BridgePaths {
        &self.paths
    }

    /// The loaded global config.
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The shared entity pools.
    #[must_use]
    pub fn pools(&self) -> &Arc<PoolRegistry> {
        &self.pools
    }

    /// The loaded domains.
    #[must_use]
    pub fn domains(&self) -> &DomainManager {
        &self.domains
    }

    /// Creates and registers a plugin execution context. Called by the
    /// plugin loader; registration order is fan-out order.
    pub fn register_plugin(self: &Arc<Self>, meta: PluginMeta) -> Arc<PluginDomain> {
        let server = Server::new(meta.display(), Arc::clone(&self.pools), Arc::downgrade(self));
        let domain = PluginDomain::new(meta, server);
        self.domains.register(Arc::clone(&domain));
        info!(
            plugin = %domain.meta().display(),
            domain = %domain.id(),
            "plugin domain registered"
        );
        domain
    }

    /// Stops every domain in reverse registration order. Safe to call more
    /// than once; the second call finds nothing to stop.
    pub fn unload(&self) {
        warn!("stopping bridge...");
        self.domains.stop_all_reverse();
        info!("bridge stopped");
    }

    /// Native event entry point.
    ///
    /// Looks up the event for `type_id`, then walks a snapshot of the domain
    /// list: decodes the payload fresh for each domain, runs that domain's
    /// handlers, and folds the verdicts with AND. A payload that fails to
    /// decode is logged against the domain and delivered as an empty
    /// argument list. Unknown ids and the custom id are ignored with the
    /// neutral verdict. With no domains loaded the verdict is vacuously
    /// true.
    pub fn execute_event(&self, type_id: i32, payload: &str) -> bool {
        let Some(event) = EventType::from_id(type_id) else {
            warn!(type_id, "unknown native event id, ignoring");
            return true;
        };
        if event == EventType::Custom {
            warn!("custom events are name-keyed and do not take the numeric path, ignoring");
            return true;
        }

        let _gate = self.gate();
        let mut verdict = true;
        for domain in self.domains.snapshot() {
            let Some(server) = domain.server() else {
                error!(
                    plugin = %domain.meta().display(),
                    domain = %domain.id(),
                    "loaded domain has no server facade, skipping"
                );
                continue;
            };
            let args = match decode_event_args(&self.pools, event, payload) {
                Ok(args) => args,
                Err(err) => {
                    warn!(
                        event = %event,
                        plugin = %domain.meta().display(),
                        error = %err,
                        "payload failed to decode, dispatching with no arguments"
                    );
                    Vec::new()
                }
            };
            if !server.dispatch(&EventKey::Native(event), &args) {
                verdict = false;
            }
        }
        debug!(event = %event, verdict, "event dispatched");
        verdict
    }

    /// Custom event fan-out: same walk and the same AND fold, keyed by name,
    /// with the arguments passed through untouched.
    pub fn call_event(&self, name: &str, args: &[EventArg]) -> bool {
        let _gate = self.gate();
        let key = EventKey::Custom(name.to_string());
        let mut verdict = true;
        for domain in self.domains.snapshot() {
            let Some(server) = domain.server() else {
                error!(
                    plugin = %domain.meta().display(),
                    domain = %domain.id(),
                    "loaded domain has no server facade, skipping"
                );
                continue;
            };
            if !server.dispatch(&key, args) {
                verdict = false;
            }
        }
        debug!(event = %key, verdict, "custom event dispatched");
        verdict
    }

    fn gate(&self) -> ReentrantMutexGuard<'_, ()> {
        self.dispatch_gate.lock()
    }
}
