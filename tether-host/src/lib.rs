//! Plugin domains, event routing, and the runtime lifecycle of the Tether
//! bridge.
//!
//! A [`Runtime`] is created once per process when the native host loads the
//! bridge. It owns the on-disk layout, the global configuration, the shared
//! entity pools, and the ordered list of plugin domains. Native events enter
//! through [`Runtime::execute_event`], fan out to every domain's [`Server`]
//! facade, and fold the handler verdicts into one boolean the native side
//! acts on.

mod args;
mod config;
mod decode;
mod domain;
mod error;
mod logging;
mod router;
mod runtime;
mod server;

pub use args::EventArg;
pub use config::RuntimeConfig;
pub use decode::{DecodeError, decode_event_args};
pub use domain::{DomainId, DomainManager, PluginDomain, PluginMeta};
pub use error::{HostError, HostResult};
pub use logging::init as init_logging;
pub use router::{EventKey, EventRouter};
pub use runtime::{BridgePaths, Runtime};
pub use server::Server;
