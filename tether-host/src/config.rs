//! Runtime configuration.
//!
//! Lives at `{server}/tether/data/global.toml`. Loaded when present; the
//! default file is written out on first load so operators always have
//! something concrete to edit.

use crate::error::HostResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Global bridge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Enables debug-level logging.
    #[serde(default)]
    pub is_debug: bool,
    /// Runs the native refresh round-trip on entity snapshots. Turn off
    /// when this bridge is the only scripting environment in the server.
    #[serde(default = "default_entity_refreshing")]
    pub entity_refreshing: bool,
}

fn default_entity_refreshing() -> bool {
    true
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            is_debug: false,
            entity_refreshing: true,
        }
    }
}

impl RuntimeConfig {
    /// Loads the config at `path`, writing and returning the default when no
    /// file exists yet. A present-but-broken file is an error; operator
    /// edits are never overwritten with defaults.
    pub fn load_or_create(path: &Path) -> HostResult<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let config = Self::default();
            fs::write(path, toml::to_string_pretty(&config)?)?;
            Ok(config)
        }
    }
}
