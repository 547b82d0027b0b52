//! Error types for the host runtime.

use thiserror::Error;

/// Result alias for runtime lifecycle operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors surfaced while bringing the runtime up or touching its config.
///
/// Dispatch never produces these. Handler failures are contained per domain
/// and folded into the verdict instead of propagating.
#[derive(Debug, Error)]
pub enum HostError {
    /// Creating the bridge directory layout or reading a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file exists but does not parse.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The default config could not be encoded for its first write.
    #[error("config encode error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),
}
