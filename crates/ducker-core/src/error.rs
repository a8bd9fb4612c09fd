//! Error types for ducker-core.

use thiserror::Error;

/// Error type for ducker-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unsupported channel count: {0}. Must be between 1 and {max}", max = crate::MAX_AUDIO_CHANNELS)]
    UnsupportedChannelCount(usize),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors from filter registry operations.
#[derive(Error, Debug)]
pub enum FilterRegistryError {
    #[error("Unknown filter type: {0}")]
    UnknownFilterType(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{0}': {1}")]
    InvalidParameter(String, String),

    #[error("Filter construction failed: {0}")]
    ConstructionFailed(String),
}
