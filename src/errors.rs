use thiserror::Error;

use dinario_config::ConfigError;
use dinario_core::CoreError;

/// Error type returned by the tracker facade.
#[derive(Debug, Error)]
pub enum DinarioError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl DinarioError {
    /// True when the failure came from rejected user input rather than storage.
    pub fn is_validation(&self) -> bool {
        matches!(self, DinarioError::Core(err) if err.is_validation())
    }
}

pub type Result<T> = std::result::Result<T, DinarioError>;
