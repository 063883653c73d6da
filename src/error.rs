use crate::config::ConfigError;
use crate::storage::StorageError;
use thiserror::Error;

/// Top-level error for the binary and the demo run.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
