//! Error types for import sessions and configuration.

use std::path::PathBuf;

use thiserror::Error;

use boq_ingest::IngestError;
use boq_map::MappingError;
use boq_model::ModelError;
use boq_transform::CommitError;

/// Errors loading an [`ImportConfig`](crate::ImportConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

/// Errors surfaced by an [`ImportSession`](crate::ImportSession).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
