//! Error types surfaced by the catalog core.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by catalog reads, mutations and persistence.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field was missing or empty. Recoverable at the boundary.
    #[error("{0}")]
    Validation(String),

    /// No listing exists for the given slug.
    #[error("no listing with slug `{0}`")]
    NotFound(String),

    /// The collection changed in memory but could not be written to disk.
    #[error("failed to persist catalog to {}: {source}", path.display())]
    Persistence {
        /// Backing file that could not be written.
        path: PathBuf,
        /// Underlying I/O or serialization failure.
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be read or violates the listing invariants.
    #[error("failed to load catalog from {}: {reason}", path.display())]
    Load {
        /// Backing file that was being read.
        path: PathBuf,
        /// Human-readable cause.
        reason: String,
    },
}

impl CatalogError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = Result<T, CatalogError>;
