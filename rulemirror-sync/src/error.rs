//! Error types for rulemirror-sync.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from reconciliation operations.
///
/// `DirectoryCreate` and `Write` never escape [`crate::synchronize`]; they
/// are rendered into the failing path's `SaveOutcome`.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No workspace root is available to resolve rule file paths against.
    #[error("no workspace root available; open a folder first")]
    NoRootContext,

    /// An ancestor directory of a rule file could not be created.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rule file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
