//! Error types for rulemirror-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from path-list configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, disk full, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes the config file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// A rule file path that cannot live under the workspace root.
    #[error("invalid rule file path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// The path is already part of the configured list.
    #[error("rule file path '{path}' is already configured")]
    DuplicatePath { path: String },

    /// The path is not part of the configured list.
    #[error("rule file path '{path}' is not configured")]
    UnknownPath { path: String },
}
