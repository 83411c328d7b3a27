//! rulemirror core library — value types, path-list config, errors.
//!
//! Public API surface:
//! - [`types`] — [`RuleFilePath`], [`FileStatus`], [`SaveOutcome`], [`Document`]
//! - [`error`] — [`ConfigError`]
//! - [`config`] — load / save / seed the ordered path list

pub mod config;
pub mod error;
pub mod types;

pub use config::MirrorConfig;
pub use error::ConfigError;
pub use types::{Document, FileStatus, RuleFilePath, SaveOutcome};
