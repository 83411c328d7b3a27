//! Value types shared by the resolver, the synchronizer and their callers.
//!
//! Every type here is transient: produced fresh on each call, never
//! persisted by the core. Filesystem locations are `PathBuf`; the configured
//! rule file entries stay workspace-relative strings until resolved.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A workspace-relative rule file path. Position in a list encodes priority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleFilePath(pub String);

impl RuleFilePath {
    /// Absolute location of this rule file under `base`.
    pub fn resolve(&self, base: &Path) -> PathBuf {
        base.join(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RuleFilePath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RuleFilePath {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The shared text being edited between a resolve and the next synchronize.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Document(pub String);

impl Document {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Per-path results
// ---------------------------------------------------------------------------

/// Existence and modification time of one configured rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStatus {
    pub path: RuleFilePath,
    pub exists: bool,
    /// `Some` only when `exists` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl FileStatus {
    pub fn present(path: RuleFilePath, last_modified: Option<DateTime<Utc>>) -> Self {
        Self {
            path,
            exists: true,
            last_modified,
        }
    }

    pub fn absent(path: RuleFilePath) -> Self {
        Self {
            path,
            exists: false,
            last_modified: None,
        }
    }
}

/// Result of writing the document to one rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveOutcome {
    pub path: RuleFilePath,
    pub success: bool,
    /// Human-readable failure message; `Some` iff `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveOutcome {
    pub fn succeeded(path: RuleFilePath) -> Self {
        Self {
            path,
            success: true,
            error: None,
        }
    }

    pub fn failed(path: RuleFilePath, error: impl fmt::Display) -> Self {
        Self {
            path,
            success: false,
            error: Some(error.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
