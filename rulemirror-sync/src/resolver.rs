//! Authoritative-file resolution.
//!
//! The first path in list order that is an existing, readable UTF-8 file
//! wins. Its content is taken as-is; later files are never compared or
//! merged. Every path still gets a [`FileStatus`], in input order.

use std::path::Path;

use serde::Serialize;

use rulemirror_core::{FileStatus, RuleFilePath};

use crate::status::{modified_at, probe, probe_location, Probe};

/// Result of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Resolution {
    /// Content of the authoritative file, or empty when none exists.
    pub content: String,
    /// The authoritative path, if any file won.
    pub source: Option<RuleFilePath>,
    /// One entry per input path, same order.
    pub statuses: Vec<FileStatus>,
}

impl Resolution {
    /// The defined result for a missing workspace root.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Resolve the authoritative content and per-path status under `base`.
///
/// Read-only. A `None` base yields [`Resolution::empty`].
pub fn resolve(base: Option<&Path>, paths: &[RuleFilePath]) -> Resolution {
    let Some(base) = base else {
        tracing::debug!("no workspace root; returning empty resolution");
        return Resolution::empty();
    };

    let mut content = String::new();
    let mut source = None;
    let mut statuses = Vec::with_capacity(paths.len());

    for path in paths {
        if source.is_some() {
            statuses.push(probe(base, path));
            continue;
        }

        let location = path.resolve(base);
        let meta = match probe_location(&location) {
            Probe::Readable(meta) => meta,
            Probe::Missing => {
                statuses.push(FileStatus::absent(path.clone()));
                continue;
            }
            Probe::Unreadable(err) => {
                tracing::debug!(path = %location.display(), error = %err, "rule file unreadable");
                statuses.push(FileStatus::absent(path.clone()));
                continue;
            }
        };

        match std::fs::read_to_string(&location) {
            Ok(text) => {
                tracing::debug!(path = %path, "authoritative rule file");
                content = text;
                source = Some(path.clone());
                statuses.push(FileStatus::present(path.clone(), modified_at(&meta)));
            }
            Err(err) => {
                // Includes non-UTF-8 content; the scan moves on.
                tracing::debug!(path = %location.display(), error = %err, "rule file unreadable");
                statuses.push(FileStatus::absent(path.clone()));
            }
        }
    }

    Resolution {
        content,
        source,
        statuses,
    }
}
