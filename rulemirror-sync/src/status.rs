//! Per-path existence and modification probes.
//!
//! A rule file "exists" only when it is a regular file the current process
//! can open for reading. Anything else (absent, a directory, permission
//! denied) is reported as absent.

use std::fs::{self, File, Metadata};
use std::io::{self, ErrorKind};
use std::path::Path;

use chrono::{DateTime, Utc};

use rulemirror_core::{FileStatus, RuleFilePath};

/// Raw probe result for one resolved location.
#[derive(Debug)]
pub(crate) enum Probe {
    Missing,
    Unreadable(io::Error),
    Readable(Metadata),
}

pub(crate) fn probe_location(location: &Path) -> Probe {
    let meta = match fs::metadata(location) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => return Probe::Missing,
        Err(err) => return Probe::Unreadable(err),
    };
    if !meta.is_file() {
        return Probe::Unreadable(io::Error::new(
            ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    match File::open(location) {
        Ok(_) => Probe::Readable(meta),
        Err(err) => Probe::Unreadable(err),
    }
}

/// Status of `path` resolved under `base`.
pub fn probe(base: &Path, path: &RuleFilePath) -> FileStatus {
    let location = path.resolve(base);
    match probe_location(&location) {
        Probe::Readable(meta) => FileStatus::present(path.clone(), modified_at(&meta)),
        Probe::Missing => FileStatus::absent(path.clone()),
        Probe::Unreadable(err) => {
            tracing::debug!(path = %location.display(), error = %err, "rule file unreadable");
            FileStatus::absent(path.clone())
        }
    }
}

/// Modification time as UTC, when the platform reports one.
pub fn modified_at(meta: &Metadata) -> Option<DateTime<Utc>> {
    meta.modified().ok().map(DateTime::<Utc>::from)
}
