//! Unified diffs between the document and each mirror on disk.

use std::io::ErrorKind;
use std::path::Path;

use similar::TextDiff;

use rulemirror_core::RuleFilePath;

use crate::{digest::normalize_line_endings, error::io_err, SyncError};

/// A single mirror diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: RuleFilePath,
    pub unified_diff: String,
}

/// Compare `content` to every mirror under `base`. Mirrors that already hold
/// the content (line endings ignored) are omitted; missing files diff against
/// the empty string.
///
/// No files are written.
pub fn diff_mirrors(
    base: &Path,
    paths: &[RuleFilePath],
    content: &str,
) -> Result<Vec<FileDiff>, SyncError> {
    let wanted = normalize_line_endings(content);
    let mut diffs = Vec::new();

    for path in paths {
        let existing = read_existing_or_empty(&path.resolve(base))?;
        if existing == wanted {
            continue;
        }

        let old_header = format!("a/{path}");
        let new_header = format!("b/{path}");
        let unified = TextDiff::from_lines(&existing, &wanted)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            path: path.clone(),
            unified_diff: unified,
        });
    }

    Ok(diffs)
}

fn read_existing_or_empty(path: &Path) -> Result<String, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(normalize_line_endings(&content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}
