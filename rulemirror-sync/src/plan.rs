//! Dry-run planning: what [`crate::synchronize`] would do to each path.

use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;

use rulemirror_core::RuleFilePath;

use crate::digest::content_digest;

/// Planned effect of a sync on one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannedAction {
    /// The file does not exist yet.
    Create,
    /// The file exists with different (or unreadable) content.
    Update,
    /// The file already holds the document.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedWrite {
    pub path: RuleFilePath,
    pub action: PlannedAction,
}

/// Plan a sync of `content` to every path under `base`. Never writes.
pub fn plan(base: &Path, paths: &[RuleFilePath], content: &str) -> Vec<PlannedWrite> {
    let wanted = content_digest(content);
    paths
        .iter()
        .map(|path| {
            let location = path.resolve(base);
            let action = match std::fs::read_to_string(&location) {
                Ok(existing) if content_digest(&existing) == wanted => PlannedAction::Unchanged,
                Ok(_) => PlannedAction::Update,
                Err(err) if err.kind() == ErrorKind::NotFound => PlannedAction::Create,
                Err(err) => {
                    tracing::debug!(path = %location.display(), error = %err, "unreadable; planning update");
                    PlannedAction::Update
                }
            };
            tracing::debug!(path = %path, ?action, "[dry-run] planned");
            PlannedWrite {
                path: path.clone(),
                action,
            }
        })
        .collect()
}
