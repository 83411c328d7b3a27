//! Drift detection across the mirror set.
//!
//! State per path, relative to the authoritative file:
//! 1. `Source` — the authoritative file itself
//! 2. `InSync` — same content (line endings ignored)
//! 3. `Drifted` — readable, different content
//! 4. `Unreadable` — on disk, but its content cannot be read as text
//! 5. `Missing` — absent, or not openable

use std::path::Path;

use serde::Serialize;

use rulemirror_core::RuleFilePath;

use crate::digest::{content_digest, short};
use crate::resolver::resolve;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorState {
    Source,
    InSync,
    Drifted,
    Unreadable,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftEntry {
    pub path: RuleFilePath,
    pub state: MirrorState,
    /// Short content digest; `None` when the file could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftReport {
    pub source: Option<RuleFilePath>,
    pub entries: Vec<DriftEntry>,
}

impl DriftReport {
    /// True when every configured path holds the authoritative content.
    pub fn is_consistent(&self) -> bool {
        self.entries
            .iter()
            .all(|e| matches!(e.state, MirrorState::Source | MirrorState::InSync))
    }

    pub fn drifted(&self) -> impl Iterator<Item = &DriftEntry> {
        self.entries
            .iter()
            .filter(|e| e.state == MirrorState::Drifted)
    }
}

/// Classify every path under `base` against the authoritative file.
pub fn drift(base: &Path, paths: &[RuleFilePath]) -> DriftReport {
    let resolution = resolve(Some(base), paths);
    let wanted = content_digest(&resolution.content);
    let mut source_seen = false;

    let entries = paths
        .iter()
        .zip(&resolution.statuses)
        .map(|(path, status)| {
            if !status.exists {
                return DriftEntry {
                    path: path.clone(),
                    state: MirrorState::Missing,
                    digest: None,
                };
            }
            let is_source = !source_seen && resolution.source.as_ref() == Some(path);
            if is_source {
                source_seen = true;
                return DriftEntry {
                    path: path.clone(),
                    state: MirrorState::Source,
                    digest: Some(short(&wanted).to_string()),
                };
            }
            match std::fs::read_to_string(path.resolve(base)) {
                Ok(text) => {
                    let digest = content_digest(&text);
                    let state = if digest == wanted {
                        MirrorState::InSync
                    } else {
                        MirrorState::Drifted
                    };
                    DriftEntry {
                        path: path.clone(),
                        state,
                        digest: Some(short(&digest).to_string()),
                    }
                }
                Err(err) => {
                    tracing::debug!(path = %path, error = %err, "mirror unreadable");
                    DriftEntry {
                        path: path.clone(),
                        state: MirrorState::Unreadable,
                        digest: None,
                    }
                }
            }
        })
        .collect();

    DriftReport {
        source: resolution.source,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn paths(list: &[&str]) -> Vec<RuleFilePath> {
        list.iter().map(|p| RuleFilePath::from(*p)).collect()
    }

    #[test]
    fn classifies_source_in_sync_drifted_missing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("AGENTS.md"), "v2\n").unwrap();
        fs::write(tmp.path().join("Claude.md"), "v2\r\n").unwrap();
        fs::write(tmp.path().join(".windsurfrules"), "v1\n").unwrap();

        let report = drift(
            tmp.path(),
            &paths(&["AGENTS.md", "Claude.md", ".windsurfrules", ".roo/rules/rules.md"]),
        );

        let states: Vec<MirrorState> = report.entries.iter().map(|e| e.state).collect();
        assert_eq!(
            states,
            vec![
                MirrorState::Source,
                MirrorState::InSync,
                MirrorState::Drifted,
                MirrorState::Missing
            ]
        );
        assert_eq!(report.source, Some(RuleFilePath::from("AGENTS.md")));
        assert!(!report.is_consistent());
        assert_eq!(report.drifted().count(), 1);
    }

    #[test]
    fn duplicate_source_path_is_in_sync() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("AGENTS.md"), "x").unwrap();

        let report = drift(tmp.path(), &paths(&["AGENTS.md", "AGENTS.md"]));
        assert_eq!(report.entries[0].state, MirrorState::Source);
        assert_eq!(report.entries[1].state, MirrorState::InSync);
        assert!(report.is_consistent());
    }

    #[test]
    fn binary_mirror_after_source_is_unreadable() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("AGENTS.md"), "rules").unwrap();
        fs::write(tmp.path().join("Claude.md"), [0xff, 0xfe, 0x00]).unwrap();

        let list = paths(&["AGENTS.md", "Claude.md"]);
        let report = drift(tmp.path(), &list);
        let statuses = resolve(Some(tmp.path()), &list).statuses;

        assert!(statuses[1].exists, "file is on disk and openable");
        assert_eq!(report.entries[1].state, MirrorState::Unreadable);
        assert!(report.entries[1].digest.is_none());
        assert!(!report.is_consistent());
    }

    #[test]
    fn nothing_on_disk_is_all_missing() {
        let tmp = TempDir::new().unwrap();
        let report = drift(tmp.path(), &paths(&["AGENTS.md", "Claude.md"]));
        assert!(report.source.is_none());
        assert!(report.entries.iter().all(|e| e.state == MirrorState::Missing));
    }
}
