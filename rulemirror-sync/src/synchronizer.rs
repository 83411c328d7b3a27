//! Fan-out writer.
//!
//! Every configured path is processed independently:
//!
//! 1. Resolve the path under the workspace root.
//! 2. `create_dir_all` the parent chain.
//! 3. Write the full content (in place, or via `<path>.rulemirror.tmp` +
//!    rename in [`WriteMode::Atomic`]).
//! 4. Record a [`SaveOutcome`].
//!
//! A failing path is recorded and the loop moves on. Files already written
//! are not rolled back.

use std::path::{Path, PathBuf};

use rulemirror_core::{RuleFilePath, SaveOutcome};

use crate::error::SyncError;

/// How each rule file is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Truncate and write the target directly. Follows symlinks.
    #[default]
    InPlace,
    /// Write a sibling `.rulemirror.tmp` file, then rename it over the target.
    Atomic,
}

/// Options for [`synchronize_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    pub mode: WriteMode,
}

/// Write `content` to every path under `base` with default options.
///
/// Returns [`SyncError::NoRootContext`] without touching the file system
/// when `base` is `None`; otherwise one outcome per path, in input order.
pub fn synchronize(
    base: Option<&Path>,
    paths: &[RuleFilePath],
    content: &str,
) -> Result<Vec<SaveOutcome>, SyncError> {
    synchronize_with(base, paths, content, &SyncOptions::default())
}

/// [`synchronize`] with an explicit write mode.
pub fn synchronize_with(
    base: Option<&Path>,
    paths: &[RuleFilePath],
    content: &str,
    options: &SyncOptions,
) -> Result<Vec<SaveOutcome>, SyncError> {
    let base = base.ok_or(SyncError::NoRootContext)?;

    let outcomes = paths
        .iter()
        .map(|path| match write_one(&path.resolve(base), content, options.mode) {
            Ok(()) => {
                tracing::info!("wrote: {path}");
                SaveOutcome::succeeded(path.clone())
            }
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "rule file write failed");
                SaveOutcome::failed(path.clone(), err)
            }
        })
        .collect();

    Ok(outcomes)
}

fn write_one(location: &Path, content: &str, mode: WriteMode) -> Result<(), SyncError> {
    if let Some(parent) = location.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SyncError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    match mode {
        WriteMode::InPlace => std::fs::write(location, content).map_err(|e| write_err(location, e)),
        WriteMode::Atomic => {
            let tmp = tmp_path(location);
            write_via_tmp(location, content, &tmp)
        }
    }
}

fn write_via_tmp(location: &Path, content: &str, tmp: &Path) -> Result<(), SyncError> {
    std::fs::write(tmp, content).map_err(|e| write_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, location) {
        let _ = std::fs::remove_file(tmp);
        return Err(write_err(location, e));
    }
    Ok(())
}

fn tmp_path(location: &Path) -> PathBuf {
    PathBuf::from(format!("{}.rulemirror.tmp", location.display()))
}

fn write_err(path: &Path, source: std::io::Error) -> SyncError {
    SyncError::Write {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn paths(list: &[&str]) -> Vec<RuleFilePath> {
        list.iter().map(|p| RuleFilePath::from(*p)).collect()
    }

    #[test]
    fn no_root_fails_fast() {
        let err = synchronize(None, &paths(&["AGENTS.md"]), "x").unwrap_err();
        assert!(matches!(err, SyncError::NoRootContext));
    }

    #[test]
    fn empty_path_list_yields_no_outcomes() {
        let tmp = TempDir::new().unwrap();
        let outcomes = synchronize(Some(tmp.path()), &[], "x").unwrap();
        assert!(outcomes.is_empty());
    }

    #[test]
    fn writes_every_path_and_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let list = paths(&["AGENTS.md", ".cursor/rules/project-rules.mdc", ".roo/rules/rules.md"]);

        let outcomes = synchronize(Some(tmp.path()), &list, "# Rules\n").unwrap();

        assert_eq!(outcomes.len(), 3);
        for (outcome, path) in outcomes.iter().zip(&list) {
            assert_eq!(&outcome.path, path);
            assert!(outcome.success, "{path} failed: {:?}", outcome.error);
            let disk = fs::read_to_string(path.resolve(tmp.path())).unwrap();
            assert_eq!(disk, "# Rules\n");
        }
    }

    #[test]
    fn replaces_rather_than_appends() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("Claude.md");
        fs::write(&target, "a much longer previous body of text").unwrap();

        synchronize(Some(tmp.path()), &paths(&["Claude.md"]), "short").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "short");
    }

    #[test]
    fn content_is_written_byte_for_byte() {
        let tmp = TempDir::new().unwrap();
        synchronize(Some(tmp.path()), &paths(&["AGENTS.md"]), "a\r\nb\r\n").unwrap();
        assert_eq!(
            fs::read(tmp.path().join("AGENTS.md")).unwrap(),
            b"a\r\nb\r\n".to_vec()
        );
    }

    #[test]
    fn directory_create_failure_is_per_path() {
        let tmp = TempDir::new().unwrap();
        // A regular file where a parent directory is needed.
        fs::write(tmp.path().join(".cursor"), "not a dir").unwrap();

        let list = paths(&["AGENTS.md", ".cursor/rules/project-rules.mdc", "Claude.md"]);
        let outcomes = synchronize(Some(tmp.path()), &list, "body").unwrap();

        assert!(outcomes[0].success);
        assert!(!outcomes[1].success);
        let message = outcomes[1].error.as_deref().unwrap();
        assert!(message.contains("failed to create directory"), "got: {message}");
        assert!(outcomes[2].success);
        assert_eq!(fs::read_to_string(tmp.path().join("Claude.md")).unwrap(), "body");
    }

    #[test]
    fn atomic_mode_leaves_no_tmp_file() {
        let tmp = TempDir::new().unwrap();
        let options = SyncOptions {
            mode: WriteMode::Atomic,
        };
        let outcomes =
            synchronize_with(Some(tmp.path()), &paths(&["AGENTS.md"]), "atomic", &options).unwrap();
        assert!(outcomes[0].success);

        let target = tmp.path().join("AGENTS.md");
        assert_eq!(fs::read_to_string(&target).unwrap(), "atomic");
        assert!(!tmp_path(&target).exists(), ".rulemirror.tmp must be cleaned up");
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("file.md");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp = tmp_dir.path().join("file.md.rulemirror.tmp");

        let result = write_via_tmp(&path, "new content", &tmp);

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // Privileged users bypass directory permissions.
        if result.is_ok() {
            return;
        }
        assert!(matches!(result, Err(SyncError::Write { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        assert!(!tmp.exists(), ".rulemirror.tmp should be cleaned up");
    }
}
