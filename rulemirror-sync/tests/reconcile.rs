use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use filetime::{set_file_mtime, FileTime};
use rstest::rstest;
use rulemirror_core::{config::DEFAULT_PATHS, RuleFilePath};
use rulemirror_sync::{resolve, synchronize, SyncError, SyncSummary};
use tempfile::TempDir;

fn default_paths() -> Vec<RuleFilePath> {
    DEFAULT_PATHS.iter().map(|p| RuleFilePath::from(*p)).collect()
}

fn write(base: &Path, rel: &str, content: &str) {
    let path = base.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write");
}

#[rstest]
#[case::first(&["AGENTS.md"], "AGENTS.md")]
#[case::middle(&[".cursor/rules/project-rules.mdc", ".windsurfrules"], ".cursor/rules/project-rules.mdc")]
#[case::last(&[".windsurfrules"], ".windsurfrules")]
fn resolve_picks_first_existing_in_list_order(#[case] present: &[&str], #[case] winner: &str) {
    let workspace = TempDir::new().expect("workspace");
    for rel in present {
        write(workspace.path(), rel, &format!("content of {rel}"));
    }

    let paths = default_paths();
    let resolution = resolve(Some(workspace.path()), &paths);

    assert_eq!(resolution.content, format!("content of {winner}"));
    assert_eq!(resolution.source, Some(RuleFilePath::from(winner)));
    assert_eq!(resolution.statuses.len(), paths.len());
    for (status, path) in resolution.statuses.iter().zip(&paths) {
        assert_eq!(&status.path, path);
        assert_eq!(status.exists, present.contains(&path.as_str()));
    }
}

#[test]
fn status_reports_file_mtime() {
    let workspace = TempDir::new().expect("workspace");
    write(workspace.path(), "Claude.md", "rules");

    let when = SystemTime::now() - Duration::from_secs(24 * 60 * 60);
    set_file_mtime(workspace.path().join("Claude.md"), FileTime::from_system_time(when))
        .expect("set mtime");

    let resolution = resolve(Some(workspace.path()), &default_paths());
    let status = &resolution.statuses[1];
    assert!(status.exists);
    let reported = status.last_modified.expect("timestamp");
    assert_eq!(reported.timestamp(), DateTime::<Utc>::from(when).timestamp());
}

#[test]
fn sync_then_resolve_round_trips() {
    let workspace = TempDir::new().expect("workspace");
    let paths = default_paths();
    write(workspace.path(), ".windsurfrules", "stale");

    let outcomes = synchronize(Some(workspace.path()), &paths, "# Shared rules\n").expect("sync");
    assert_eq!(outcomes.len(), paths.len());
    assert!(outcomes.iter().all(|o| o.success));

    let resolution = resolve(Some(workspace.path()), &paths);
    assert_eq!(resolution.content, "# Shared rules\n");
    assert!(resolution.statuses.iter().all(|s| s.exists));
    for path in &paths {
        assert_eq!(
            fs::read_to_string(path.resolve(workspace.path())).expect("read"),
            "# Shared rules\n"
        );
    }
}

#[test]
fn sync_then_resolve_round_trips_multibyte_utf8() {
    let workspace = TempDir::new().expect("workspace");
    let paths = default_paths();
    let content = "règles — ✓\n";

    let outcomes = synchronize(Some(workspace.path()), &paths, content).expect("sync");
    assert!(outcomes.iter().all(|o| o.success));

    let resolution = resolve(Some(workspace.path()), &paths);
    assert_eq!(resolution.content, content);
    for path in &paths {
        let bytes = fs::read(path.resolve(workspace.path())).expect("read");
        assert_eq!(bytes, content.as_bytes(), "{path} bytes differ");
    }
}

#[test]
fn sync_is_idempotent() {
    let workspace = TempDir::new().expect("workspace");
    let paths = default_paths();

    let first = synchronize(Some(workspace.path()), &paths, "same").expect("first");
    let second = synchronize(Some(workspace.path()), &paths, "same").expect("second");

    assert_eq!(first, second);
    assert!(second.iter().all(|o| o.success));
}

#[test]
fn no_root_writes_nothing() {
    let err = synchronize(None, &default_paths(), "x").unwrap_err();
    assert!(matches!(err, SyncError::NoRootContext));
    assert!(err.to_string().contains("no workspace root"));

    let resolution = resolve(None, &default_paths());
    assert_eq!(resolution.content, "");
    assert!(resolution.statuses.is_empty());
}

#[test]
#[cfg(unix)]
fn failing_middle_path_does_not_stop_siblings() {
    use std::os::unix::fs::PermissionsExt;

    let workspace = TempDir::new().expect("workspace");
    let locked = workspace.path().join("locked");
    fs::create_dir_all(&locked).expect("mkdir");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).expect("chmod");

    // Privileged users bypass directory permissions.
    let probe = locked.join(".probe");
    if fs::write(&probe, "").is_ok() {
        let _ = fs::remove_file(&probe);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod");
        return;
    }

    let paths: Vec<RuleFilePath> = ["AGENTS.md", "locked/Claude.md", ".windsurfrules"]
        .into_iter()
        .map(RuleFilePath::from)
        .collect();
    write(workspace.path(), "AGENTS.md", "old");

    let outcomes = synchronize(Some(workspace.path()), &paths, "new").expect("sync");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod");

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].success);
    assert!(!outcomes[1].success);
    assert!(outcomes[1]
        .error
        .as_deref()
        .expect("error message")
        .contains("failed to write"));
    assert!(outcomes[2].success);

    assert_eq!(fs::read_to_string(workspace.path().join("AGENTS.md")).unwrap(), "new");
    assert_eq!(fs::read_to_string(workspace.path().join(".windsurfrules")).unwrap(), "new");

    let summary = SyncSummary::from_outcomes(&outcomes);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures[0].0, RuleFilePath::from("locked/Claude.md"));
}
