//! `rulemirror status` — per-file existence, age and drift.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use rulemirror_core::FileStatus;
use rulemirror_sync::{drift, resolve, DriftEntry, MirrorState};

use super::Workspace;

/// Arguments for `rulemirror status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self, workspace: &Workspace) -> Result<()> {
        let root = workspace.require_root()?;
        let paths = &workspace.config.paths;

        let resolution = resolve(Some(root), paths);
        let report = drift(root, paths);
        let rows: Vec<FileRow> = resolution
            .statuses
            .iter()
            .zip(&report.entries)
            .map(|(status, entry)| FileRow::new(status, entry))
            .collect();

        if self.json {
            let payload = StatusJson {
                root: root.display().to_string(),
                config: workspace.describe_source(),
                source: resolution.source.as_ref().map(|p| p.to_string()),
                consistent: report.is_consistent(),
                files: rows,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
            );
            return Ok(());
        }

        print_table(
            workspace,
            resolution.source.as_ref().map(|p| p.as_str()),
            report.is_consistent(),
            rows,
        );
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct StatusJson {
    root: String,
    config: String,
    source: Option<String>,
    consistent: bool,
    files: Vec<FileRow>,
}

#[derive(Debug, Serialize)]
struct FileRow {
    path: String,
    exists: bool,
    last_modified: Option<DateTime<Utc>>,
    state: MirrorState,
    digest: Option<String>,
}

impl FileRow {
    fn new(status: &FileStatus, entry: &DriftEntry) -> Self {
        Self {
            path: status.path.to_string(),
            exists: status.exists,
            last_modified: status.last_modified,
            state: entry.state,
            digest: entry.digest.clone(),
        }
    }
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "#")]
    priority: usize,
    #[tabled(rename = "path")]
    path: String,
    #[tabled(rename = "state")]
    state: String,
    #[tabled(rename = "modified")]
    modified: String,
    #[tabled(rename = "digest")]
    digest: String,
}

fn print_table(workspace: &Workspace, source: Option<&str>, consistent: bool, rows: Vec<FileRow>) {
    println!(
        "rulemirror v{} | {} rule files | list: {}",
        env!("CARGO_PKG_VERSION"),
        rows.len(),
        workspace.describe_source(),
    );

    if rows.is_empty() {
        println!("No rule files configured. Run: rulemirror paths add <path>");
        return;
    }

    match source {
        Some(path) => println!("Authoritative: {}", path.bold()),
        None => println!("Authoritative: {}", "none (no rule file exists)".bright_black()),
    }

    let table_rows: Vec<StatusTableRow> = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| StatusTableRow {
            priority: index + 1,
            path: row.path,
            state: state_label(row.state),
            modified: row
                .last_modified
                .map(format_age)
                .unwrap_or_else(|| "-".to_string()),
            digest: row.digest.unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    if !consistent {
        println!("Run 'rulemirror sync' to bring every rule file in line.");
    }
}

fn state_label(state: MirrorState) -> String {
    match state {
        MirrorState::Source => "SOURCE".green().bold().to_string(),
        MirrorState::InSync => "IN SYNC".green().to_string(),
        MirrorState::Drifted => "DRIFTED".red().bold().to_string(),
        MirrorState::Unreadable => "UNREADABLE".magenta().to_string(),
        MirrorState::Missing => "MISSING".yellow().to_string(),
    }
}

/// Age of a timestamp as `"<n><unit> ago"`.
fn format_age(timestamp: DateTime<Utc>) -> String {
    let seconds = Utc::now()
        .signed_duration_since(timestamp)
        .num_seconds()
        .max(0) as u64;
    format!("{} ago", format_seconds(seconds))
}

fn format_seconds(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }
    if seconds < 60 * 60 {
        return format!("{}m", seconds / 60);
    }
    if seconds < 60 * 60 * 24 {
        return format!("{}h", seconds / (60 * 60));
    }
    format!("{}d", seconds / (60 * 60 * 24))
}
