//! `rulemirror sync` — write one document to every rule file.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use rulemirror_core::SaveOutcome;
use rulemirror_sync::{
    plan, synchronize_with, PlannedAction, PlannedWrite, SyncOptions, SyncSummary, WriteMode,
};

use super::{load_document, Workspace};

/// Arguments for `rulemirror sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Read the document from this file instead of the authoritative rule file.
    #[arg(long, value_name = "FILE", conflicts_with = "stdin")]
    pub from: Option<PathBuf>,

    /// Read the document from standard input.
    #[arg(long)]
    pub stdin: bool,

    /// Show what would be written without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Replace each file via a temporary sibling and rename.
    #[arg(long)]
    pub atomic: bool,
}

impl SyncArgs {
    pub fn run(self, workspace: &Workspace) -> Result<()> {
        let document = load_document(workspace, self.from.as_deref(), self.stdin)?;
        let paths = &workspace.config.paths;

        if self.dry_run {
            let root = workspace.require_root()?;
            print_plan(&plan(root, paths, &document));
            return Ok(());
        }

        let options = SyncOptions {
            mode: if self.atomic {
                WriteMode::Atomic
            } else {
                WriteMode::InPlace
            },
        };
        let outcomes = synchronize_with(workspace.root(), paths, &document, &options)?;
        let summary = SyncSummary::from_outcomes(&outcomes);
        print_outcomes(&outcomes, &summary);

        if !summary.is_success() {
            bail!("sync incomplete: {summary}");
        }
        Ok(())
    }
}

fn print_plan(planned: &[PlannedWrite]) {
    let changes = planned
        .iter()
        .filter(|p| p.action != PlannedAction::Unchanged)
        .count();
    println!("[dry-run] {changes} of {} rule files would change", planned.len());
    for entry in planned {
        let marker = match entry.action {
            PlannedAction::Create => "+",
            PlannedAction::Update => "~",
            PlannedAction::Unchanged => "·",
        };
        println!("  {marker}  {}", entry.path);
    }
}

fn print_outcomes(outcomes: &[SaveOutcome], summary: &SyncSummary) {
    let headline = format!("synced {} rule files ({summary})", outcomes.len());
    if summary.is_success() {
        println!("{} {headline}", "✓".green());
    } else {
        println!("{} {headline}", "✗".red());
    }

    for outcome in outcomes {
        match &outcome.error {
            None => println!("  ✎  {}", outcome.path),
            Some(error) => println!("  {}  {}: {error}", "!".red().bold(), outcome.path),
        }
    }
}
