//! `rulemirror diff` — unified diffs of what sync would change.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use rulemirror_sync::diff_mirrors;

use super::{load_document, Workspace};

/// Arguments for `rulemirror diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Compare against this file instead of the authoritative rule file.
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,
}

impl DiffArgs {
    pub fn run(self, workspace: &Workspace) -> Result<()> {
        let root = workspace.require_root()?;
        let document = load_document(workspace, self.from.as_deref(), false)?;

        let diffs = diff_mirrors(root, &workspace.config.paths, &document)
            .context("diff failed")?;

        if diffs.is_empty() {
            println!("No differences.");
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
