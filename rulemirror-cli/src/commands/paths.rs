//! `rulemirror paths list|add|remove`

use anyhow::{Context, Result};
use clap::Subcommand;

use rulemirror_core::{config, ConfigError, MirrorConfig};

use super::Workspace;

/// Edit the ordered rule file list. Changes are saved to the workspace
/// `.rulemirror.yaml`.
#[derive(Subcommand, Debug)]
pub enum PathsCommand {
    /// List rule files in priority order.
    List,

    /// Append a rule file at the lowest priority.
    Add {
        /// Path relative to the workspace root (e.g. "GEMINI.md").
        path: String,
    },

    /// Remove a rule file from the list. The file itself is left alone.
    Remove {
        path: String,
    },
}

pub fn run(cmd: PathsCommand, workspace: &Workspace) -> Result<()> {
    match cmd {
        PathsCommand::List => list(workspace),
        PathsCommand::Add { path } => edit(workspace, |cfg| cfg.add_path(&path), "Added", &path),
        PathsCommand::Remove { path } => {
            edit(workspace, |cfg| cfg.remove_path(&path), "Removed", &path)
        }
    }
}

fn list(workspace: &Workspace) -> Result<()> {
    println!("Rule files ({}):", workspace.describe_source());
    if workspace.config.paths.is_empty() {
        println!("  (none)");
        println!("Run: rulemirror paths add <path>");
        return Ok(());
    }
    for (index, path) in workspace.config.paths.iter().enumerate() {
        println!("  {}. {path}", index + 1);
    }
    Ok(())
}

fn edit(
    workspace: &Workspace,
    change: impl FnOnce(&mut MirrorConfig) -> Result<(), ConfigError>,
    verb: &str,
    path: &str,
) -> Result<()> {
    let root = workspace.require_root()?;
    let mut updated = workspace.config.clone();
    change(&mut updated)?;
    let saved = config::save_at(root, &updated)
        .with_context(|| format!("failed to save {}", config::config_path_at(root).display()))?;
    println!(
        "✓ {verb} '{path}' ({} rule files, saved to {})",
        updated.paths.len(),
        saved.display()
    );
    Ok(())
}
