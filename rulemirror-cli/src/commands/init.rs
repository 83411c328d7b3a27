//! `rulemirror init [--force] [--user]`

use anyhow::{bail, Context, Result};
use clap::Args;

use rulemirror_core::{config, MirrorConfig};

use super::Workspace;

/// Write the default rule file list.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,

    /// Write the user-level default (~/.rulemirror/config.yaml) instead of
    /// the workspace `.rulemirror.yaml`.
    #[arg(long)]
    pub user: bool,
}

impl InitArgs {
    pub fn run(self, workspace: &Workspace) -> Result<()> {
        let defaults = MirrorConfig::default();

        let saved = if self.user {
            let target = config::user_config_path().context("failed to locate user config")?;
            if target.exists() && !self.force {
                bail!(
                    "{} already exists; pass --force to overwrite",
                    target.display()
                );
            }
            config::save_user(&defaults)
                .with_context(|| format!("failed to write {}", target.display()))?
        } else {
            let root = workspace.require_root()?;
            let target = config::config_path_at(root);
            if target.exists() && !self.force {
                bail!(
                    "{} already exists; pass --force to overwrite",
                    target.display()
                );
            }
            config::save_at(root, &defaults)
                .with_context(|| format!("failed to write {}", target.display()))?
        };

        println!("✓ Wrote {}", saved.display());
        for (index, path) in defaults.paths.iter().enumerate() {
            println!("  {}. {path}", index + 1);
        }
        Ok(())
    }
}
