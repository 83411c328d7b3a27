//! `rulemirror show` — print the authoritative document.

use anyhow::Result;
use clap::Args;

use rulemirror_sync::resolve;

use super::Workspace;

/// Arguments for `rulemirror show`.
#[derive(Args, Debug)]
pub struct ShowArgs {}

impl ShowArgs {
    pub fn run(self, workspace: &Workspace) -> Result<()> {
        let resolution = resolve(workspace.root(), &workspace.config.paths);
        match &resolution.source {
            Some(path) => tracing::info!("showing {path}"),
            None => eprintln!("No rule file exists yet."),
        }
        print!("{}", resolution.content);
        Ok(())
    }
}
