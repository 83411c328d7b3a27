//! Subcommands and the workspace context they share.

pub mod diff;
pub mod init;
pub mod paths;
pub mod show;
pub mod status;
pub mod sync;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use rulemirror_core::{
    config::{self, ConfigSource},
    MirrorConfig,
};
use rulemirror_sync::resolve;

/// Root directory plus the effective rule file list.
#[derive(Debug)]
pub struct Workspace {
    /// `None` when neither `--root` nor the current directory is usable.
    pub root: Option<PathBuf>,
    pub config: MirrorConfig,
    pub source: ConfigSource,
}

impl Workspace {
    pub fn open(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(dir) => Some(
                dir.canonicalize()
                    .with_context(|| format!("cannot resolve root '{}'", dir.display()))?,
            ),
            None => std::env::current_dir().ok(),
        };

        let (config, source) = match root.as_deref() {
            Some(dir) => config::load(dir).context("failed to load rule file list")?,
            None => (MirrorConfig::default(), ConfigSource::Default),
        };

        Ok(Self {
            root,
            config,
            source,
        })
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn require_root(&self) -> Result<&Path> {
        self.root()
            .context("no workspace root available; pass --root <dir>")
    }

    pub fn describe_source(&self) -> String {
        match &self.source {
            ConfigSource::Workspace(path) | ConfigSource::User(path) => {
                path.display().to_string()
            }
            ConfigSource::Default => "built-in defaults".to_string(),
        }
    }
}

/// The document to propagate: `--from`, `--stdin`, or the authoritative file.
pub fn load_document(workspace: &Workspace, from: Option<&Path>, stdin: bool) -> Result<String> {
    if let Some(path) = from {
        return std::fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display()));
    }
    if stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("cannot read document from stdin")?;
        return Ok(text);
    }

    let root = workspace.require_root()?;
    let resolution = resolve(Some(root), &workspace.config.paths);
    if resolution.source.is_none() {
        bail!("no rule file exists yet; pass --from <file> or --stdin");
    }
    Ok(resolution.content)
}
