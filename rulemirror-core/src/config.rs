//! Ordered rule file list, persisted as YAML.
//!
//! # Storage layout
//!
//! ```text
//! <root>/.rulemirror.yaml          (per-workspace list, wins when present)
//! ~/.rulemirror/config.yaml        (user default)
//! ```
//!
//! When neither file exists the built-in seed ([`DEFAULT_PATHS`]) is used.
//!
//! # API pattern
//!
//! Lookup has two forms:
//! - `load_at(root, home)` — explicit home; used in tests with `TempDir`
//! - `load(root)` — derives home from `dirs::home_dir()`, delegates to `_at`

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::RuleFilePath;

/// File name of the per-workspace config.
pub const CONFIG_FILE: &str = ".rulemirror.yaml";

/// Seed list, in priority order.
pub const DEFAULT_PATHS: &[&str] = &[
    "AGENTS.md",
    "Claude.md",
    ".cursor/rules/project-rules.mdc",
    ".github/copilot-instructions.md",
    ".roo/rules/rules.md",
    ".windsurfrules",
];

const CONFIG_VERSION: u32 = 1;

/// The configured mirror set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorConfig {
    pub version: u32,
    #[serde(default)]
    pub paths: Vec<RuleFilePath>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            paths: DEFAULT_PATHS.iter().map(|p| RuleFilePath::from(*p)).collect(),
        }
    }
}

impl MirrorConfig {
    /// Append `path` at the lowest priority.
    pub fn add_path(&mut self, path: &str) -> Result<(), ConfigError> {
        validate_path(path)?;
        if self.paths.iter().any(|p| p.0 == path) {
            return Err(ConfigError::DuplicatePath {
                path: path.to_owned(),
            });
        }
        self.paths.push(RuleFilePath::from(path));
        Ok(())
    }

    pub fn remove_path(&mut self, path: &str) -> Result<(), ConfigError> {
        let before = self.paths.len();
        self.paths.retain(|p| p.0 != path);
        if self.paths.len() == before {
            return Err(ConfigError::UnknownPath {
                path: path.to_owned(),
            });
        }
        Ok(())
    }
}

/// Where a loaded config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Workspace(PathBuf),
    User(PathBuf),
    Default,
}

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<root>/.rulemirror.yaml` — pure, no I/O.
pub fn config_path_at(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// `<home>/.rulemirror/config.yaml` — pure, no I/O.
pub fn user_config_path_at(home: &Path) -> PathBuf {
    home.join(".rulemirror").join("config.yaml")
}

/// `user_config_path_at` convenience wrapper.
pub fn user_config_path() -> Result<PathBuf, ConfigError> {
    Ok(user_config_path_at(&home()?))
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load the path list for `root`, falling back to the user config under
/// `home` and then to [`MirrorConfig::default`].
///
/// Returns `ConfigError::Parse` (with path) if a present file is malformed.
pub fn load_at(
    root: &Path,
    home: Option<&Path>,
) -> Result<(MirrorConfig, ConfigSource), ConfigError> {
    let workspace = config_path_at(root);
    if workspace.is_file() {
        let config = read_config(&workspace)?;
        return Ok((config, ConfigSource::Workspace(workspace)));
    }

    if let Some(home) = home {
        let user = user_config_path_at(home);
        if user.is_file() {
            let config = read_config(&user)?;
            return Ok((config, ConfigSource::User(user)));
        }
    }

    Ok((MirrorConfig::default(), ConfigSource::Default))
}

/// `load_at` convenience wrapper. A missing home directory only disables
/// the user-level fallback.
pub fn load(root: &Path) -> Result<(MirrorConfig, ConfigSource), ConfigError> {
    let home = dirs::home_dir();
    load_at(root, home.as_deref())
}

fn read_config(path: &Path) -> Result<MirrorConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save `config` to `<root>/.rulemirror.yaml`.
///
/// Write flow: serialize → `.rulemirror.yaml.tmp` sibling → `rename`.
pub fn save_at(root: &Path, config: &MirrorConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path_at(root);
    let tmp_path = path.with_file_name(format!("{CONFIG_FILE}.tmp"));

    let yaml = serde_yaml::to_string(config)?;
    write_then_rename(&tmp_path, &path, yaml)?;
    Ok(path)
}

/// Save the user-level default list to `<home>/.rulemirror/config.yaml`.
pub fn save_user_at(home: &Path, config: &MirrorConfig) -> Result<PathBuf, ConfigError> {
    let path = user_config_path_at(home);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let tmp_path = path.with_extension("yaml.tmp");
    let yaml = serde_yaml::to_string(config)?;
    write_then_rename(&tmp_path, &path, yaml)?;
    Ok(path)
}

/// `save_user_at` convenience wrapper.
pub fn save_user(config: &MirrorConfig) -> Result<PathBuf, ConfigError> {
    save_user_at(&home()?, config)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

/// Write `tmp`, rename it over `path`; `tmp` never survives a failed rename.
fn write_then_rename(tmp: &Path, path: &Path, contents: String) -> Result<(), ConfigError> {
    std::fs::write(tmp, contents)?;
    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(e.into());
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<(), ConfigError> {
    let invalid = |reason| ConfigError::InvalidPath {
        path: path.to_owned(),
        reason,
    };
    if path.trim().is_empty() {
        return Err(invalid("path is empty"));
    }
    let candidate = Path::new(path);
    if candidate.has_root() {
        return Err(invalid("path must be relative to the workspace root"));
    }
    let mut depth: i32 = 0;
    for component in candidate.components() {
        match component {
            Component::ParentDir => depth -= 1,
            Component::Normal(_) => depth += 1,
            Component::Prefix(_) | Component::RootDir => {
                return Err(invalid("path must be relative to the workspace root"))
            }
            Component::CurDir => {}
        }
        if depth < 0 {
            return Err(invalid("path escapes the workspace root"));
        }
    }
    if depth == 0 {
        return Err(invalid("path does not name a file"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
