//! # CLI Configuration
//!
//! Optional `folio.yaml` at the site root:
//!
//! ```yaml
//! content_dir: src/content
//! schema_dir: .folio/schemas
//! ```
//!
//! Relative paths resolve against the directory holding the config file,
//! or against the working directory when no file is used. Command-line
//! flags override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "folio.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    /// Directory holding one subdirectory per collection.
    pub content_dir: PathBuf,
    /// Where `folio schema --write` puts `<collection>.schema.json`.
    pub schema_dir: PathBuf,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("src/content"),
            schema_dir: PathBuf::from(".folio/schemas"),
        }
    }
}

impl FolioConfig {
    /// Load a config file. An empty file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("invalid config file {}", path.display()))?
        };
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(config.relative_to(base))
    }

    /// Use `explicit` if given, else `folio.yaml` in `cwd` if present, else
    /// the defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(&crate::resolve_path(path, cwd));
        }
        let candidate = cwd.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using config file");
            Self::from_file(&candidate)
        } else {
            Ok(Self::default().relative_to(cwd))
        }
    }

    fn relative_to(self, base: &Path) -> Self {
        Self {
            content_dir: base.join(self.content_dir),
            schema_dir: base.join(self.schema_dir),
        }
    }
}
