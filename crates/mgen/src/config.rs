//! Configuration system for mgen.
//!
//! Loads config from, in increasing precedence:
//! 1. Global: ~/.config/mgen/config.toml (or $XDG_CONFIG_HOME/mgen/config.toml)
//! 2. Per-project: .mgen/config.toml
//! 3. An explicit `--config` file
//!
//! A later layer overrides only the keys it sets.
//!
//! Example config.toml:
//! ```toml
//! [generate]
//! out = ["go", "typescript"]
//! max_depth = 32
//!
//! [log]
//! level = "info"
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Generation defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GenerateSettings {
    /// Languages generated when `--out` is not given.
    pub out: Option<Vec<String>>,
    /// Nesting ceiling when `--max-depth` is not given.
    pub max_depth: Option<usize>,
}

/// Logging defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directive used when neither `MGEN_LOG` nor `-v`/`-q` is given.
    pub level: Option<String>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MgenConfig {
    pub generate: GenerateSettings,
    pub log: LogSettings,
}

impl MgenConfig {
    /// Load configuration for a project rooted at `root`, with an optional
    /// explicit file on top.
    ///
    /// Missing global and project files are skipped; a missing explicit file
    /// is an error. Any file that exists but does not parse is an error.
    pub fn load(root: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_layers(Self::global_config_path(), root, explicit)
    }

    fn load_layers(global: Option<PathBuf>, root: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = global {
            if let Some(global) = Self::load_file(&global_path)? {
                config = config.merge(global);
            }
        }

        let project_path = root.join(".mgen").join("config.toml");
        if let Some(project) = Self::load_file(&project_path)? {
            config = config.merge(project);
        }

        if let Some(path) = explicit {
            let explicit = Self::load_file(path)?
                .with_context(|| format!("config file {} not found", path.display()))?;
            config = config.merge(explicit);
        }

        Ok(config)
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("mgen").join("config.toml"))
    }

    /// Load config from a file path. `None` when the file does not exist.
    fn load_file(path: &Path) -> anyhow::Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
        };
        let config = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(Some(config))
    }

    /// Merge another config into this one; keys set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            generate: GenerateSettings {
                out: other.generate.out.or(self.generate.out),
                max_depth: other.generate.max_depth.or(self.generate.max_depth),
            },
            log: LogSettings {
                level: other.log.level.or(self.log.level),
            },
        }
    }
}
