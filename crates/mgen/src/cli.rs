//! Command-line arguments.

use crate::config::MgenConfig;
use clap::{ArgAction, Parser};
use mgen_typegen::{DEFAULT_MAX_DEPTH, GenerateConfig};
use std::path::PathBuf;

/// Generate data models in several languages from one schema file.
#[derive(Debug, Parser)]
#[command(name = "mgen", version, about)]
pub struct Cli {
    /// Schema file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(required_unless_present = "list")]
    pub file: Option<PathBuf>,

    /// Output languages, comma separated (e.g. go,typescript)
    #[arg(short, long, value_name = "LANGS", value_delimiter = ',')]
    pub out: Vec<String>,

    /// Maximum depth of nested objects
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Config file applied on top of the global and project configs
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// List available output languages and exit
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    /// Requested languages: `--out`, else the configured default. Empty means
    /// the library default.
    pub fn languages(&self, config: &MgenConfig) -> Vec<String> {
        let requested = if self.out.is_empty() {
            config.generate.out.clone().unwrap_or_default()
        } else {
            self.out.clone()
        };
        requested
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect()
    }

    pub fn generate_config(&self, config: &MgenConfig) -> GenerateConfig {
        let max_depth = self
            .max_depth
            .or(config.generate.max_depth)
            .unwrap_or(DEFAULT_MAX_DEPTH);
        GenerateConfig::with_max_depth(max_depth)
    }

    /// Log filter directive when `MGEN_LOG` is unset.
    pub fn log_level(&self, config: &MgenConfig) -> String {
        if self.quiet {
            return "error".into();
        }
        match self.verbose {
            0 => config.log.level.clone().unwrap_or_else(|| "warn".into()),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    }
}
