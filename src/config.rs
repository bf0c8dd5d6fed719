//! Configuration types for the date sorter

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Which filesystem timestamp seeds the date key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DateSource {
    /// Creation (birth) time, falling back to modification time when unavailable
    #[default]
    Create,
    /// Last modification time
    Modified,
}

/// What to do when a same-named entry already sits in the destination folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Keep both: the incoming entry gets a numeric suffix (photo_1.jpg)
    #[default]
    Rename,
    /// Replace the existing file
    Overwrite,
    /// Leave the incoming entry where it is
    Skip,
}

/// Configuration for the date sorter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory whose direct children are organized
    pub target_dir: PathBuf,

    /// Filesystem timestamp used as the baseline date
    pub date_source: DateSource,

    /// Treat subdirectories as movable entries
    pub include_dirs: bool,

    /// Treat dot-prefixed entries as movable entries
    pub include_hidden: bool,

    /// Collision handling in destination folders
    pub on_conflict: ConflictPolicy,

    /// Dry run mode - resolve and plan without touching the filesystem
    pub dry_run: bool,

    /// Verbose output
    pub verbose: bool,

    /// Extensions whose embedded metadata is consulted
    pub metadata_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::new(),
            date_source: DateSource::default(),
            include_dirs: false,
            include_hidden: false,
            on_conflict: ConflictPolicy::default(),
            dry_run: false,
            verbose: false,
            metadata_extensions: vec![
                "jpg".into(), "jpeg".into(), "png".into(),
                "mov".into(), "heic".into(), "thm".into(),
            ],
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}
