//! CLI argument parsing with clap

use crate::config::{Config, ConflictPolicy, DateSource};
use clap::Parser;
use std::path::PathBuf;

/// Date Sorter - moves the files of a directory into per-day folders
///
/// Each file's day comes from its filesystem timestamp, overridden by an
/// IMG_/VID_ camera filename, overridden in turn by the EXIF original
/// capture date. Files land in "<target>/YYYY-MM-DD ()/".
#[derive(Parser, Debug)]
#[command(name = "date-sorter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    ///
    /// CLI arguments override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Directory with files to be organized
    #[arg(short, long, env = "DATE_SORTER_DIR")]
    pub dir: Option<PathBuf>,

    /// Filesystem timestamp to group by
    #[arg(short = 't', long = "type", value_enum)]
    pub date_source: Option<DateSource>,

    /// Also move subdirectories, dated by their own timestamps
    #[arg(long)]
    pub include_dirs: bool,

    /// Also move entries whose names start with a dot
    #[arg(long)]
    pub include_hidden: bool,

    /// How to handle a same-named entry already in the day folder
    #[arg(long, value_enum)]
    pub on_conflict: Option<ConflictPolicy>,

    /// Dry run mode - show what would be done without doing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write the log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write the log file as JSON
    #[arg(long, requires = "log_file")]
    pub json_log: bool,
}

impl Cli {
    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(ref dir) = self.dir {
            config.target_dir = dir.clone();
        }
        if let Some(source) = self.date_source {
            config.date_source = source;
        }
        if let Some(policy) = self.on_conflict {
            config.on_conflict = policy;
        }
        if self.include_dirs {
            config.include_dirs = true;
        }
        if self.include_hidden {
            config.include_hidden = true;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}
