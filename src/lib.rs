//! Date Sorter - sorts the files of a directory into per-day folders
//!
//! Each direct child of the target directory is dated by, in increasing
//! priority:
//! - its file system creation or modification time
//! - an `IMG_YYYYMMDD_HHmmss` / `VID_...` camera filename
//! - the EXIF original capture date (jpg, jpeg, png, mov, heic, thm)
//!
//! and then moved into `<target>/YYYY-MM-DD ()/`.

pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod process;
pub mod time;

pub use cli::Cli;
pub use config::{Config, ConfigError, ConflictPolicy, DateSource};
pub use entry::DirectoryEntry;
pub use error::{Error, Result};
pub use process::{FileResult, ProcessingStats, ProcessingStatus, Processor};
pub use time::{DateKey, DateResolver, TimeSource};
