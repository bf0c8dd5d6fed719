//! Directory entries and single-level enumeration

use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One direct child of the target directory, captured at enumeration time
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    /// Base name as stored on disk
    pub file_name: OsString,
    /// Base name, lossily decoded; for pattern matching and logs only
    pub name: String,
    pub is_dir: bool,
    /// Birth time, when the platform and filesystem report one
    pub created: Option<DateTime<Local>>,
    pub modified: DateTime<Local>,
}

impl DirectoryEntry {
    /// Stat `path` and capture its attributes
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)?;
        let file_name = path.file_name().map(OsString::from).unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            name: file_name.to_string_lossy().into_owned(),
            file_name,
            is_dir: metadata.is_dir(),
            created: metadata.created().ok().map(DateTime::<Local>::from),
            modified: DateTime::<Local>::from(metadata.modified()?),
        })
    }

    /// Lowercase extension of the base name, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// List the direct children of `dir`, sorted by name.
///
/// Entries that cannot be stat'ed are returned separately so the caller can
/// report them without aborting the listing. Failing to read `dir` itself is
/// an error.
pub fn list_entries(dir: &Path) -> Result<(Vec<DirectoryEntry>, Vec<(PathBuf, Error)>)> {
    let mut entries = Vec::new();
    let mut failures = Vec::new();

    for item in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let item = match item {
            Ok(item) => item,
            Err(e) if e.depth() == 0 => return Err(Error::WalkDir(e)),
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                failures.push((path, Error::WalkDir(e)));
                continue;
            }
        };

        match DirectoryEntry::from_path(item.path()) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                debug!(path = ?item.path(), error = %e, "Could not stat entry");
                failures.push((item.path().to_path_buf(), e));
            }
        }
    }

    Ok((entries, failures))
}
