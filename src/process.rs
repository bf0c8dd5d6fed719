//! Main file processor
//!
//! Handles the core logic of:
//! - Listing the direct children of the target directory
//! - Resolving a date key for each of them
//! - Grouping by key and moving each group into its day folder

use crate::config::{Config, ConflictPolicy};
use crate::entry::{DirectoryEntry, list_entries};
use crate::error::{Error, Result};
use crate::time::{DateKey, DateResolver, Resolution, TimeSource};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span, warn};

/// An entry together with its resolved date
#[derive(Debug, Clone)]
pub struct DatedEntry {
    pub entry: DirectoryEntry,
    pub key: DateKey,
    pub source: TimeSource,
}

/// Result of processing a single entry
#[derive(Debug, Clone)]
pub struct FileResult {
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
    pub date_key: Option<DateKey>,
    pub time_source: Option<TimeSource>,
    pub status: ProcessingStatus,
    pub error: Option<String>,
}

impl FileResult {
    fn failed(source: PathBuf, error: &Error) -> Self {
        Self {
            source,
            destination: None,
            date_key: None,
            time_source: None,
            status: ProcessingStatus::Failed,
            error: Some(error.to_string()),
        }
    }
}

/// Processing status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    /// Moved under its own name
    Moved,
    /// Moved under a suffixed name to avoid a collision
    Renamed,
    /// Left in place
    Skipped,
    /// Failed to process
    Failed,
    /// Dry run - would have been moved
    DryRun,
}

/// Processing statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Entries considered for moving
    pub total: usize,
    pub moved: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Directories and hidden entries left out of the run
    pub excluded: usize,
    /// Non-fatal date resolution notices
    pub diagnostics: usize,
    pub folders_created: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> String {
        format!(
            "Total: {}, Moved: {}, Skipped: {}, Failed: {}, Excluded: {}, Diagnostics: {}, Folders created: {}",
            self.total,
            self.moved,
            self.skipped,
            self.failed,
            self.excluded,
            self.diagnostics,
            self.folders_created
        )
    }
}

/// Main processor for organizing a directory into day folders
pub struct Processor {
    config: Config,
    resolver: DateResolver,
    stats: ProcessingStats,
}

impl Processor {
    /// Create a new processor with the given configuration
    pub fn new(config: Config) -> Self {
        let resolver = DateResolver::from_config(&config);
        Self::with_resolver(config, resolver)
    }

    /// Create a processor with a custom resolution chain
    pub fn with_resolver(config: Config, resolver: DateResolver) -> Self {
        Self {
            config,
            resolver,
            stats: ProcessingStats::new(),
        }
    }

    /// Run the processing pipeline.
    ///
    /// Only a missing, non-directory or unlistable target is an error;
    /// everything that goes wrong for a single entry is reported in its
    /// `FileResult`.
    pub fn run(&mut self) -> Result<Vec<FileResult>> {
        let _span = span!(Level::INFO, "processor_run").entered();
        self.stats = ProcessingStats::new();

        let target = self.config.target_dir.clone();
        check_target(&target)?;

        info!(target = %target.display(), "Scanning target directory...");
        let (entries, mut results) = self.collect_entries(&target)?;
        info!(count = entries.len(), "Found entries to organize");

        let dated = self.resolve_entries(entries);
        let groups = group_by_date(dated);
        info!(groups = groups.len(), "Grouped entries by date");

        for (key, members) in groups {
            results.extend(self.move_group(&target, &key, members));
        }

        if self.config.dry_run {
            info!("Dry run complete, nothing was changed");
        }
        info!(stats = %self.stats.summary(), "Processing complete");

        Ok(results)
    }

    /// Get processing statistics of the last run
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    /// Enumerate the target and drop what this run should not move
    fn collect_entries(&mut self, target: &Path) -> Result<(Vec<DirectoryEntry>, Vec<FileResult>)> {
        let (entries, failures) = list_entries(target)?;

        let failed: Vec<FileResult> = failures
            .into_iter()
            .map(|(path, e)| {
                warn!(?path, error = %e, "Could not read entry");
                FileResult::failed(path, &e)
            })
            .collect();
        self.stats.total += failed.len();
        self.stats.failed += failed.len();

        let mut kept = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.is_dir && !self.config.include_dirs {
                debug!(name = %entry.name, "Skipping subdirectory");
                self.stats.excluded += 1;
            } else if entry.is_hidden() && !self.config.include_hidden {
                debug!(name = %entry.name, "Skipping hidden entry");
                self.stats.excluded += 1;
            } else {
                kept.push(entry);
            }
        }
        self.stats.total += kept.len();

        Ok((kept, failed))
    }

    /// Resolve the date of every entry, reporting diagnostics as they occur
    pub fn resolve_entries(&mut self, entries: Vec<DirectoryEntry>) -> Vec<DatedEntry> {
        entries
            .into_iter()
            .map(|entry| {
                let Resolution {
                    key,
                    source,
                    diagnostics,
                } = self.resolver.resolve(&entry);

                for notice in &diagnostics {
                    warn!(name = %entry.name, %key, "{notice}; keeping {source:?} date");
                }
                self.stats.diagnostics += diagnostics.len();

                DatedEntry { entry, key, source }
            })
            .collect()
    }

    /// Create the day folder for `key` and move every member into it
    fn move_group(&mut self, target: &Path, key: &DateKey, members: Vec<DatedEntry>) -> Vec<FileResult> {
        let folder = target.join(key.folder_name());

        if !self.config.dry_run
            && let Err(e) = self.ensure_folder(&folder)
        {
            warn!(folder = %folder.display(), error = %e, "Could not create day folder");
            self.stats.failed += members.len();
            return members
                .into_iter()
                .map(|m| FileResult::failed(m.entry.path, &e))
                .collect();
        }

        members
            .into_iter()
            .map(|member| self.move_entry(&folder, member))
            .collect()
    }

    fn ensure_folder(&mut self, folder: &Path) -> Result<()> {
        if folder.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(folder)?;
        self.stats.folders_created += 1;
        debug!(folder = %folder.display(), "Created day folder");
        Ok(())
    }

    fn move_entry(&mut self, folder: &Path, member: DatedEntry) -> FileResult {
        let DatedEntry { entry, key, source } = member;
        let mut result = FileResult {
            source: entry.path.clone(),
            destination: None,
            date_key: Some(key),
            time_source: Some(source),
            status: ProcessingStatus::Skipped,
            error: None,
        };

        if entry.path == folder {
            debug!(name = %entry.name, "Entry is its own day folder, leaving in place");
            result.error = Some("already in its day folder".into());
            self.stats.skipped += 1;
            return result;
        }

        let planned = folder.join(&entry.file_name);
        let (dest, renamed) = match plan_destination(planned, entry.is_dir, self.config.on_conflict) {
            Ok(Some(plan)) => plan,
            Ok(None) => {
                debug!(name = %entry.name, "Destination exists, skipping");
                result.error = Some("destination already exists".into());
                self.stats.skipped += 1;
                return result;
            }
            Err(e) => {
                warn!(name = %entry.name, error = %e, "Cannot place entry");
                result.status = ProcessingStatus::Failed;
                result.error = Some(e.to_string());
                self.stats.failed += 1;
                return result;
            }
        };
        result.destination = Some(dest.clone());

        if self.config.dry_run {
            info!(from = %entry.path.display(), to = %dest.display(), "Would move");
            result.status = ProcessingStatus::DryRun;
            return result;
        }

        match move_path(&entry.path, &dest, entry.is_dir) {
            Ok(()) => {
                debug!(from = %entry.path.display(), to = %dest.display(), "Moved");
                result.status = if renamed {
                    ProcessingStatus::Renamed
                } else {
                    ProcessingStatus::Moved
                };
                self.stats.moved += 1;
            }
            Err(e) => {
                warn!(name = %entry.name, error = %e, "Move failed");
                result.status = ProcessingStatus::Failed;
                result.error = Some(e.to_string());
                self.stats.failed += 1;
            }
        }
        result
    }
}

/// Fail before any mutation when the target is unusable
fn check_target(target: &Path) -> Result<()> {
    if !target.exists() {
        return Err(Error::TargetNotFound {
            path: target.to_path_buf(),
        });
    }
    if !target.is_dir() {
        return Err(Error::NotADirectory {
            path: target.to_path_buf(),
        });
    }
    Ok(())
}

/// Partition entries by date key; groups iterate in ascending date order
pub fn group_by_date(entries: Vec<DatedEntry>) -> BTreeMap<DateKey, Vec<DatedEntry>> {
    let mut groups: BTreeMap<DateKey, Vec<DatedEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.key.clone()).or_default().push(entry);
    }
    groups
}

/// Apply the collision policy to `dest`.
///
/// Returns `None` when the entry should stay where it is, otherwise the final
/// destination and whether it differs from the planned name.
fn plan_destination(
    dest: PathBuf,
    is_dir: bool,
    policy: ConflictPolicy,
) -> Result<Option<(PathBuf, bool)>> {
    if !dest.exists() {
        return Ok(Some((dest, false)));
    }

    match policy {
        ConflictPolicy::Skip => Ok(None),
        ConflictPolicy::Rename => Ok(Some((resolve_filename_conflict(&dest, is_dir)?, true))),
        ConflictPolicy::Overwrite if dest.is_dir() => Err(Error::DestinationOccupied { path: dest }),
        ConflictPolicy::Overwrite if is_dir => Err(Error::DirectoryOverFile { path: dest }),
        ConflictPolicy::Overwrite => Ok(Some((dest, false))),
    }
}

/// Resolve filename conflicts by adding a numeric suffix
fn resolve_filename_conflict(path: &Path, is_dir: bool) -> Result<PathBuf> {
    // Directories keep dots in their names; only files get stem/extension split
    let (stem, extension) = if is_dir {
        (path.file_name(), None)
    } else {
        (path.file_stem(), path.extension())
    };
    let stem = stem.ok_or_else(|| Error::NoFreeName {
        path: path.to_path_buf(),
    })?;

    let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();

    for i in 1..10000 {
        let mut name = OsString::from(stem);
        name.push(format!("_{}", i));
        if let Some(ext) = extension {
            name.push(".");
            name.push(ext);
        }

        let candidate = parent.join(name);
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(Error::NoFreeName {
        path: path.to_path_buf(),
    })
}

/// Move `source` to `dest`, falling back to copy + delete for files that
/// cannot be renamed (e.g. across filesystems)
fn move_path(source: &Path, dest: &Path, is_dir: bool) -> Result<()> {
    let rename_err = match fs::rename(source, dest) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    if is_dir {
        return Err(Error::Move {
            from: source.to_path_buf(),
            to: dest.to_path_buf(),
            source: rename_err,
        });
    }

    debug!(?source, error = %rename_err, "Rename failed, copying instead");
    let copy = || -> std::io::Result<()> {
        let mtime = fs::metadata(source)?.modified()?;
        fs::copy(source, dest)?;
        filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime))?;
        fs::remove_file(source)
    };

    copy().map_err(|e| Error::Move {
        from: source.to_path_buf(),
        to: dest.to_path_buf(),
        source: e,
    })
}
