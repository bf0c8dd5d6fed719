//! Date resolution module
//!
//! Every entry gets a `YYYY-MM-DD` key from, in increasing priority:
//! - the file system timestamp (creation or modification)
//! - an `IMG_`/`VID_` camera filename
//! - the EXIF original capture date
//!
//! The filesystem tier always produces a key; each later tier that applies
//! replaces it.

pub mod exif;
pub mod filename;
pub mod filesystem;

use crate::config::Config;
use crate::entry::DirectoryEntry;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::fmt;
use tracing::debug;

pub use self::exif::EmbeddedMetadata;
pub use self::filename::FilenamePattern;
pub use self::filesystem::FileSystemTime;

/// Suffix appended to a date key to name its destination folder
pub const FOLDER_SUFFIX: &str = " ()";

/// Canonical `YYYY-MM-DD` grouping key.
///
/// Only the shape is checked, never the calendar: `2019-13-99` is a valid key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(String);

impl DateKey {
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });

        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::InvalidDateKey(s.to_string()))
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the folder this key's entries are moved into
    pub fn folder_name(&self) -> String {
        format!("{}{}", self.0, FOLDER_SUFFIX)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tier that produced a date key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// From file system creation/modification time
    FileSystem,
    /// Parsed from filename
    Filename,
    /// Extracted from EXIF metadata
    Exif,
}

/// What a single override strategy made of an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyOutcome {
    Resolved(DateKey),
    /// The strategy does not apply to this entry
    NotApplicable,
    /// The strategy applies but could not produce a key; carries a diagnostic
    Unavailable(String),
}

/// An override tier in the resolution chain
pub trait DateStrategy {
    fn source(&self) -> TimeSource;

    fn resolve(&self, entry: &DirectoryEntry) -> StrategyOutcome;
}

/// Final date for one entry
#[derive(Debug, Clone)]
pub struct Resolution {
    pub key: DateKey,
    pub source: TimeSource,
    /// Non-fatal notices from tiers that applied but failed
    pub diagnostics: Vec<String>,
}

/// Folds an entry through the baseline and then each override, last hit wins
pub struct DateResolver {
    baseline: FileSystemTime,
    overrides: Vec<Box<dyn DateStrategy>>,
}

impl DateResolver {
    pub fn new(baseline: FileSystemTime) -> Self {
        Self {
            baseline,
            overrides: Vec::new(),
        }
    }

    /// Standard three-tier chain for `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(FileSystemTime::new(config.date_source))
            .with(FilenamePattern)
            .with(EmbeddedMetadata::new(config.metadata_extensions.clone()))
    }

    /// Append an override that outranks every strategy already present
    pub fn with<S: DateStrategy + 'static>(mut self, strategy: S) -> Self {
        self.overrides.push(Box::new(strategy));
        self
    }

    pub fn resolve(&self, entry: &DirectoryEntry) -> Resolution {
        let initial = Resolution {
            key: self.baseline.key_for(entry),
            source: TimeSource::FileSystem,
            diagnostics: Vec::new(),
        };

        self.overrides
            .iter()
            .fold(initial, |mut acc, strategy| {
                match strategy.resolve(entry) {
                    StrategyOutcome::Resolved(key) => {
                        debug!(name = %entry.name, %key, source = ?strategy.source(), "Date overridden");
                        acc.key = key;
                        acc.source = strategy.source();
                    }
                    StrategyOutcome::Unavailable(notice) => acc.diagnostics.push(notice),
                    StrategyOutcome::NotApplicable => {}
                }
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DateSource;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    struct Fixed(TimeSource, StrategyOutcome);

    impl DateStrategy for Fixed {
        fn source(&self) -> TimeSource {
            self.0
        }

        fn resolve(&self, _entry: &DirectoryEntry) -> StrategyOutcome {
            self.1.clone()
        }
    }

    fn entry(name: &str) -> DirectoryEntry {
        let modified = Local.with_ymd_and_hms(2021, 6, 5, 12, 0, 0).unwrap();
        DirectoryEntry {
            path: PathBuf::from(name),
            file_name: name.into(),
            name: name.to_string(),
            is_dir: false,
            created: None,
            modified,
        }
    }

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    #[test]
    fn test_date_key_shape() {
        assert!(DateKey::parse("2019-09-02").is_ok());
        assert!(DateKey::parse("2019-13-99").is_ok());
        assert!(DateKey::parse("2019:09:02").is_err());
        assert!(DateKey::parse("2019-9-2").is_err());
        assert!(DateKey::parse("    -  -  ").is_err());
        assert!(DateKey::parse("").is_err());
        assert_eq!(key("2019-09-02").folder_name(), "2019-09-02 ()");
    }

    #[test]
    fn test_baseline_only() {
        let resolver = DateResolver::new(FileSystemTime::new(DateSource::Modified));
        let resolution = resolver.resolve(&entry("notes.txt"));
        assert_eq!(resolution.key, key("2021-06-05"));
        assert_eq!(resolution.source, TimeSource::FileSystem);
        assert!(resolution.diagnostics.is_empty());
    }

    #[test]
    fn test_last_resolved_wins() {
        let resolver = DateResolver::new(FileSystemTime::new(DateSource::Modified))
            .with(Fixed(TimeSource::Filename, StrategyOutcome::Resolved(key("2019-01-01"))))
            .with(Fixed(TimeSource::Exif, StrategyOutcome::Resolved(key("2018-03-01"))));

        let resolution = resolver.resolve(&entry("x.jpg"));
        assert_eq!(resolution.key, key("2018-03-01"));
        assert_eq!(resolution.source, TimeSource::Exif);
    }

    #[test]
    fn test_unavailable_keeps_prior_key() {
        let resolver = DateResolver::new(FileSystemTime::new(DateSource::Modified))
            .with(Fixed(TimeSource::Filename, StrategyOutcome::Resolved(key("2019-01-01"))))
            .with(Fixed(TimeSource::Exif, StrategyOutcome::Unavailable("no tag".into())));

        let resolution = resolver.resolve(&entry("x.jpg"));
        assert_eq!(resolution.key, key("2019-01-01"));
        assert_eq!(resolution.source, TimeSource::Filename);
        assert_eq!(resolution.diagnostics, ["no tag"]);
    }

    #[test]
    fn test_not_applicable_is_silent() {
        let resolver = DateResolver::new(FileSystemTime::new(DateSource::Modified))
            .with(Fixed(TimeSource::Filename, StrategyOutcome::NotApplicable));

        let resolution = resolver.resolve(&entry("x.jpg"));
        assert_eq!(resolution.key, key("2021-06-05"));
        assert!(resolution.diagnostics.is_empty());
    }

    #[test]
    fn test_standard_chain_filename_over_filesystem() {
        let resolver = DateResolver::from_config(&Config {
            date_source: DateSource::Modified,
            ..Config::default()
        });
        // Not a metadata extension, so the filename tier has the last word
        let resolution = resolver.resolve(&entry("VID_20200131_235959_LL.mp4"));
        assert_eq!(resolution.key, key("2020-01-31"));
        assert_eq!(resolution.source, TimeSource::Filename);
        assert!(resolution.diagnostics.is_empty());
    }
}
