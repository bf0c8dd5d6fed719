//! File system timestamp baseline

use super::DateKey;
use crate::config::DateSource;
use crate::entry::DirectoryEntry;
use tracing::debug;

/// Baseline tier: local-time date of the entry's creation or modification time
#[derive(Debug, Clone, Copy)]
pub struct FileSystemTime {
    source: DateSource,
}

impl FileSystemTime {
    pub fn new(source: DateSource) -> Self {
        Self { source }
    }

    /// Always yields a key; creation time falls back to modification time
    pub fn key_for(&self, entry: &DirectoryEntry) -> DateKey {
        let timestamp = match (self.source, entry.created) {
            (DateSource::Create, Some(created)) => created,
            (DateSource::Create, None) => {
                debug!(name = %entry.name, "Creation time unavailable, using modification time");
                entry.modified
            }
            (DateSource::Modified, _) => entry.modified,
        };

        DateKey::from_date(timestamp.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    fn entry(created: Option<(i32, u32, u32)>) -> DirectoryEntry {
        DirectoryEntry {
            path: PathBuf::from("a.txt"),
            file_name: "a.txt".into(),
            name: "a.txt".into(),
            is_dir: false,
            created: created.map(|(y, m, d)| Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()),
            modified: Local.with_ymd_and_hms(2022, 2, 22, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_create_mode() {
        let tier = FileSystemTime::new(DateSource::Create);
        assert_eq!(tier.key_for(&entry(Some((2020, 1, 9)))).as_str(), "2020-01-09");
    }

    #[test]
    fn test_create_mode_without_birth_time() {
        let tier = FileSystemTime::new(DateSource::Create);
        assert_eq!(tier.key_for(&entry(None)).as_str(), "2022-02-22");
    }

    #[test]
    fn test_modified_mode_ignores_creation() {
        let tier = FileSystemTime::new(DateSource::Modified);
        assert_eq!(tier.key_for(&entry(Some((2020, 1, 9)))).as_str(), "2022-02-22");
    }
}
