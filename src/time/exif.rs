//! EXIF capture date extraction for images

use super::{DateKey, DateStrategy, StrategyOutcome, TimeSource};
use crate::entry::DirectoryEntry;
use crate::error::{Error, Result};
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// Read the original capture date (`DateTimeOriginal`) as a date key
pub fn extract_capture_date(path: &Path) -> Result<DateKey> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| Error::ExifRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let field = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .ok_or_else(|| Error::MissingCaptureDate {
            path: path.to_path_buf(),
        })?;

    let raw = match field.value {
        Value::Ascii(ref parts) if !parts.is_empty() => {
            String::from_utf8_lossy(&parts[0]).into_owned()
        }
        _ => field.display_value().to_string(),
    };

    let key = capture_date_key(&raw).ok_or_else(|| Error::MalformedCaptureDate {
        path: path.to_path_buf(),
        value: raw.clone(),
    })?;
    trace!(?path, %key, "Found EXIF capture date");
    Ok(key)
}

/// `"YYYY:MM:DD HH:MM:SS"` -> `YYYY-MM-DD`, from the first 10 characters
fn capture_date_key(raw: &str) -> Option<DateKey> {
    let date = raw.get(..10)?;
    DateKey::parse(&date.replace(':', "-")).ok()
}

/// Override tier for files carrying embedded capture metadata
#[derive(Debug, Clone)]
pub struct EmbeddedMetadata {
    extensions: Vec<String>,
}

impl EmbeddedMetadata {
    pub fn new(extensions: Vec<String>) -> Self {
        Self {
            extensions: extensions.into_iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    /// Whether files with this (lowercase) extension are worth opening
    pub fn applies_to(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}

impl DateStrategy for EmbeddedMetadata {
    fn source(&self) -> TimeSource {
        TimeSource::Exif
    }

    fn resolve(&self, entry: &DirectoryEntry) -> StrategyOutcome {
        if entry.is_dir {
            return StrategyOutcome::NotApplicable;
        }
        match entry.extension() {
            Some(ext) if self.applies_to(&ext) => {}
            _ => return StrategyOutcome::NotApplicable,
        }

        match extract_capture_date(&entry.path) {
            Ok(key) => StrategyOutcome::Resolved(key),
            Err(e) => StrategyOutcome::Unavailable(e.to_string()),
        }
    }
}
