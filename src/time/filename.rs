//! Filename timestamp parsing

use super::{DateKey, DateStrategy, StrategyOutcome, TimeSource};
use crate::entry::DirectoryEntry;
use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

/// Pattern: IMG_YYYYMMDD_HHmmss or VID_YYYYMMDD_HHmmss at the start of the name,
/// followed by `_`, the extension dot, or nothing
static PATTERN_MOBILE: OnceLock<Regex> = OnceLock::new();

fn mobile_pattern() -> &'static Regex {
    PATTERN_MOBILE.get_or_init(|| {
        Regex::new(r"^(?:IMG|VID)_(\d{4})(\d{2})(\d{2})_\d{6}(?:[_.]|$)")
            .expect("mobile filename pattern is valid")
    })
}

/// Date key from a mobile camera filename.
///
/// Digits are split positionally without calendar checks.
pub fn parse_filename_date(filename: &str) -> Option<DateKey> {
    let caps = mobile_pattern().captures(filename)?;
    let key = format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]);
    trace!(filename, %key, "Matched mobile filename pattern");
    DateKey::parse(&key).ok()
}

/// Override tier for camera-app filenames
#[derive(Debug, Clone, Copy, Default)]
pub struct FilenamePattern;

impl DateStrategy for FilenamePattern {
    fn source(&self) -> TimeSource {
        TimeSource::Filename
    }

    fn resolve(&self, entry: &DirectoryEntry) -> StrategyOutcome {
        match parse_filename_date(&entry.name) {
            Some(key) => StrategyOutcome::Resolved(key),
            None => StrategyOutcome::NotApplicable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(name: &str) -> Option<String> {
        parse_filename_date(name).map(|k| k.to_string())
    }

    #[test]
    fn test_img_format() {
        assert_eq!(parsed("IMG_20190902_170352_001.jpg").as_deref(), Some("2019-09-02"));
        assert_eq!(parsed("IMG_20190902_170352.jpg").as_deref(), Some("2019-09-02"));
        assert_eq!(parsed("VID_20200131_235959_LL.mp4").as_deref(), Some("2020-01-31"));
        assert_eq!(parsed("IMG_20190902_170352").as_deref(), Some("2019-09-02"));
    }

    #[test]
    fn test_no_calendar_validation() {
        assert_eq!(parsed("IMG_20191399_000000.jpg").as_deref(), Some("2019-13-99"));
    }

    #[test]
    fn test_anchored_and_exact() {
        assert!(parsed("copy_IMG_20190902_170352.jpg").is_none());
        assert!(parsed("img_20190902_170352.jpg").is_none());
        assert!(parsed("DSC_20190902_170352.jpg").is_none());
        assert!(parsed("IMG-20190902-WA0001.jpg").is_none());
        assert!(parsed("IMG_2019090_170352.jpg").is_none());
        assert!(parsed("IMG_20190902_1703521.jpg").is_none());
        assert!(parsed("IMG_20190902170352.jpg").is_none());
        assert!(parsed("holiday.jpg").is_none());
    }
}
