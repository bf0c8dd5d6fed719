//! Shared fixtures for the end-to-end tests

#![allow(dead_code)]

use chrono::{Local, TimeZone};
use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary target directory with helpers for building its contents
pub struct Fixture {
    temp_dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file and pin its modification time to noon on the given day
    pub fn file_on(&self, name: &str, content: &[u8], (y, m, d): (i32, u32, u32)) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Failed to write file");
        set_mtime(&path, (y, m, d));
        path
    }

    pub fn subdir(&self, name: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::create_dir(&path).expect("Failed to create subdirectory");
        path
    }

    /// Sorted names of the direct children of `rel` (empty string for the root)
    pub fn names_in(&self, rel: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path().join(rel))
            .expect("Failed to read directory")
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Number of plain files anywhere below the root
    pub fn count_files(&self) -> usize {
        fn walk(dir: &Path) -> usize {
            fs::read_dir(dir)
                .unwrap()
                .map(|e| e.unwrap().path())
                .map(|p| if p.is_dir() { walk(&p) } else { 1 })
                .sum()
        }
        walk(self.path())
    }
}

pub fn set_mtime(path: &Path, (y, m, d): (i32, u32, u32)) {
    let ts = Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap().timestamp();
    filetime::set_file_mtime(path, filetime::FileTime::from_unix_time(ts, 0))
        .expect("Failed to set mtime");
}

/// Minimal JPEG whose EXIF block carries `DateTimeOriginal = value`
pub fn jpeg_with_capture_date(value: &str) -> Vec<u8> {
    jpeg_with(Field {
        tag: Tag::DateTimeOriginal,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![value.as_bytes().to_vec()]),
    })
}

/// Minimal JPEG with EXIF but no capture date
pub fn jpeg_without_capture_date() -> Vec<u8> {
    jpeg_with(Field {
        tag: Tag::Make,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![b"Camera Co".to_vec()]),
    })
}

fn jpeg_with(field: Field) -> Vec<u8> {
    let mut writer = Writer::new();
    writer.push_field(&field);
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).expect("Failed to write EXIF");
    let tiff = tiff.into_inner();

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((tiff.len() + 8) as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}
