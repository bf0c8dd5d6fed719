//! Error types for the date sorter

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for date sorter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the date sorter
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Target directory does not exist: {path}")]
    TargetNotFound { path: PathBuf },

    #[error("Target is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to read EXIF data from {path}: {message}")]
    ExifRead { path: PathBuf, message: String },

    #[error("No original capture date in EXIF data of {path}")]
    MissingCaptureDate { path: PathBuf },

    #[error("Unrecognized capture date {value:?} in {path}")]
    MalformedCaptureDate { path: PathBuf, value: String },

    #[error("Invalid date key: {0:?}")]
    InvalidDateKey(String),

    #[error("Failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Destination is occupied by a directory: {path}")]
    DestinationOccupied { path: PathBuf },

    #[error("Refusing to replace file {path} with a directory")]
    DirectoryOverFile { path: PathBuf },

    #[error("No free name left next to {path}")]
    NoFreeName { path: PathBuf },

    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

