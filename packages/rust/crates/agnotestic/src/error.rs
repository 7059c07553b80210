//! Error types for scanning, parsing and configuration.
//!
//! Library code returns these typed errors; the `agnotestic` binary wraps
//! them with `anyhow` context.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while walking the notes root.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The configured root does not exist.
    #[error("notes root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The configured root exists but is not a directory.
    #[error("notes root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The root exists but its metadata cannot be read.
    #[error("cannot access notes root {}: {source}", .path.display())]
    RootUnreadable {
        /// Root path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed below the root (permission denied, vanished entry, loop).
    #[error("failed to traverse {}: {source}", .path.display())]
    Walk {
        /// Path being visited when traversal failed.
        path: PathBuf,
        /// Underlying walker error.
        #[source]
        source: walkdir::Error,
    },
}

/// Failures while turning one note file into a [`crate::Zettel`].
#[derive(Error, Debug)]
pub enum NoteError {
    /// The note file could not be read as UTF-8 text.
    #[error("failed to read note {}: {source}", .path.display())]
    Read {
        /// Note path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Neither creation nor modification time is available for the note.
    #[error("no usable timestamp for note {}: {source}", .path.display())]
    Timestamp {
        /// Note path.
        path: PathBuf,
        /// Underlying IO error from the metadata call.
        #[source]
        source: std::io::Error,
    },

    /// The zettel id format contains an unknown strftime specifier.
    #[error("invalid zettel date format: {0:?}")]
    InvalidDateFormat(String),
}

/// Failures while loading a whole note collection.
#[derive(Error, Debug)]
pub enum CollectionError {
    /// Scanning the root failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Parsing a note failed.
    #[error(transparent)]
    Note(#[from] NoteError),
}

/// Failures while resolving runtime configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has unexpected keys.
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// `zettel-dateformat` contains an unknown strftime specifier.
    #[error("invalid zettel date format: {0:?}")]
    InvalidDateFormat(String),

    /// No root from the CLI, the environment, or the config file.
    #[error("no notes root configured (pass --root, set AGNOTESTIC_ROOT, or add `wiki-location` to the config file)")]
    MissingRoot,
}
