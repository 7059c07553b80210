//! Parsed note model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::NoteError;
use crate::parser::{Header, Link, extract_title, parse_references};

/// A note plus the references extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zettel {
    /// Id derived from the file's creation time (unique within a collection).
    pub zettel_id: String,
    /// First level-1 header, else the file stem.
    pub title: String,
    /// Path as produced by the scanner.
    pub file_path: String,
    /// Full note text.
    #[serde(skip)]
    pub text: String,
    /// Headings in document order.
    pub headers: Vec<Header>,
    /// Outgoing links in document order.
    pub links: Vec<Link>,
    /// Unique inline tags.
    pub tags: Vec<String>,
}

/// Short form used by query output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZettelSummary {
    /// Zettel id.
    pub zettel_id: String,
    /// Title.
    pub title: String,
    /// File path.
    pub file_path: String,
}

impl From<&Zettel> for ZettelSummary {
    fn from(zettel: &Zettel) -> Self {
        Self {
            zettel_id: zettel.zettel_id.clone(),
            title: zettel.title.clone(),
            file_path: zettel.file_path.clone(),
        }
    }
}

/// Format `timestamp` as a zettel id.
///
/// # Errors
///
/// Returns [`NoteError::InvalidDateFormat`] when `date_format` has an unknown specifier.
pub fn format_zettel_id(
    timestamp: DateTime<Utc>,
    date_format: &str,
) -> Result<String, NoteError> {
    let mut id = String::new();
    write!(id, "{}", timestamp.format(date_format))
        .map_err(|_| NoteError::InvalidDateFormat(date_format.to_string()))?;
    Ok(id)
}

/// Birth time where the platform records it, else last modification.
fn note_timestamp(path: &Path) -> Result<DateTime<Utc>, NoteError> {
    let to_err = |source: std::io::Error| NoteError::Timestamp {
        path: path.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(path).map_err(to_err)?;
    let time = match metadata.created() {
        Ok(created) => created,
        Err(_unsupported) => metadata.modified().map_err(to_err)?,
    };
    Ok(time.into())
}

impl Zettel {
    /// Build a zettel from already loaded content.
    #[must_use]
    pub fn from_content(path: &Path, zettel_id: String, text: String) -> Self {
        let references = parse_references(&text);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let title = extract_title(&references.headers, &stem);
        Self {
            zettel_id,
            title,
            file_path: path.to_string_lossy().into_owned(),
            text,
            headers: references.headers,
            links: references.links,
            tags: references.tags,
        }
    }

    /// Read and parse a note file.
    ///
    /// # Errors
    ///
    /// [`NoteError::Read`] if the file is unreadable or not UTF-8,
    /// [`NoteError::Timestamp`] if no file time is available, and
    /// [`NoteError::InvalidDateFormat`] for a bad `date_format`.
    pub fn from_path(path: &Path, date_format: &str) -> Result<Self, NoteError> {
        let text = fs::read_to_string(path).map_err(|source| NoteError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let zettel_id = format_zettel_id(note_timestamp(path)?, date_format)?;
        Ok(Self::from_content(path, zettel_id, text))
    }

    /// Short form for query output.
    #[must_use]
    pub fn summary(&self) -> ZettelSummary {
        ZettelSummary::from(self)
    }
}
