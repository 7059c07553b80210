//! In-memory note collection with tag, link, and full-text queries.
//!
//! Loading scans the root sequentially, parses the notes on the rayon pool,
//! then assigns ids in scan order so that colliding creation timestamps
//! resolve the same way on every run.

use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::NotesConfig;
use crate::error::{CollectionError, NoteError};
use crate::note::Zettel;
use crate::scanner::NoteScanner;

/// All parsed notes under one root.
#[derive(Debug, Clone, Default)]
pub struct NoteCollection {
    zettels: Vec<Zettel>,
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Replace duplicate ids with the file name, then the root-relative path.
fn assign_unique_ids(zettels: &mut [Zettel], root: &Path) {
    let mut taken: HashSet<String> = HashSet::new();
    for zettel in zettels.iter_mut() {
        if taken.contains(&zettel.zettel_id) {
            let path = PathBuf::from(&zettel.file_path);
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let replacement = if file_name.is_empty() || taken.contains(&file_name) {
                path.strip_prefix(root)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    .replace('\\', "/")
            } else {
                file_name
            };
            tracing::debug!(
                id = %zettel.zettel_id,
                replacement = %replacement,
                path = %zettel.file_path,
                "zettel id collision"
            );
            zettel.zettel_id = replacement;
        }
        taken.insert(zettel.zettel_id.clone());
    }
}

impl NoteCollection {
    /// Build a collection from already parsed notes, fixing id collisions.
    #[must_use]
    pub fn from_zettels(mut zettels: Vec<Zettel>, root: &Path) -> Self {
        assign_unique_ids(&mut zettels, root);
        Self { zettels }
    }

    /// Scan with `scanner` and parse every note.
    ///
    /// An unreadable note aborts the load unless the scanner skips
    /// unreadable entries, in which case it is logged and left out.
    ///
    /// # Errors
    ///
    /// Returns the first scan error, or the first note error in scan order.
    pub fn load(scanner: &NoteScanner, config: &NotesConfig) -> Result<Self, CollectionError> {
        let paths = scanner.collect_paths()?;
        let skip_unreadable = scanner.options().skip_unreadable;

        let parsed: Vec<Result<Zettel, NoteError>> = paths
            .par_iter()
            .map(|path| Zettel::from_path(path, &config.zettel_date_format))
            .collect();

        let mut zettels = Vec::with_capacity(parsed.len());
        for result in parsed {
            match result {
                Ok(zettel) => zettels.push(zettel),
                Err(err) if skip_unreadable => {
                    tracing::warn!(error = %err, "skipping unreadable note");
                }
                Err(err) => return Err(err.into()),
            }
        }
        tracing::info!(count = zettels.len(), "parsed notes");
        Ok(Self::from_zettels(zettels, scanner.root()))
    }

    /// All notes in scan order.
    #[must_use]
    pub fn zettels(&self) -> &[Zettel] {
        &self.zettels
    }

    /// Number of notes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zettels.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zettels.is_empty()
    }

    /// Look up a note by id.
    #[must_use]
    pub fn get(&self, zettel_id: &str) -> Option<&Zettel> {
        self.zettels.iter().find(|z| z.zettel_id == zettel_id)
    }

    /// Notes with a tag containing `text` (case-insensitive, `#` optional).
    #[must_use]
    pub fn with_tag(&self, text: &str) -> Vec<&Zettel> {
        let needle = text.to_lowercase();
        self.zettels
            .iter()
            .filter(|z| z.tags.iter().any(|tag| contains_ignore_case(tag, &needle)))
            .collect()
    }

    /// Notes with a link target containing `text` (case-insensitive).
    #[must_use]
    pub fn linking_to(&self, text: &str) -> Vec<&Zettel> {
        let needle = text.to_lowercase();
        self.zettels
            .iter()
            .filter(|z| {
                z.links
                    .iter()
                    .any(|link| contains_ignore_case(&link.target, &needle))
            })
            .collect()
    }

    /// Notes whose text contains `text` (case-insensitive).
    #[must_use]
    pub fn full_text(&self, text: &str) -> Vec<&Zettel> {
        let needle = text.to_lowercase();
        self.zettels
            .iter()
            .filter(|z| contains_ignore_case(&z.text, &needle))
            .collect()
    }
}
