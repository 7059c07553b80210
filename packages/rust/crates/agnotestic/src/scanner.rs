//! Note Scanner - enumerates Markdown notes below a root directory.
//!
//! The scan is lazy: [`NoteScanner::scan`] validates the root and returns an
//! iterator that walks the tree one directory at a time. Every `*.md` regular
//! file at any depth (the root's own files included) is yielded once.
//!
//! # Example
//!
//! ```ignore
//! use agnotestic::NoteScanner;
//!
//! for path in NoteScanner::new("notes/wiki").scan()? {
//!     println!("{}", path?.display());
//! }
//! ```

use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::ScanError;

/// File extension that marks a note.
pub const NOTE_EXTENSION: &str = "md";

/// Traversal options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOptions {
    /// Sort siblings by file name (deterministic output).
    pub sort_by_name: bool,
    /// Descend into and report dot-prefixed entries below the root.
    pub include_hidden: bool,
    /// Follow symbolic links.
    pub follow_links: bool,
    /// Maximum depth below the root (`None` for unlimited; `Some(0)` is the root's own files).
    pub max_depth: Option<usize>,
    /// Log and skip traversal errors instead of aborting the scan.
    pub skip_unreadable: bool,
}

/// Whether `path` names a note by extension.
#[must_use]
pub fn is_note_path(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(NOTE_EXTENSION))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Walks a notes root and yields note paths.
#[derive(Debug, Clone)]
pub struct NoteScanner {
    root: PathBuf,
    options: ScanOptions,
}

impl NoteScanner {
    /// Scanner for `root` with default options.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: ScanOptions::default(),
        }
    }

    /// Replace the traversal options.
    #[must_use]
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Root being scanned.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> ScanOptions {
        self.options
    }

    /// Start a lazy scan.
    ///
    /// # Errors
    ///
    /// Fails up front when the root is missing, unreadable, or not a
    /// directory. Errors below the root surface through the iterator.
    pub fn scan(&self) -> Result<NotePaths, ScanError> {
        let metadata = fs::metadata(&self.root).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ScanError::RootNotFound(self.root.clone())
            } else {
                ScanError::RootUnreadable {
                    path: self.root.clone(),
                    source,
                }
            }
        })?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        let mut walker = WalkDir::new(&self.root).follow_links(self.options.follow_links);
        if let Some(depth) = self.options.max_depth {
            // Depth 0 in walkdir is the root itself; its files sit at depth 1.
            walker = walker.max_depth(depth.saturating_add(1));
        }
        if self.options.sort_by_name {
            walker = walker.sort_by_file_name();
        }
        tracing::debug!(root = %self.root.display(), options = ?self.options, "starting note scan");

        Ok(NotePaths {
            inner: walker.into_iter(),
            root: self.root.clone(),
            include_hidden: self.options.include_hidden,
            skip_unreadable: self.options.skip_unreadable,
            finished: false,
        })
    }

    /// Run the scan to completion.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered (see [`NoteScanner::scan`]).
    pub fn collect_paths(&self) -> Result<Vec<PathBuf>, ScanError> {
        let paths = self.scan()?.collect::<Result<Vec<_>, _>>()?;
        tracing::info!(
            count = paths.len(),
            root = %self.root.display(),
            "scanned notes"
        );
        Ok(paths)
    }
}

/// Lazy iterator over note paths produced by [`NoteScanner::scan`].
///
/// Without `skip_unreadable` the iterator ends right after yielding its
/// first error.
#[derive(Debug)]
pub struct NotePaths {
    inner: walkdir::IntoIter,
    root: PathBuf,
    include_hidden: bool,
    skip_unreadable: bool,
    finished: bool,
}

impl Iterator for NotePaths {
    type Item = Result<PathBuf, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    let path = source
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    if self.skip_unreadable {
                        tracing::warn!(
                            path = %path.display(),
                            error = %source,
                            "skipping unreadable entry"
                        );
                        continue;
                    }
                    self.finished = true;
                    return Some(Err(ScanError::Walk { path, source }));
                }
            };

            if !self.include_hidden && is_hidden(&entry) {
                if entry.file_type().is_dir() {
                    self.inner.skip_current_dir();
                }
                continue;
            }

            if entry.file_type().is_file() && is_note_path(entry.path()) {
                return Some(Ok(entry.into_path()));
            }
        }
    }
}
