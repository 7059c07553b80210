//! agnotestic - Markdown note-collection scanner.
//!
//! Walks a notes root for `*.md` files and extracts the headers, links and
//! inline tags of each note.
//!
//! # Architecture
//!
//! ```text
//! agnotestic/src/
//! ├── lib.rs          # Re-exports (this file)
//! ├── error.rs        # ScanError, NoteError, CollectionError, ConfigError
//! ├── config.rs       # Root + zettel id format resolution (TOML file)
//! ├── scanner.rs      # NoteScanner: lazy walk yielding note paths
//! ├── parser/         # Header, link and tag extraction
//! ├── note.rs         # Zettel: one parsed note
//! ├── collection.rs   # NoteCollection: parsed notes + queries
//! ├── output/         # Plain, JSON and Alfred rendering
//! └── bin/agnotestic.rs
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use agnotestic::{NoteCollection, NoteScanner, NotesConfig};
//!
//! let config = NotesConfig::new("notes/wiki");
//! let scanner = NoteScanner::new(&config.root);
//! for path in scanner.scan()? {
//!     println!("{}", path?.display());
//! }
//!
//! let collection = NoteCollection::load(&scanner, &config)?;
//! for zettel in collection.with_tag("rust") {
//!     println!("{} -> {}", zettel.title, zettel.file_path);
//! }
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod collection;
pub mod config;
pub mod error;
pub mod note;
pub mod output;
pub mod parser;
pub mod scanner;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use collection::NoteCollection;
pub use config::{ConfigFile, DEFAULT_CONFIG_FILE, DEFAULT_ZETTEL_DATE_FORMAT, NotesConfig};
pub use error::{CollectionError, ConfigError, NoteError, ScanError};
pub use note::{Zettel, ZettelSummary, format_zettel_id};
pub use output::{OutFormat, write_notes, write_paths, write_zettels};
pub use parser::{
    Header, Link, LinkKind, References, extract_headers, extract_links, extract_tags,
    extract_title, parse_references,
};
pub use scanner::{NOTE_EXTENSION, NotePaths, NoteScanner, ScanOptions, is_note_path};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
