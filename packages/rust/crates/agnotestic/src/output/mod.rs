//! Rendering of scan and query results.

mod alfred;

use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::note::{Zettel, ZettelSummary};

pub use self::alfred::{AlfredIcon, AlfredItem, AlfredResults};

/// Output format for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutFormat {
    /// Count line, `Title,Path` header, one `title,path` row per note.
    #[default]
    Plain,
    /// Pretty JSON array of note summaries.
    Json,
    /// Alfred script-filter JSON.
    Alfred,
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Write one path per line as the items arrive, returning how many were written.
///
/// # Errors
///
/// Stops at the first item error or write error.
pub fn write_paths<W, I, E>(out: &mut W, paths: I) -> Result<usize, E>
where
    W: Write,
    I: IntoIterator<Item = Result<PathBuf, E>>,
    E: From<io::Error>,
{
    let mut count = 0usize;
    for path in paths {
        writeln!(out, "{}", path?.display())?;
        count += 1;
    }
    Ok(count)
}

/// Render query results in `format`.
///
/// # Errors
///
/// Propagates write and serialization errors.
pub fn write_zettels<W: Write>(
    out: &mut W,
    zettels: &[&Zettel],
    format: OutFormat,
) -> io::Result<()> {
    match format {
        OutFormat::Plain => {
            writeln!(out, "{} results", zettels.len())?;
            writeln!(out, "Title,Path")?;
            for zettel in zettels {
                writeln!(out, "{},{}", zettel.title, zettel.file_path)?;
            }
            Ok(())
        }
        OutFormat::Json => {
            let summaries: Vec<ZettelSummary> = zettels.iter().map(|z| z.summary()).collect();
            write_json(out, &summaries)
        }
        OutFormat::Alfred => {
            let results: AlfredResults = zettels.iter().copied().collect();
            write_json(out, &results)
        }
    }
}

/// Render full notes (headers, links, tags) as pretty JSON.
///
/// # Errors
///
/// Propagates write and serialization errors.
pub fn write_notes<W: Write>(out: &mut W, zettels: &[Zettel]) -> io::Result<()> {
    write_json(out, &zettels)
}
