//! Maintains `posts.json`, the persisted index of published posts.
//! The index is a JSON array ordered newest-first by insertion (not by
//! date value); rebuilding a post replaces its entry and moves it back
//! to the front. Every build reads the whole file, mutates the
//! sequence in memory, and rewrites it. There is no locking: two
//! simultaneous builds race and the last writer wins, which is fine
//! for a single-operator blog.

use std::fmt;
use std::fs::File;
use std::io;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::post::Post;

/// One persisted index entry, keyed by `slug`. Fields default
/// individually so older index files with missing keys still load.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Entry {
    pub title: String,
    pub description: String,
    pub slug: String,

    /// The long-form date (`8 janvier 2026`), not the ISO one; the
    /// index feeds the post listing directly.
    pub date: String,

    pub category: String,
    pub tags: Vec<String>,
}

impl From<&Post> for Entry {
    fn from(post: &Post) -> Entry {
        Entry {
            title: post.title.clone(),
            description: post.description.clone(),
            slug: post.slug.clone(),
            date: post.date_formatted.clone(),
            category: post.category.clone(),
            tags: post.tags.clone(),
        }
    }
}

/// Reads the whole index. A missing file is an empty index, not an
/// error; the first build creates it.
pub fn load(path: &Path) -> Result<Vec<Entry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Removes any entry sharing the new entry's slug, then inserts the
/// new entry at the front.
pub fn upsert(entries: &mut Vec<Entry>, entry: Entry) {
    entries.retain(|existing| existing.slug != entry.slug);
    entries.insert(0, entry);
}

/// Rewrites the whole index, pretty-printed with 4-space indentation.
/// Accented characters are written literally, not ASCII-escaped.
pub fn store(path: &Path, entries: &[Entry]) -> Result<()> {
    let file = File::create(path)?;
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer =
        serde_json::Serializer::with_formatter(BufWriter::new(file), formatter);
    entries.serialize(&mut serializer)?;
    serializer.into_inner().flush()?;
    Ok(())
}

/// The result of a fallible index operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error reading or writing the index file.
#[derive(Debug)]
pub enum Error {
    /// Returned when the index file contains invalid JSON, or cannot
    /// be serialized.
    Json(serde_json::Error),

    /// Returned for I/O errors.
    Io(io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Json(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    /// Converts a [`serde_json::Error`] into an [`Error`]. This allows
    /// us to use the `?` operator for serialization calls.
    fn from(err: serde_json::Error) -> Error {
        Error::Json(err)
    }
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
