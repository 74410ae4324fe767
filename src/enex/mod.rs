//! ENEX archive extraction.
//!
//! An ENEX export is one XML document holding many `<note>` elements, each
//! with scalar metadata, ENML `<content>` and zero or more `<resource>`
//! elements carrying base64 attachments. Exports easily reach hundreds of
//! megabytes, so the document is read as a stream of boundary events
//! ([`event`]) that drive a small state machine ([`state`]).
//!
//! # Module Structure
//!
//! - [`event`] - incremental reader producing [`ArchiveEvent`]s
//! - [`state`] - the [`Extractor`] state machine building [`Note`] records
//! - [`timestamp`] - created/updated normalization

pub mod event;
pub mod state;
pub mod timestamp;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::ExtractError;
use crate::files::filename;
use crate::rewrite::RewriteOptions;

pub use event::{ArchiveEvent, EventReader};
pub use state::Extractor;

/// Settings the extractor needs besides the document itself.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Safe-name settings for the derived note file name.
    pub naming: filename::Config,
    /// Optional content rewrite passes.
    pub rewrite: RewriteOptions,
}

/// Optional geolocation of a note, kept as written in the archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub altitude: Option<String>,
}

/// One exported note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    /// Safe name derived from the title, before any collision counter.
    pub filename_base: String,
    /// `DD.MM.YYYY HH:MM:SS GMT`
    pub created: Option<String>,
    /// `DD.MM.YYYY HH:MM:SS GMT`
    pub updated: Option<String>,
    pub author: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub location: Location,
    /// Distinct tags in encounter order.
    pub tags: Vec<String>,
    /// Tags joined with `", "`, empty when there are none.
    pub tags_string: String,
    /// Rewritten HTML body. Holds attachment placeholders until relinked.
    pub content: String,
    /// Attachments in encounter order, file names unique within the note.
    pub attachments: Vec<Resource>,
}

/// One attachment of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    pub mime_type: Option<String>,
    /// Base64 payload with all whitespace removed.
    pub data: String,
    pub width: Option<String>,
    pub height: Option<String>,
    /// Resolved, unique within the owning note.
    pub file_name: String,
}

impl Resource {
    /// Whether the mime type marks this as an image.
    pub fn is_image(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|mime| mime.starts_with("image/"))
    }
}

/// Extracts every note from the archive at `path`.
pub fn extract_file<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<Vec<Note>, ExtractError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    extract_reader(BufReader::new(file), options)
}

/// Extracts every note from an ENEX document, in document order.
pub fn extract_reader<R: BufRead>(
    reader: R,
    options: &ExtractOptions,
) -> Result<Vec<Note>, ExtractError> {
    let mut extractor = Extractor::new(options.clone());
    for event in EventReader::new(reader) {
        extractor.handle(event?)?;
    }
    Ok(extractor.finish())
}

/// Extracts every note from an in-memory ENEX document.
pub fn extract_str(content: &str, options: &ExtractOptions) -> Result<Vec<Note>, ExtractError> {
    extract_reader(content.as_bytes(), options)
}
