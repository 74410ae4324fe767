//! Writing notes and their attachments to the output folder.
//!
//! For each note, in order:
//! 1. Pick a free `<base>.html` (see [`filename::allocate`])
//! 2. Decode every attachment into `<base>_attachments/` and hash it
//! 3. Resolve the content placeholders for that hash ([`relink`])
//! 4. Write the HTML document ([`html`])
//!
//! A failing attachment is skipped with a warning; its siblings and the note
//! document are still written.

pub mod attachment;
pub mod html;
pub mod output;
pub mod relink;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::enex::Note;
use crate::error::EmitError;
use crate::files::filename;

pub use attachment::{SkippedAttachment, StoredAttachment};
pub use relink::{LinkTarget, RelinkPolicy};

/// Settings for the emission stage.
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    pub naming: filename::Config,
    pub relink: RelinkPolicy,
}

/// What happened to one note.
#[derive(Debug, Clone)]
pub struct NoteReport {
    pub title: String,
    /// The written `.html` document.
    pub path: PathBuf,
    pub stored: Vec<StoredAttachment>,
    pub skipped: Vec<SkippedAttachment>,
    /// Placeholder hashes that matched no written attachment.
    pub unresolved: Vec<String>,
    /// Raw `<en-media>` markers that never became placeholders.
    pub leftover_markers: usize,
}

/// Per-note reports for a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub notes: Vec<NoteReport>,
}

impl RunSummary {
    /// Number of note documents written.
    pub fn documents(&self) -> usize {
        self.notes.len()
    }

    /// Number of attachments written.
    pub fn attachments(&self) -> usize {
        self.notes.iter().map(|n| n.stored.len()).sum()
    }

    /// Number of attachments skipped because of errors.
    pub fn skipped(&self) -> usize {
        self.notes.iter().map(|n| n.skipped.len()).sum()
    }

    /// Total decoded attachment size in bytes.
    pub fn attachment_bytes(&self) -> u64 {
        self.notes
            .iter()
            .flat_map(|n| n.stored.iter())
            .map(|a| a.size as u64)
            .sum()
    }

    /// Notes that still contain unresolved placeholders or raw markers.
    pub fn notes_with_unresolved(&self) -> usize {
        self.notes
            .iter()
            .filter(|n| !n.unresolved.is_empty() || n.leftover_markers > 0)
            .count()
    }
}

/// Writes every note into `dir`, in order.
pub fn write_notes(
    notes: Vec<Note>,
    dir: &Path,
    options: &EmitOptions,
) -> Result<RunSummary, EmitError> {
    let mut summary = RunSummary::default();
    for note in notes {
        summary.notes.push(write_note(note, dir, options)?);
    }
    Ok(summary)
}

/// Writes one note document plus its attachments into `dir`.
pub fn write_note(mut note: Note, dir: &Path, options: &EmitOptions) -> Result<NoteReport, EmitError> {
    let allocation = filename::allocate(dir, &note.filename_base, &options.naming);
    debug!(
        note = %note.title,
        file = %allocation.path.display(),
        attachments = note.attachments.len(),
        "Writing note"
    );

    let mut stored = Vec::new();
    let mut skipped = Vec::new();

    if !note.attachments.is_empty() {
        let folder_name = allocation.attachments_dir_name();
        let folder = dir.join(&folder_name);
        fs::create_dir_all(&folder).map_err(|source| EmitError::CreateDir {
            path: folder.clone(),
            source,
        })?;

        let attachments = std::mem::take(&mut note.attachments);
        for resource in &attachments {
            match attachment::store(&folder, resource) {
                Ok(written) => {
                    let target = LinkTarget {
                        hash: &written.hash,
                        is_image: resource.is_image(),
                        dir: &folder_name,
                        file_name: &resource.file_name,
                    };
                    relink::relink(&mut note.content, &target, &options.relink);
                    stored.push(written);
                }
                Err(e) => {
                    warn!(
                        note = %note.title,
                        file = %allocation.base,
                        attachment = %resource.file_name,
                        reason = %e,
                        "Error processing attachment"
                    );
                    skipped.push(SkippedAttachment {
                        file_name: resource.file_name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        note.attachments = attachments;
    }

    let unresolved = relink::unresolved(&note.content);
    if !unresolved.is_empty() {
        warn!(
            note = %note.title,
            hashes = %unresolved.join(", "),
            "Failed to resolve attachment references"
        );
    }
    let leftover_markers = relink::leftover_markers(&note.content);
    if leftover_markers > 0 {
        warn!(
            note = %note.title,
            count = leftover_markers,
            "Attachment markers left in content"
        );
    }

    fs::write(&allocation.path, html::render(&note)).map_err(|source| EmitError::WriteNote {
        path: allocation.path.clone(),
        source,
    })?;

    Ok(NoteReport {
        title: note.title,
        path: allocation.path,
        stored,
        skipped,
        unresolved,
        leftover_markers,
    })
}
