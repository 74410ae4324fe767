//! One conversion run: archive in, output folder out.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use humansize::{format_size, DECIMAL};
use tracing::info;

use crate::config::Config;
use crate::emit::{self, output, RunSummary};
use crate::enex;

/// Result of a finished run.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// `<root>/<timestamp>/<archive-name>/`
    pub output_dir: PathBuf,
    pub summary: RunSummary,
}

/// Converts the archive at `archive` into a fresh run folder under
/// `config.output.root`.
///
/// The whole archive is extracted before anything is written.
pub fn convert(archive: &Path, config: &Config) -> Result<Conversion> {
    let notes = enex::extract_file(archive, &config.extract_options())
        .with_context(|| format!("Failed to read archive {}", archive.display()))?;
    info!(count = notes.len(), "Extracted notes");

    let output_dir =
        output::create_run_folder(&config.output.root, archive, Local::now(), &config.naming())?;
    let summary = emit::write_notes(notes, &output_dir, &config.emit_options())
        .with_context(|| format!("Failed to write notes to {}", output_dir.display()))?;

    info!(
        documents = summary.documents(),
        attachments = summary.attachments(),
        skipped = summary.skipped(),
        size = %format_size(summary.attachment_bytes(), DECIMAL),
        "Wrote notes"
    );

    Ok(Conversion {
        output_dir,
        summary,
    })
}
