//! Per-run output folder: `<root>/<YYYYMMDD_HHMMSS>/<archive-name>/`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::EmitError;
use crate::files::filename::{self, Config};

/// Folder name used when the archive name sanitizes to nothing.
const FALLBACK_ARCHIVE_NAME: &str = "export";

/// Timestamp layout of the run folder.
const RUN_FOLDER_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Safe name of the archive's file name up to its first `.`.
pub fn archive_folder_name(archive: &Path, config: &Config) -> String {
    let file_name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or_default();
    let name = filename::safe_name(stem, 0, config);
    if name.is_empty() {
        FALLBACK_ARCHIVE_NAME.to_string()
    } else {
        name
    }
}

/// Path of the run folder without creating it.
pub fn run_folder(root: &Path, archive: &Path, now: DateTime<Local>, config: &Config) -> PathBuf {
    root.join(now.format(RUN_FOLDER_FORMAT).to_string())
        .join(archive_folder_name(archive, config))
}

/// Creates the run folder (and parents) for `archive` under `root`.
pub fn create_run_folder(
    root: &Path,
    archive: &Path,
    now: DateTime<Local>,
    config: &Config,
) -> Result<PathBuf, EmitError> {
    let folder = run_folder(root, archive, now, config);
    fs::create_dir_all(&folder).map_err(|source| EmitError::CreateDir {
        path: folder.clone(),
        source,
    })?;
    Ok(folder)
}
