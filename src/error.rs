//! Error types for archive extraction and note emission.

use std::path::PathBuf;

/// Errors that abort extraction of an archive.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Failed to open archive: {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed archive markup: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Archive ended while <{open}> was still open")]
    UnexpectedEof { open: String },

    #[error("Unparsable {field} timestamp: {value:?}")]
    Timestamp { field: &'static str, value: String },
}

/// Errors for a single attachment. Never fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("Invalid base64 data: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Attachment name {name:?} is not a plain file name")]
    UnsafeName { name: String },

    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort emission of the output tree.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write note {path}")]
    WriteNote {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
