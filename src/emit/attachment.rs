//! Attachment decoding, hashing and writing.

use std::fs;
use std::path::{Component, Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::enex::Resource;
use crate::error::AttachmentError;

/// An attachment written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAttachment {
    /// Lowercase hex MD5 of the decoded bytes.
    pub hash: String,
    /// Decoded size in bytes.
    pub size: usize,
    pub path: PathBuf,
}

/// An attachment that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAttachment {
    pub file_name: String,
    pub reason: String,
}

/// Content hash used to match placeholders.
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}

/// True when `name` is exactly one normal path component.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

/// Decodes the resource into `dir/<file_name>` and hashes it.
///
/// The file is always created directly inside `dir`.
pub fn store(dir: &Path, resource: &Resource) -> Result<StoredAttachment, AttachmentError> {
    if !is_plain_file_name(&resource.file_name) {
        return Err(AttachmentError::UnsafeName {
            name: resource.file_name.clone(),
        });
    }
    let bytes = BASE64.decode(resource.data.as_bytes())?;
    let path = dir.join(&resource.file_name);
    fs::write(&path, &bytes).map_err(|source| AttachmentError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(StoredAttachment {
        hash: content_hash(&bytes),
        size: bytes.len(),
        path,
    })
}
