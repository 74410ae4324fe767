//! Filename generation and collision handling for notes and attachments.
//!
//! Note documents get a safe name derived from the title, suffixed with a
//! counter while a file of that name already exists on disk. Attachments are
//! deduplicated per note by prefixing a sequence number.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Minimum allowed value for max_length.
const MIN_MAX_LENGTH: usize = 1;

/// Fallback base name when a title sanitizes to nothing.
const FALLBACK_NAME: &str = "untitled";

/// Configuration for safe-name generation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum length of a safe name before any counter suffix (default: 70, minimum: 1).
    pub max_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_length: 70 }
    }
}

impl Config {
    /// Creates a new Config, ensuring max_length is at least 1.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length: max_length.max(MIN_MAX_LENGTH),
        }
    }
}

/// Converts a human-readable string into a filesystem-safe token.
///
/// Applies the following transformations in order:
/// 1. Spaces → underscores
/// 2. Everything but letters, digits and underscores removed
/// 3. Truncated to `config.max_length` characters
/// 4. `_<counter>` appended when `counter > 0`
pub fn safe_name(input: &str, counter: u32, config: &Config) -> String {
    let mut result: String = input
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .take(config.max_length)
        .collect();

    if counter > 0 {
        result.push('_');
        result.push_str(&counter.to_string());
    }
    result
}

/// Safe base name for a note title, never empty.
pub fn note_base(title: &str, config: &Config) -> String {
    let name = safe_name(title, 0, config);
    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

/// A free output location for one note document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Resolved base name (without `.html`), also used for the attachments folder.
    pub base: String,
    /// Full path of the `.html` document.
    pub path: PathBuf,
}

impl Allocation {
    /// Name of the sibling folder holding this note's attachments.
    pub fn attachments_dir_name(&self) -> String {
        format!("{}_attachments", self.base)
    }
}

/// Picks `<dir>/<base>.html`, or `<dir>/<base>_<n>.html` with the smallest
/// `n` whose file does not exist yet.
pub fn allocate(dir: &Path, base: &str, config: &Config) -> Allocation {
    let mut counter = 0;
    let mut candidate = base.to_string();
    loop {
        let path = dir.join(format!("{}.html", candidate));
        if !path.exists() {
            return Allocation {
                base: candidate,
                path,
            };
        }
        counter += 1;
        candidate = safe_name(base, counter, config);
    }
}

/// Attachment file names already handed out within one note.
#[derive(Debug, Default)]
pub struct UniqueNames {
    seen: HashSet<String>,
    sequence: u32,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `name`, or `<n>_name` for the next free sequence number,
    /// and records the result as taken.
    ///
    /// The sequence counter is shared by all names in the note, so a second
    /// collision on a different name continues from the last number used.
    pub fn claim(&mut self, name: &str) -> String {
        let mut proposed = name.to_string();
        while self.seen.contains(&proposed) {
            self.sequence += 1;
            proposed = format!("{}_{}", self.sequence, name);
        }
        self.seen.insert(proposed.clone());
        proposed
    }

    /// Forget everything; used at note boundaries.
    pub fn reset(&mut self) {
        self.seen.clear();
        self.sequence = 0;
    }
}
