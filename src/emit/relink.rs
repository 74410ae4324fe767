//! Placeholder → `<img>` / `<a>` resolution.
//!
//! Once an attachment is decoded its MD5 is known, and every placeholder
//! carrying that hash is replaced by a reference to the written file.
//! Images keep their declared size unless it is missing, zero or wider than
//! the configured limit, in which case they scale to the page width.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::html::escape;
use crate::rewrite::PLACEHOLDER_PREFIX;

/// Any placeholder token, for detecting leftovers.
static ANY_PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"{}([0-9a-f]+):(\d*):(\d*):",
        regex::escape(PLACEHOLDER_PREFIX)
    ))
    .expect("valid placeholder regex")
});

/// How placeholders are turned into markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelinkPolicy {
    /// Images declared wider than this render at 100% width.
    pub max_inline_width: u32,
}

impl Default for RelinkPolicy {
    fn default() -> Self {
        Self {
            max_inline_width: 1800,
        }
    }
}

/// A written attachment that placeholders can point at.
#[derive(Debug, Clone, Copy)]
pub struct LinkTarget<'a> {
    /// Lowercase hex MD5 of the decoded bytes.
    pub hash: &'a str,
    /// Whether the attachment renders as an image.
    pub is_image: bool,
    /// Folder name relative to the note document, e.g. `Draft_attachments`.
    pub dir: &'a str,
    /// Resolved attachment file name.
    pub file_name: &'a str,
}

impl LinkTarget<'_> {
    fn src(&self) -> String {
        escape(&format!("{}/{}", self.dir, self.file_name))
    }

    /// Markup for one placeholder with the declared size.
    pub fn markup(&self, width: u32, height: u32, policy: &RelinkPolicy) -> String {
        let src = self.src();
        let name = escape(self.file_name);
        if !self.is_image {
            return format!("<a href=\"{}\">{}</a>", src, name);
        }
        if width == 0 || height == 0 || width > policy.max_inline_width {
            format!("<img src=\"{}\" alt=\"{}\" width=\"100%\">", src, name)
        } else {
            format!(
                "<img src=\"{}\" alt=\"{}\" width=\"{}\" height=\"{}\">",
                src, name, width, height
            )
        }
    }
}

/// Replaces every placeholder for `target.hash` in `content`.
///
/// Returns how many placeholders were replaced.
pub fn relink(content: &mut String, target: &LinkTarget<'_>, policy: &RelinkPolicy) -> usize {
    let pattern = format!(
        r"{}{}:(\d*):(\d*):",
        regex::escape(PLACEHOLDER_PREFIX),
        regex::escape(target.hash)
    );
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(_) => return 0,
    };

    let mut replaced = 0;
    let rewritten = re.replace_all(content, |caps: &Captures| {
        replaced += 1;
        let width = caps[1].parse().unwrap_or(0);
        let height = caps[2].parse().unwrap_or(0);
        target.markup(width, height, policy)
    });
    if replaced > 0 {
        *content = rewritten.into_owned();
    }
    replaced
}

/// Opening tag of an attachment marker that was never turned into a placeholder.
const MEDIA_MARKER: &str = "<en-media";

/// Number of raw `<en-media` markers still present in `content`.
pub fn leftover_markers(content: &str) -> usize {
    content.matches(MEDIA_MARKER).count()
}

/// Hashes of placeholders still present in `content`, in order, deduplicated.
pub fn unresolved(content: &str) -> Vec<String> {
    let mut hashes: Vec<String> = Vec::new();
    for caps in ANY_PLACEHOLDER_RE.captures_iter(content) {
        let hash = &caps[1];
        if !hashes.iter().any(|h| h == hash) {
            hashes.push(hash.to_string());
        }
    }
    hashes
}
