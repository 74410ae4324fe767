//! ENML envelope removal.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Transform;

/// Outermost `<en-note>` element, with or without attributes.
static EN_NOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<en-note(?:\s[^>]*)?>(.*)</en-note>").expect("valid en-note regex")
});

/// A note that is nothing but `<en-note/>`.
static EMPTY_EN_NOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<en-note(?:\s[^>]*?)?/>").expect("valid empty en-note regex"));

/// Keeps only the text strictly inside the outermost `<en-note>` wrapper.
///
/// Content without a wrapper is left untouched and reported through
/// [`EnvelopeStrip::wrapper_found`], so already-stripped content passes
/// through unchanged.
pub struct EnvelopeStrip {
    wrapper_found: bool,
}

impl EnvelopeStrip {
    pub fn new() -> Self {
        Self {
            wrapper_found: false,
        }
    }

    /// Whether the last transformed content carried a wrapper.
    pub fn wrapper_found(&self) -> bool {
        self.wrapper_found
    }
}

impl Default for EnvelopeStrip {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for EnvelopeStrip {
    fn transform(&mut self, content: &mut String) {
        let inner = EN_NOTE_RE
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        match inner {
            Some(inner) => {
                self.wrapper_found = true;
                *content = inner;
            }
            None if EMPTY_EN_NOTE_RE.is_match(content) => {
                self.wrapper_found = true;
                content.clear();
            }
            None => self.wrapper_found = false,
        }
    }
}
