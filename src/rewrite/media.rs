//! Attachment marker → placeholder substitution.
//!
//! `<en-media>` references an attachment by the MD5 of its bytes. The real
//! file name is only known once the attachment is decoded, so the marker is
//! replaced by a placeholder token that the relinker resolves later:
//!
//! ```text
//! <en-media hash="4fa2..." type="image/png" width="800px" height="600"/>
//! → ATCHMT:4fa2...:800:600:
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::Transform;

/// Prefix shared by every placeholder token.
pub const PLACEHOLDER_PREFIX: &str = "ATCHMT:";

/// A whole `<en-media>` element, self-closed or with a closing tag.
static MEDIA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<en-media\b([^>]*?)\s*(?:/>|>.*?</en-media>)").expect("valid en-media regex")
});

/// One `name="value"` attribute.
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_][-\w:.]*)\s*=\s*"([^"]*)""#).expect("valid attribute regex")
});

/// Pixel dimension, optionally suffixed with `px`.
static DIMENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*(?:px)?\s*$").expect("valid dimension regex"));

/// Decoded contents of a placeholder token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Lowercase hex content hash.
    pub hash: String,
    /// Declared width in pixels, empty when absent or not a pixel value.
    pub width: String,
    /// Declared height in pixels, empty when absent or not a pixel value.
    pub height: String,
}

impl Placeholder {
    /// Reads the hash and pixel size from the attributes of an `<en-media>` tag.
    ///
    /// Returns `None` when there is no usable `hash` attribute.
    pub fn from_attributes(attributes: &str) -> Option<Self> {
        let mut hash = None;
        let mut width = String::new();
        let mut height = String::new();

        for caps in ATTR_RE.captures_iter(attributes) {
            let value = &caps[2];
            match &caps[1] {
                "hash" => hash = Some(value.to_ascii_lowercase()),
                "width" => width = pixels(value),
                "height" => height = pixels(value),
                _ => {}
            }
        }

        let hash = hash.filter(|h| !h.is_empty() && h.chars().all(|c| c.is_ascii_hexdigit()))?;
        Some(Self {
            hash,
            width,
            height,
        })
    }

    /// The textual token inserted into content.
    pub fn token(&self) -> String {
        format!(
            "{}{}:{}:{}:",
            PLACEHOLDER_PREFIX, self.hash, self.width, self.height
        )
    }
}

fn pixels(value: &str) -> String {
    DIMENSION_RE
        .captures(value)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// Rewrites every `<en-media>` marker that carries a hash into a placeholder.
///
/// Markers without a hash are left as they are.
pub struct MediaPlaceholders {
    replaced: usize,
}

impl MediaPlaceholders {
    pub fn new() -> Self {
        Self { replaced: 0 }
    }

    /// Number of markers replaced so far.
    pub fn replaced_count(&self) -> usize {
        self.replaced
    }
}

impl Default for MediaPlaceholders {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for MediaPlaceholders {
    fn transform(&mut self, content: &mut String) {
        if !content.contains("<en-media") {
            return;
        }

        let mut replaced = 0;
        let rewritten = MEDIA_RE.replace_all(content, |caps: &Captures| {
            match Placeholder::from_attributes(&caps[1]) {
                Some(placeholder) => {
                    replaced += 1;
                    placeholder.token()
                }
                None => caps[0].to_string(),
            }
        });
        let rewritten = rewritten.into_owned();

        self.replaced += replaced;
        *content = rewritten;
    }
}
