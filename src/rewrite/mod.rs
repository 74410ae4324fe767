//! Inline markup rewrite pipeline for note content.
//!
//! Raw ENEX content is ENML: an XML preamble, an `<en-note>` wrapper and
//! proprietary tags for attachments and checkboxes. The pipeline turns it
//! into plain HTML through a fixed sequence of string passes:
//!
//! 1. [`EnvelopeStrip`] - keep only what sits inside `<en-note>`
//! 2. [`MediaPlaceholders`] - `<en-media hash=...>` → placeholder token
//! 3. [`TaskCheckboxes`] - `<en-todo checked=...>` → `[x] ` / `[ ] `
//! 4. [`TableDivs`] - optional, unwraps `<div>` inside tables
//! 5. [`StyledSpans`] - optional, styled `<span>` → `<b>` / `<i>`
//!
//! Each pass only looks at the small, fixed markup dialect Evernote emits.
//! None of them is a general HTML parser.

mod emphasis;
mod envelope;
mod media;
mod tables;
mod tasks;

pub use emphasis::StyledSpans;
pub use envelope::EnvelopeStrip;
pub use media::{MediaPlaceholders, Placeholder, PLACEHOLDER_PREFIX};
pub use tables::TableDivs;
pub use tasks::TaskCheckboxes;

/// A single in-place rewrite pass over note content.
pub trait Transform {
    fn transform(&mut self, content: &mut String);
}

/// Which optional passes run after the default ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Remove `<div>` wrappers inside `<table>` regions.
    pub tables: bool,
    /// Convert bold/italic styled spans to `<b>` / `<i>`.
    pub emphasis: bool,
}

/// Result of running the pipeline over one note's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub content: String,
    /// False when the content had no `<en-note>` wrapper and was kept whole.
    pub wrapper_found: bool,
    /// Number of attachment markers turned into placeholders.
    pub placeholders: usize,
}

/// Runs every enabled pass over `raw`, in pipeline order.
pub fn rewrite(raw: String, options: &RewriteOptions) -> Rewritten {
    let mut content = raw;

    let mut envelope = EnvelopeStrip::new();
    envelope.transform(&mut content);

    let mut media = MediaPlaceholders::new();
    media.transform(&mut content);

    TaskCheckboxes.transform(&mut content);

    if options.tables {
        TableDivs.transform(&mut content);
    }
    if options.emphasis {
        StyledSpans.transform(&mut content);
    }

    Rewritten {
        content,
        wrapper_found: envelope.wrapper_found(),
        placeholders: media.replaced_count(),
    }
}
