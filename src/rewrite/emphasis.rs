//! Styled span → `<b>` / `<i>` conversion.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Transform;

static SPAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<span.*?</span>").expect("valid span regex"));

static STYLED_SPAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<span style=(?P<formatting>.*?)>(?P<content>.*)</span>$")
        .expect("valid styled span regex")
});

const BOLD: &str = "font-weight: bold;";
const ITALIC: &str = "font-style: italic;";

/// Rewrites `<span style="...">` using bold and/or italic styles into tags.
///
/// A styled span holding only a line break collapses to `<br />`. Spans
/// with other styles are kept.
pub struct StyledSpans;

impl StyledSpans {
    fn convert(span: &str) -> Option<String> {
        let caps = STYLED_SPAN_RE.captures(span)?;
        let formatting = &caps["formatting"];
        let content = &caps["content"];

        if content == "<br />" || content == "<br/>" {
            return Some("<br />".to_string());
        }

        let bold = formatting.contains(BOLD);
        let italic = formatting.contains(ITALIC);
        match (bold, italic) {
            (true, true) => Some(format!("<i><b>{}</b></i>", content)),
            (true, false) => Some(format!("<b>{}</b>", content)),
            (false, true) => Some(format!("<i>{}</i>", content)),
            (false, false) => None,
        }
    }
}

impl Transform for StyledSpans {
    fn transform(&mut self, content: &mut String) {
        if !content.contains("<span") {
            return;
        }

        let rewritten = SPAN_RE.replace_all(content, |caps: &regex::Captures| {
            let span = &caps[0];
            Self::convert(span).unwrap_or_else(|| span.to_string())
        });
        *content = rewritten.into_owned();
    }
}
