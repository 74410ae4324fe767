//! Table cleanup.
//!
//! Evernote wraps every table cell's text in `<div>`, which renders as extra
//! vertical space. Only `<div>` tags inside `<table>` regions are removed.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Transform;

static TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<table.*?</table>").expect("valid table regex"));

/// Removes `<div>` and `</div>` inside table regions.
pub struct TableDivs;

impl Transform for TableDivs {
    fn transform(&mut self, content: &mut String) {
        if !content.contains("<table") {
            return;
        }

        let mut result = String::with_capacity(content.len());
        let mut last = 0;
        for table in TABLE_RE.find_iter(content) {
            result.push_str(&content[last..table.start()]);
            result.push_str(&table.as_str().replace("<div>", "").replace("</div>", ""));
            last = table.end();
        }
        result.push_str(&content[last..]);

        *content = result;
    }
}
