//! Minimal HTML document for one note.

use crate::enex::Note;

/// Escapes text for use inside an HTML attribute value or element.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn meta(name: &str, content: &str) -> String {
    format!("<meta name=\"{}\" content=\"{}\">", name, escape(content))
}

/// Builds the document one line per element.
///
/// The note content is inserted as-is on a single logical line.
pub fn document_lines(note: &Note) -> Vec<String> {
    let title = escape(&note.title);
    let mut lines = Vec::with_capacity(16);

    lines.push("<html><head>".to_string());
    lines.push(format!("<title>{}</title>", title));
    if let Some(author) = &note.author {
        lines.push(meta("author", author));
    }
    if let Some(created) = &note.created {
        lines.push(meta("created", created));
    }
    if let Some(updated) = &note.updated {
        lines.push(meta("updated", updated));
    }
    lines.push(meta("source", "Evernote"));
    if let Some(source_url) = &note.source_url {
        lines.push(meta("source_url", source_url));
    }
    if let (Some(lat), Some(lon)) = (&note.location.latitude, &note.location.longitude) {
        lines.push(meta("geo.position", &format!("{};{}", lat, lon)));
    }
    lines.push(meta("tags", &note.tags_string));
    lines.push("<style>".to_string());
    lines.push("body { font-family: Arial, sans-serif; }".to_string());
    lines.push("</style>".to_string());
    lines.push(String::new());
    lines.push("</head><body>".to_string());
    lines.push(format!("<h1>{}</h1>", title));
    lines.push(note.content.clone());
    lines.push("</body></html>".to_string());
    lines
}

/// The full document text, every line newline-terminated.
pub fn render(note: &Note) -> String {
    let mut out = String::new();
    for line in document_lines(note) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
