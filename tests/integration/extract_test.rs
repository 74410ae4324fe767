//! Tests for reading notes out of ENEX archives.

use enex2html::enex::{self, ExtractOptions};
use enex2html::error::ExtractError;
use enex2html::rewrite::RewriteOptions;

use crate::helpers::{fixtures_dir, load_fixture};

fn extract(name: &str) -> Vec<enex2html::Note> {
    enex::extract_file(fixtures_dir().join(name), &ExtractOptions::default())
        .expect("Failed to extract fixture")
}

// ============================================================================
// Note Fields
// ============================================================================

#[test]
fn meeting_note_fields_are_extracted() {
    let notes = extract("meeting.enex");
    assert_eq!(notes.len(), 1);

    let note = &notes[0];
    assert_eq!(note.title, "Meeting Notes");
    assert_eq!(note.filename_base, "Meeting_Notes");
    assert_eq!(note.created.as_deref(), Some("05.03.2021 10:00:00 GMT"));
    assert_eq!(note.updated.as_deref(), Some("05.03.2021 11:00:00 GMT"));
    assert_eq!(note.author.as_deref(), Some("Ann Example"));
    assert_eq!(note.source.as_deref(), Some("desktop.mac"));
}

#[test]
fn tags_after_content_still_reach_tags_string() {
    let notes = extract("meeting.enex");
    assert_eq!(notes[0].tags, vec!["work", "q1"]);
    assert_eq!(notes[0].tags_string, "work, q1");
}

#[test]
fn duplicate_tags_are_kept_once() {
    let notes = extract("mixed.enex");
    assert_eq!(notes[0].tags_string, "home, list");
}

#[test]
fn notes_are_returned_in_document_order() {
    let notes = extract("mixed.enex");
    let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Shopping & Errands", "Invoice: March", ""]);
}

#[test]
fn empty_title_falls_back_to_untitled_base() {
    let notes = extract("mixed.enex");
    assert_eq!(notes[2].filename_base, "untitled");
}

#[test]
fn location_and_source_url_are_read_from_attributes() {
    let notes = extract("mixed.enex");
    let invoice = &notes[1];
    assert_eq!(invoice.location.latitude.as_deref(), Some("52.52"));
    assert_eq!(invoice.location.longitude.as_deref(), Some("13.40"));
    assert_eq!(invoice.location.altitude, None);
    assert_eq!(
        invoice.source_url.as_deref(),
        Some("https://example.com/invoice?id=3&v=1")
    );
}

// ============================================================================
// Content Rewriting
// ============================================================================

#[test]
fn content_envelope_is_stripped_and_media_replaced() {
    let notes = extract("meeting.enex");
    assert_eq!(
        notes[0].content,
        "<div>Agenda</div>ATCHMT:902fbdd2b1df0c4f70b4a5d23525e932:2000:1000:"
    );
}

#[test]
fn checkboxes_become_text_markers() {
    let notes = extract("mixed.enex");
    let content = &notes[0].content;
    assert!(content.contains("<div>[x] milk</div>"));
    assert!(content.contains("<div>[ ] bread</div>"));
    assert!(!content.contains("en-todo"));
}

#[test]
fn optional_passes_are_off_by_default() {
    let notes = extract("mixed.enex");
    let content = &notes[0].content;
    assert!(content.contains("<td><div>cell</div></td>"));
    assert!(content.contains("<span style=\"font-weight: bold;\">loud</span>"));
}

#[test]
fn optional_passes_apply_when_enabled() {
    let options = ExtractOptions {
        rewrite: RewriteOptions {
            tables: true,
            emphasis: true,
        },
        ..ExtractOptions::default()
    };
    let notes = enex::extract_str(&load_fixture("mixed.enex"), &options).unwrap();
    let content = &notes[0].content;
    assert!(content.contains("<td>cell</td>"));
    assert!(content.contains("<b>loud</b>"));
}

// ============================================================================
// Attachments
// ============================================================================

#[test]
fn resource_fields_are_collected() {
    let notes = extract("meeting.enex");
    let attachments = &notes[0].attachments;
    assert_eq!(attachments.len(), 1);

    let image = &attachments[0];
    assert_eq!(image.mime_type.as_deref(), Some("image/png"));
    assert_eq!(image.data, "QUJD");
    assert_eq!(image.width.as_deref(), Some("2000"));
    assert_eq!(image.height.as_deref(), Some("1000"));
    assert_eq!(image.file_name, "noname.png");
    assert!(image.is_image());
}

#[test]
fn default_names_get_sequence_prefix_within_note() {
    let notes = extract("drafts.enex");
    let names: Vec<&str> = notes[1]
        .attachments
        .iter()
        .map(|r| r.file_name.as_str())
        .collect();
    assert_eq!(names, vec!["noname.jpg", "1_noname.jpg"]);
}

#[test]
fn multi_line_data_is_joined_without_whitespace() {
    let notes = extract("drafts.enex");
    let data = &notes[1].attachments[1].data;
    assert!(!data.contains(char::is_whitespace));
    assert!(data.starts_with("AAECAwQF"));
    assert!(data.ends_with("xsc="));
}

#[test]
fn colons_in_attachment_names_are_replaced() {
    let notes = extract("mixed.enex");
    let pdf = &notes[1].attachments[0];
    assert_eq!(pdf.file_name, "invoice_ march.pdf");
    assert!(!pdf.is_image());
}

#[test]
fn resource_fields_do_not_leak_into_note() {
    let xml = r#"<en-export><note><title>Outer</title>
        <resource><data>QUJD</data><mime>image/png</mime>
        <resource-attributes><source-url>https://inner.example</source-url></resource-attributes>
        </resource></note></en-export>"#;
    let notes = enex::extract_str(xml, &ExtractOptions::default()).unwrap();
    assert_eq!(notes[0].title, "Outer");
    assert_eq!(notes[0].source_url, None);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn missing_file_is_open_error() {
    let err = enex::extract_file(fixtures_dir().join("absent.enex"), &ExtractOptions::default())
        .unwrap_err();
    assert!(matches!(err, ExtractError::Open { .. }));
}

#[test]
fn truncated_archive_is_error() {
    let xml = "<en-export><note><title>Half</title>";
    assert!(enex::extract_str(xml, &ExtractOptions::default()).is_err());
}

#[test]
fn invalid_timestamp_is_error() {
    let xml = "<en-export><note><title>T</title><created>not a date</created></note></en-export>";
    let err = enex::extract_str(xml, &ExtractOptions::default()).unwrap_err();
    assert!(matches!(err, ExtractError::Timestamp { field: "created", .. }));
}

#[test]
fn archive_without_notes_is_empty() {
    let notes = enex::extract_str("<en-export></en-export>", &ExtractOptions::default()).unwrap();
    assert!(notes.is_empty());
}
