//! Extractor state machine.
//!
//! Two modal flags decide where a field goes: inside a resource only
//! resource fields are read, inside a note (but not a resource) only note
//! fields. Everything outside a note is ignored.

use tracing::{debug, warn};

use super::event::ArchiveEvent;
use super::{timestamp, ExtractOptions, Note, Resource};
use crate::error::ExtractError;
use crate::files::filename::{self, UniqueNames};
use crate::rewrite;

/// Mime type assumed for a resource that has neither name nor mime type.
const DEFAULT_MIME: &str = "image/jpeg";

/// Resource fields as read, before finalization.
#[derive(Debug, Default)]
struct ResourceDraft {
    mime_type: Option<String>,
    data: Option<String>,
    width: Option<String>,
    height: Option<String>,
    file_name: Option<String>,
}

/// Builds [`Note`] records from a stream of [`ArchiveEvent`]s.
pub struct Extractor {
    options: ExtractOptions,
    in_note: bool,
    in_resource: bool,
    note: Note,
    resource: ResourceDraft,
    names: UniqueNames,
    notes: Vec<Note>,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            in_note: false,
            in_resource: false,
            note: Note::default(),
            resource: ResourceDraft::default(),
            names: UniqueNames::new(),
            notes: Vec::new(),
        }
    }

    /// Advances the state machine by one event.
    ///
    /// Fails only on a present but unparsable timestamp.
    pub fn handle(&mut self, event: ArchiveEvent) -> Result<(), ExtractError> {
        match event {
            ArchiveEvent::EnterNote => {
                self.reset();
                self.in_note = true;
            }
            ArchiveEvent::ExitNote => {
                if self.in_note {
                    self.finish_note();
                }
            }
            ArchiveEvent::EnterResource => {
                if self.in_note {
                    self.resource = ResourceDraft::default();
                    self.in_resource = true;
                }
            }
            ArchiveEvent::ExitResource => {
                if self.in_resource {
                    self.finish_resource();
                }
            }
            ArchiveEvent::Field { name, text } => {
                if self.in_resource {
                    self.resource_field(&name, text);
                } else if self.in_note {
                    self.note_field(&name, text)?;
                }
            }
        }
        Ok(())
    }

    /// Notes completed so far, in document order.
    pub fn finish(self) -> Vec<Note> {
        self.notes
    }

    fn note_field(&mut self, name: &str, text: String) -> Result<(), ExtractError> {
        match name {
            "title" => {
                self.note.filename_base = filename::note_base(&text, &self.options.naming);
                self.note.title = text;
            }
            "created" => self.note.created = timestamp::normalize("created", &text)?,
            "updated" => self.note.updated = timestamp::normalize("updated", &text)?,
            "author" => self.note.author = non_blank(text),
            "source" => self.note.source = non_blank(text),
            "source-url" => self.note.source_url = non_blank(text),
            "tag" => {
                if !text.is_empty() && !self.note.tags.contains(&text) {
                    self.note.tags.push(text);
                }
            }
            "content" => self.finish_content(text),
            "latitude" => self.note.location.latitude = non_blank(text),
            "longitude" => self.note.location.longitude = non_blank(text),
            "altitude" => self.note.location.altitude = non_blank(text),
            _ => {}
        }
        Ok(())
    }

    fn resource_field(&mut self, name: &str, text: String) {
        let draft = &mut self.resource;
        match name {
            "mime" | "mime-type" => draft.mime_type = non_blank(text),
            "data" => draft.data.get_or_insert_with(String::new).push_str(&text),
            "width" => draft.width = non_blank(text),
            "height" => draft.height = non_blank(text),
            "file-name" => draft.file_name = non_blank(text),
            _ => {}
        }
    }

    fn finish_content(&mut self, raw: String) {
        let rewritten = rewrite::rewrite(raw, &self.options.rewrite);
        if !rewritten.wrapper_found && !rewritten.content.trim().is_empty() {
            warn!(
                note = %self.note.title,
                "Content has no <en-note> wrapper, keeping it unchanged"
            );
        }
        self.note.content = rewritten.content;
        self.note.tags_string = self.note.tags.join(", ");
    }

    fn finish_resource(&mut self) {
        let draft = std::mem::take(&mut self.resource);
        self.in_resource = false;

        let mut mime_type = draft.mime_type;
        let file_name = match draft.file_name.as_deref().and_then(base_name) {
            Some(name) => name,
            None => {
                if mime_type.is_none() {
                    warn!(
                        note = %self.note.title,
                        "Resource without file name and mime type, assuming {}", DEFAULT_MIME
                    );
                    mime_type = Some(DEFAULT_MIME.to_string());
                }
                format!("noname.{}", extension_for(mime_type.as_deref().unwrap_or_default()))
            }
        };
        let file_name = self.names.claim(&file_name.replace(':', "_"));

        let data: String = draft
            .data
            .unwrap_or_default()
            .split_whitespace()
            .collect();
        if data.is_empty() {
            warn!(
                note = %self.note.title,
                attachment = %file_name,
                "Resource has no data, ignoring it"
            );
            return;
        }

        self.note.attachments.push(Resource {
            mime_type,
            data,
            width: draft.width,
            height: draft.height,
            file_name,
        });
    }

    fn finish_note(&mut self) {
        let mut note = std::mem::take(&mut self.note);
        if note.filename_base.is_empty() {
            note.filename_base = filename::note_base(&note.title, &self.options.naming);
        }
        // Tags usually follow <content> in ENEX, so join them again here.
        note.tags_string = note.tags.join(", ");

        debug!(
            note = %note.title,
            attachments = note.attachments.len(),
            "Extracted note"
        );
        self.notes.push(note);
        self.reset();
    }

    fn reset(&mut self) {
        self.note = Note::default();
        self.resource = ResourceDraft::default();
        self.names.reset();
        self.in_note = false;
        self.in_resource = false;
    }
}

/// File extension for a synthesized attachment name.
fn extension_for(mime_type: &str) -> &'static str {
    if mime_type.ends_with("jpeg") {
        "jpg"
    } else if mime_type.ends_with("png") {
        "png"
    } else if mime_type.ends_with("gif") {
        "gif"
    } else {
        "txt"
    }
}

/// Last path segment of an archive-supplied file name, without leading dots.
///
/// Names are written inside the note's attachments folder, so separators
/// and `.`/`..` segments never survive.
fn base_name(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let trimmed = last.trim_start_matches('.').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
