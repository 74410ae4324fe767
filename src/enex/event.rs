//! Boundary events read incrementally from an ENEX document.
//!
//! The reader never builds a tree. It keeps the stack of open element names
//! and one text buffer for the element currently being read; the buffer is
//! handed out (moved, not copied) when that element closes, so a multi-MB
//! base64 `<data>` body is held exactly once.

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ExtractError;

const NOTE: &str = "note";
const RESOURCE: &str = "resource";

/// What the extractor state machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEvent {
    EnterNote,
    ExitNote,
    EnterResource,
    ExitResource,
    /// A non-structural element closed. `text` is all of its character data,
    /// text and CDATA fragments concatenated in order.
    Field { name: String, text: String },
}

impl ArchiveEvent {
    pub fn field(name: impl Into<String>, text: impl Into<String>) -> Self {
        ArchiveEvent::Field {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Owned view of one quick-xml event, detached from the read buffer.
enum Raw {
    Start(String),
    End(String),
    Empty(String),
    Text(String),
    Eof,
    Other,
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Iterator of [`ArchiveEvent`]s over an ENEX document.
pub struct EventReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    text: String,
    open: Vec<String>,
    pending: Option<ArchiveEvent>,
    finished: bool,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(false);
        reader.check_end_names(true);
        Self {
            reader,
            buf: Vec::new(),
            text: String::new(),
            open: Vec::new(),
            pending: None,
            finished: false,
        }
    }

    fn read_raw(&mut self) -> Result<Raw, ExtractError> {
        let raw = match self.reader.read_event_into(&mut self.buf)? {
            Event::Start(e) => Raw::Start(element_name(e.local_name().as_ref())),
            Event::End(e) => Raw::End(element_name(e.local_name().as_ref())),
            Event::Empty(e) => Raw::Empty(element_name(e.local_name().as_ref())),
            Event::Text(e) => Raw::Text(e.unescape()?.into_owned()),
            Event::CData(e) => Raw::Text(self.reader.decoder().decode(&e)?.into_owned()),
            Event::Eof => Raw::Eof,
            _ => Raw::Other,
        };
        self.buf.clear();
        Ok(raw)
    }

    fn next_event(&mut self) -> Result<Option<ArchiveEvent>, ExtractError> {
        if let Some(event) = self.pending.take() {
            return Ok(Some(event));
        }

        loop {
            match self.read_raw()? {
                Raw::Start(name) => {
                    self.text.clear();
                    let event = match name.as_str() {
                        NOTE => Some(ArchiveEvent::EnterNote),
                        RESOURCE => Some(ArchiveEvent::EnterResource),
                        _ => None,
                    };
                    self.open.push(name);
                    if event.is_some() {
                        return Ok(event);
                    }
                }
                Raw::End(name) => {
                    self.open.pop();
                    let text = std::mem::take(&mut self.text);
                    return Ok(Some(match name.as_str() {
                        NOTE => ArchiveEvent::ExitNote,
                        RESOURCE => ArchiveEvent::ExitResource,
                        _ => ArchiveEvent::Field { name, text },
                    }));
                }
                Raw::Empty(name) => {
                    self.text.clear();
                    return Ok(Some(match name.as_str() {
                        NOTE => {
                            self.pending = Some(ArchiveEvent::ExitNote);
                            ArchiveEvent::EnterNote
                        }
                        RESOURCE => {
                            self.pending = Some(ArchiveEvent::ExitResource);
                            ArchiveEvent::EnterResource
                        }
                        _ => ArchiveEvent::Field {
                            name,
                            text: String::new(),
                        },
                    }));
                }
                Raw::Text(text) => {
                    if !self.open.is_empty() {
                        self.text.push_str(&text);
                    }
                }
                Raw::Eof => {
                    if let Some(open) = self.open.pop() {
                        return Err(ExtractError::UnexpectedEof { open });
                    }
                    return Ok(None);
                }
                Raw::Other => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<ArchiveEvent, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
