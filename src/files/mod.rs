//! File naming for converted notes and attachments.

pub mod filename;
