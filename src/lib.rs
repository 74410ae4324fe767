//! enex2html - convert Evernote ENEX exports into standalone HTML.
//!
//! The pipeline reads the export once as a stream ([`enex`]), rewrites each
//! note's ENML into HTML ([`rewrite`]), and writes one document per note
//! plus decoded attachments ([`emit`]).

pub mod cli;
pub mod config;
pub mod convert;
pub mod emit;
pub mod enex;
pub mod error;
pub mod files;
pub mod rewrite;

pub use config::Config;
pub use convert::{convert, Conversion};
pub use enex::{Note, Resource};
