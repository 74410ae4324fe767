//! Integration tests for enex2html.

mod helpers;

mod cli_test;
mod extract_test;
