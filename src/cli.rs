//! Command line definitions.
//!
//! Kept in the library so `xtask` can render the man page from them.

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::config::Config;

/// Version string with build metadata from `build.rs`.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "-",
    env!("VERGEN_GIT_SHA"),
    " (",
    env!("ENEX2HTML_BUILD_DATE"),
    ")"
);

/// Version string with build metadata from `build.rs`.
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("ENEX2HTML_BUILD_DATE"),
    ")"
);

/// Convert an Evernote ENEX export into standalone HTML files.
///
/// Every note becomes `<title>.html`; attachments are decoded into a
/// `<title>_attachments/` folder next to it and linked from the note.
#[derive(Debug, Parser)]
#[command(name = "enex2html", version = VERSION, about, long_about)]
pub struct Cli {
    /// The ENEX export to convert
    #[arg(value_name = "ENEX_FILE", required_unless_present = "completions")]
    pub enex_file: Option<PathBuf>,

    /// Parent folder for run output (default: ./output)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Remove <div> wrappers inside tables
    #[arg(long)]
    pub tables: bool,

    /// Convert bold/italic styled spans to <b>/<i>
    #[arg(long)]
    pub emphasis: bool,

    /// Show debug output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Applies command line overrides on top of file configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.output.root = output.clone();
        }
        if self.tables {
            config.rewrite.tables = true;
        }
        if self.emphasis {
            config.rewrite.emphasis = true;
        }
    }

    /// Default tracing filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "warn,enex2html=debug"
        } else {
            "warn,enex2html=info"
        }
    }
}
