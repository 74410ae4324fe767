//! Development tasks for enex2html.
//!
//! Run with `cargo xtask <command>`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask", about = "enex2html development tasks")]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate the enex2html(1) man page
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().command {
        Task::Man { out } => generate_man(&out),
    }
}

fn generate_man(out: &Path) -> Result<()> {
    let command = enex2html::cli::Cli::command();
    let man = clap_mangen::Man::new(command);

    let mut buffer = Vec::new();
    man.render(&mut buffer)
        .context("Failed to render man page")?;

    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;
    let path = out.join("enex2html.1");
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote {}", path.display());
    Ok(())
}
