use std::io;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use humansize::{format_size, DECIMAL};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use enex2html::cli::Cli;
use enex2html::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "enex2html", &mut io::stdout());
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);

    let archive = cli
        .enex_file
        .as_deref()
        .context("No ENEX file given")?;

    println!(
        "Processing input file: {}, writing output to folder '{}'.",
        archive.display(),
        config.output.root.display()
    );

    let conversion = enex2html::convert(archive, &config)?;
    let summary = &conversion.summary;

    println!(
        "Wrote {} note(s) and {} attachment(s) ({}) to {}",
        summary.documents(),
        summary.attachments(),
        format_size(summary.attachment_bytes(), DECIMAL),
        conversion.output_dir.display()
    );
    if summary.skipped() > 0 || summary.notes_with_unresolved() > 0 {
        println!(
            "{} attachment(s) skipped, {} note(s) with unresolved attachment references",
            summary.skipped(),
            summary.notes_with_unresolved()
        );
    }

    Ok(())
}
