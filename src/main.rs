//! Main entry point for the unwad CLI application.
//!
//! Opens one WAD archive, decodes its metadata and either lists it or
//! extracts every entry below the chosen directory.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use unwad::{Cli, ExtractStatus, LocalFileReader, SkipReason, WadExtractor};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let reader = LocalFileReader::open(Path::new(&cli.file))
        .with_context(|| format!("Unable to open file {}", cli.file))?;
    let mut extractor = WadExtractor::open(reader)
        .with_context(|| format!("Unable to decode {}", cli.file))?;

    if !cli.is_very_quiet() {
        println!("{}", extractor.archive().banner());
    }

    if cli.list {
        list_archive(&extractor);
        return Ok(());
    }

    let out_dir = Path::new(cli.extract_dir.as_deref().unwrap_or("."));
    let quiet = cli.is_quiet();

    let summary = extractor.extract_all(out_dir, &cli.extract_options(), |p| {
        if quiet {
            return;
        }
        let name = p.entry.file_name();
        match p.status {
            ExtractStatus::Extracted { bytes } => {
                println!("  extracting: {name} ({bytes} bytes)... OK")
            }
            ExtractStatus::Skipped(SkipReason::Exists) => {
                eprintln!("Skipping: {name} (file exists)")
            }
            ExtractStatus::Skipped(SkipReason::EmptyName) => {}
        }
    })?;

    if !cli.is_very_quiet() {
        println!(
            "{} files extracted, {} skipped ({} bytes)",
            summary.extracted, summary.skipped, summary.bytes
        );
    }

    Ok(())
}

/// Print every entry, then the directory index (V2 only).
fn list_archive<R>(extractor: &WadExtractor<R>)
where
    R: std::io::Read + std::io::Seek,
{
    let archive = extractor.archive();
    for entry in &archive.entries {
        println!("{entry}");
    }

    if !archive.indices.is_empty() {
        println!();
        for index in &archive.indices {
            println!("{index}");
        }
    }

    println!("{} bytes in {} files", archive.total_size(), archive.entries.len());
}
