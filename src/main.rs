//! Main entry point for the unadat CLI application.
//!
//! Lists and extracts ADAT archives from the local filesystem or from
//! HTTP URLs.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use unadat::cli::Action;
use unadat::{AdatExtractor, Cli, FsSink, HttpRangeReader, LocalFileReader, PipeSink, ReadAt};

/// Application entry point.
///
/// Parses command-line arguments and dispatches to the appropriate handler
/// based on whether the archive is a local file or HTTP URL.
fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let source = cli.action.source();

    if source.is_http_url() {
        let reader = HttpRangeReader::new(source.archive.clone())
            .with_context(|| format!("failed to open {}", source.archive))?;
        let reader = Arc::new(reader);

        run(reader.clone(), &cli.action)?;

        // Display network transfer statistics for HTTP sources
        if !cli.action.is_quiet() {
            eprintln!(
                "\nTotal bytes transferred: {}",
                format_size(reader.transferred_bytes())
            );
        }
    } else {
        let reader = LocalFileReader::new(Path::new(&source.archive))
            .with_context(|| format!("failed to open {}", source.archive))?;
        run(Arc::new(reader), &cli.action)?;
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (warnings by default).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse the archive index and perform the requested action.
fn run<R: ReadAt>(reader: Arc<R>, action: &Action) -> Result<()> {
    let extractor = AdatExtractor::new(reader).context("failed to read archive index")?;

    match action {
        Action::List { verbose, .. } => list_entries(&extractor, *verbose),
        Action::Extract {
            entry,
            output,
            pipe,
            ..
        } => {
            if *pipe {
                extractor.pipe(entry, &mut PipeSink::stdout())?;
                return Ok(());
            }

            let extractor = extractor.with_output_root(&output.extract_dir);
            let path = extractor.extract(entry, &mut FsSink)?;
            if !output.quiet {
                println!("extracted: {}", path.display());
            }
            Ok(())
        }
        Action::ExtractAll { output, .. } => {
            let extractor = extractor.with_output_root(&output.extract_dir);
            let paths = extractor.extract_all(&mut FsSink)?;
            if !output.quiet {
                for path in &paths {
                    println!("extracted: {}", path.display());
                }
            }
            Ok(())
        }
    }
}

/// List entries in the archive.
///
/// Supports two output formats:
/// - Simple format: just entry names, one per line, in TOC order
/// - Verbose format (`-v`): table with sizes, compression ratio and offset
fn list_entries<R: ReadAt>(extractor: &AdatExtractor<R>, verbose: bool) -> Result<()> {
    let index = extractor.index();

    if !verbose {
        for name in index.names() {
            println!("{name}");
        }
        return Ok(());
    }

    println!(
        "{:>10}  {:>10}  {:>5}  {:>10}  Name",
        "Length", "Size", "Cmpr", "Offset"
    );
    println!("{}", "-".repeat(60));

    let mut total_uncompressed = 0u64;
    let mut total_compressed = 0u64;

    for entry in index.entries() {
        println!(
            "{:>10}  {:>10}  {:>4}%  {:>10}  {}",
            entry.length,
            entry.compressed_length,
            entry.compression_ratio(),
            entry.offset,
            entry.name
        );
        total_uncompressed += entry.length as u64;
        total_compressed += entry.compressed_length as u64;
    }

    println!("{}", "-".repeat(60));
    let total_ratio = if total_uncompressed > total_compressed {
        100 - (total_compressed * 100 / total_uncompressed)
    } else {
        0
    };
    println!(
        "{:>10}  {:>10}  {:>4}%  {:>10}  {} files",
        total_uncompressed,
        total_compressed,
        total_ratio,
        "",
        index.len()
    );

    Ok(())
}

/// Format a byte size into a human-readable string.
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
