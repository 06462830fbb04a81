//! Batch processing command for many invoice documents.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use invx_core::batch::combined_text;
use invx_core::{process_documents, BatchReport, Document};

use super::{build_extractor, load_config, ModeArg};
use crate::input::collect_documents;
use crate::output::{format_rows, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory, glob pattern or ZIP archive
    #[arg(required = true)]
    input: String,

    /// Output file for the combined table (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Extraction mode (default: from config)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// API key for AI mode (default: from the configured environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Write all document texts, with per-file separators, to this file
    #[arg(long)]
    dump_text: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let documents = collect_documents(&args.input, &config.input)?;
    if documents.is_empty() {
        anyhow::bail!("No matching files found for: {}", args.input);
    }

    eprintln!(
        "{} Found {} documents to process",
        style("ℹ").blue(),
        documents.len()
    );

    if let Some(dump_path) = &args.dump_text {
        fs::write(dump_path, combined_text(&documents))?;
        debug!("Wrote combined text to {}", dump_path.display());
    }

    let extractor = build_extractor(&config, args.mode, args.api_key.clone())?;

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(documents.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // One document at a time so the bar advances per file.
    let mut report = BatchReport::default();
    for doc in &documents {
        let partial = process_documents(std::iter::once(doc), extractor.as_ref());
        merge(&mut report, partial);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let output = format_rows(&report.rows, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} {} rows written to {}",
            style("✓").green(),
            report.rows.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    print_summary(&report, &documents, start);
    Ok(())
}

fn merge(report: &mut BatchReport, partial: BatchReport) {
    report.documents += partial.documents;
    report.rows.extend(partial.rows);
    report.failures.extend(partial.failures);
}

fn print_summary(report: &BatchReport, documents: &[Document], start: Instant) {
    eprintln!();
    eprintln!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        documents.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed, {} line items",
        style(report.succeeded()).green(),
        style(report.failures.len()).red(),
        report.rows.len()
    );

    if report.rows.is_empty() {
        eprintln!(
            "{} No line items were extracted. Check the document text or invoice format.",
            style("!").yellow()
        );
    }

    if !report.failures.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for failure in &report.failures {
            eprintln!("  - {}: {}", failure.file_name, failure.message);
        }
    }
}
