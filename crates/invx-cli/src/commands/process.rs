//! Process command - extract line items from a single document.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use invx_core::source::load_text;
use invx_core::ItemRow;

use super::{build_extractor, load_config, ModeArg};
use crate::input::display_name;
use crate::output::{format_rows, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (.txt or .pdf), or "-" for text on stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Extraction mode (default: from config)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// API key for AI mode (default: from the configured environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Write the acquired document text to this file
    #[arg(long)]
    dump_text: Option<PathBuf>,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let (file_name, text) = if args.input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        ("stdin".to_string(), text)
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        info!("Processing file: {}", args.input.display());
        (
            display_name(&args.input.to_string_lossy()),
            load_text(&args.input)?,
        )
    };

    if let Some(dump_path) = &args.dump_text {
        fs::write(dump_path, &text)?;
        debug!("Wrote document text to {}", dump_path.display());
    }

    let extractor = build_extractor(&config, args.mode, args.api_key.clone())?;
    let items = extractor.extract_items(&text)?;

    let rows: Vec<ItemRow> = items
        .into_iter()
        .map(|item| ItemRow {
            file_name: file_name.clone(),
            item,
        })
        .collect();

    if rows.is_empty() {
        eprintln!(
            "{} No line items were extracted. Check the document text or invoice format.",
            style("!").yellow()
        );
    }

    let output = format_rows(&rows, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} {} rows written to {}",
            style("✓").green(),
            rows.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
