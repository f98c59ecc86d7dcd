//! Batch command - scan multiple OCR result files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use cardscan_core::{CardScanner, RecognizedText, ScanResult};

use super::scan::{format_cards, prepare_cards, OutputFormat, ScanOverrides};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    #[command(flatten)]
    overrides: ScanOverrides,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of scanning a single file.
struct FileResult {
    path: PathBuf,
    scan: Option<ScanResult>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = args.overrides.apply(super::load_config(config_path)?)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("json")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to scan",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let scanner = CardScanner::from_config(&config.extraction);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match scan_single_file(&path, &scanner) {
            Ok(scan) => {
                results.push(FileResult {
                    path,
                    scan: Some(scan),
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to scan {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        scan: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to scan {}: {}", path.display(), error_msg);
                    anyhow::bail!("Scanning failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    // Write outputs
    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            let Some(scan) = &result.scan else { continue };

            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("cards");
            let output_path =
                output_dir.join(format!("{}.cards.{}", output_name, args.format.extension()));

            let cards = prepare_cards(&scan.cards, &config.output);
            fs::write(&output_path, format_cards(&cards, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = results.iter().filter(|r| r.scan.is_some()).count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let total_cards: usize = results
        .iter()
        .filter_map(|r| r.scan.as_ref())
        .map(|s| s.cards.len())
        .sum();

    println!();
    println!(
        "{} Scanned {} files in {:?}, {} card records",
        style("✓").green(),
        results.len(),
        start.elapsed(),
        total_cards
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn scan_single_file(path: &Path, scanner: &CardScanner) -> anyhow::Result<ScanResult> {
    let text = RecognizedText::from_file(path)?;
    Ok(scanner.scan(&text))
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "lines_scanned",
        "lines_skipped",
        "cards",
        "card_numbers",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(scan) = &result.scan {
            let card_numbers = scan.cards.iter().filter(|c| c.card_number.is_some()).count();

            wtr.write_record([
                filename,
                "success",
                scan.lines_scanned.to_string().as_str(),
                scan.lines_skipped.to_string().as_str(),
                scan.cards.len().to_string().as_str(),
                card_numbers.to_string().as_str(),
                scan.processing_time_ms.to_string().as_str(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
