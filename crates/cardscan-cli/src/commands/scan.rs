//! Scan command - extract card fields from a single OCR result file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use cardscan_core::card::validator::format_card_number;
use cardscan_core::models::config::{CardScanConfig, OutputConfig};
use cardscan_core::{CardNetwork, CardScanner, ExtractedCard, RecognizedText};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input file (OCR result as JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    #[command(flatten)]
    overrides: ScanOverrides,

    /// Show line statistics
    #[arg(long)]
    stats: bool,
}

/// Extraction and output settings that override the config file.
#[derive(Args, Clone, Default)]
pub struct ScanOverrides {
    /// Minimum line confidence (0.0 - 1.0)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Disable CVV extraction
    #[arg(long)]
    no_cvv: bool,

    /// Mask card numbers and drop CVVs in output
    #[arg(long)]
    mask: bool,
}

impl ScanOverrides {
    /// Apply the overrides to a loaded configuration.
    pub fn apply(&self, mut config: CardScanConfig) -> anyhow::Result<CardScanConfig> {
        if let Some(threshold) = self.threshold {
            config.extraction.confidence_threshold = threshold;
        }
        if self.no_cvv {
            config.extraction.extract_cvv = false;
        }
        if self.mask {
            config.output.mask_numbers = true;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = args.overrides.apply(super::load_config(config_path)?)?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Scanning file: {}", args.input.display());

    let text = RecognizedText::from_file(&args.input)?;
    debug!("Loaded {} blocks, {} lines", text.blocks.len(), text.line_count());

    let scanner = CardScanner::from_config(&config.extraction);
    let result = scanner.scan(&text);

    let cards = prepare_cards(&result.cards, &config.output);
    let output = format_cards(&cards, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.stats {
        eprintln!();
        eprintln!(
            "{} Lines scanned: {}, skipped below {:.2}: {}",
            style("ℹ").blue(),
            result.lines_scanned,
            scanner.confidence_threshold(),
            result.lines_skipped
        );
        eprintln!(
            "{} Card records: {}",
            style("ℹ").blue(),
            result.cards.len()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// A card record as written to output, with its network resolved before
/// any masking is applied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardOutput {
    #[serde(flatten)]
    pub card: ExtractedCard,
    pub network: Option<CardNetwork>,
}

/// Apply output settings (masking, CVV inclusion) to extracted cards.
pub fn prepare_cards(cards: &[ExtractedCard], output: &OutputConfig) -> Vec<CardOutput> {
    cards
        .iter()
        .map(|card| {
            let network = card.network();
            let mut card = if output.mask_numbers {
                card.redacted(output.mask_char)
            } else {
                card.clone()
            };
            if !output.include_cvv {
                card.cvv = None;
            }
            CardOutput { card, network }
        })
        .collect()
}

pub fn format_cards(cards: &[CardOutput], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(cards)?),
        OutputFormat::Csv => format_csv(cards),
        OutputFormat::Text => Ok(format_text(cards)),
    }
}

fn format_csv(cards: &[CardOutput]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    // Write header
    wtr.write_record([
        "card_number",
        "network",
        "expiry_date",
        "cardholder_name",
        "cvv",
        "confidence",
        "raw_text",
    ])?;

    for CardOutput { card, network } in cards {
        wtr.write_record([
            card.card_number.as_deref().unwrap_or_default(),
            network.map(|n| n.name()).unwrap_or_default(),
            card.expiry_date.as_deref().unwrap_or_default(),
            card.cardholder_name.as_deref().unwrap_or_default(),
            card.cvv.as_deref().unwrap_or_default(),
            format!("{:.2}", card.confidence).as_str(),
            card.raw_text.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(cards: &[CardOutput]) -> String {
    if cards.is_empty() {
        return "No card data found.\n".to_string();
    }

    let mut output = String::new();

    for (i, CardOutput { card, network }) in cards.iter().enumerate() {
        output.push_str(&format!("Record {} (confidence {:.2}):\n", i + 1, card.confidence));

        if let Some(number) = &card.card_number {
            output.push_str(&format!("  Number:  {}\n", format_card_number(number)));
            if let Some(network) = network {
                output.push_str(&format!("  Network: {}\n", network));
            }
        }
        if let Some(expiry) = &card.expiry_date {
            output.push_str(&format!("  Expiry:  {}\n", expiry));
        }
        if let Some(name) = &card.cardholder_name {
            output.push_str(&format!("  Name:    {}\n", name));
        }
        if let Some(cvv) = &card.cvv {
            output.push_str(&format!("  CVV:     {}\n", cvv));
        }
        output.push_str(&format!("  Text:    {}\n", card.raw_text));
    }

    output
}
