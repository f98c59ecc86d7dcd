//! Check command - validate a single card number.

use chrono::Local;
use clap::Args;
use console::style;

use cardscan_core::card::rules::parse_expiry;
use cardscan_core::card::validator::{format_card_number, mask_number_with};
use cardscan_core::{classify_network, is_valid_luhn};

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Card number (spaces and hyphens allowed)
    #[arg(required = true)]
    number: String,

    /// Expiry date to check (MM/YY or MM/YYYY)
    #[arg(short, long)]
    expiry: Option<String>,

    /// Print the full number instead of the masked form
    #[arg(long)]
    reveal: bool,
}

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let digits: String = args.number.chars().filter(|c| c.is_ascii_digit()).collect();

    let shown = if args.reveal {
        format_card_number(&digits)
    } else {
        format_card_number(&mask_number_with(&digits, '*'))
    };
    println!("Number:   {}", shown);

    match classify_network(&digits) {
        Some(network) => println!("Network:  {}", network),
        None => println!("Network:  {}", style("unknown").yellow()),
    }

    let valid = is_valid_luhn(&digits);
    if valid {
        println!("Checksum: {}", style("valid").green());
    } else {
        println!("Checksum: {}", style("invalid").red());
    }

    let mut expired = false;
    if let Some(expiry_text) = &args.expiry {
        let Some(expiry) = parse_expiry(expiry_text) else {
            anyhow::bail!("Invalid expiry date: {} (expected MM/YY)", expiry_text);
        };

        expired = expiry.is_expired_on(Local::now().date_naive());
        if expired {
            println!("Expiry:   {:02}/{} {}", expiry.month, expiry.year, style("expired").red());
        } else {
            println!("Expiry:   {:02}/{} {}", expiry.month, expiry.year, style("current").green());
        }
    }

    if !valid {
        anyhow::bail!("Card number failed the Luhn checksum");
    }
    if expired {
        anyhow::bail!("Card has expired");
    }

    Ok(())
}
