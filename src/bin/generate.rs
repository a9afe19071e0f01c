//! Deck generation CLI.
//!
//! Writes the renderer's JSON to stdout (or `--output`); statistics and
//! any imbalance warning go to stderr so they never pollute the
//! interchange stream.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use goal_deck::assign::EngineConfig;
use goal_deck::catalog::DeckCatalog;
use goal_deck::output::{to_json, to_records, DeckStats};

#[derive(Parser, Debug)]
#[command(name = "generate", about = "Generate a balanced goal-card deck")]
struct Args {
    /// Seed for the generation run. Same seed, same deck.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Append this many goal-less market-manipulation cards (must be even).
    #[arg(long, default_value_t = 0)]
    manipulation: usize,

    /// Enable frequency balancing with this max-min appearance spread.
    #[arg(long)]
    frequency_threshold: Option<u32>,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let _ = env_logger::try_init();
    let args = Args::parse();

    let mut catalog = DeckCatalog::standard();
    if args.manipulation > 0 {
        catalog = catalog
            .with_manipulation(args.manipulation)
            .context("invalid manipulation card count")?;
    }

    let config = EngineConfig {
        frequency_threshold: args.frequency_threshold,
        ..EngineConfig::default()
    };

    let deck = goal_deck::generate(&catalog, &config, args.seed)
        .context("deck generation failed")?;

    let json = to_json(&to_records(&deck))?;
    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }

    eprintln!("{}", DeckStats::from_deck(&deck));
    if let Some(warning) = &deck.warning {
        eprintln!("warning: {warning}");
    }

    Ok(())
}
