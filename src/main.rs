mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// itinex - weather-aware trip itineraries
#[derive(Parser)]
#[command(name = "itinex")]
#[command(about = "Weather-aware itinerary planning", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new itinerary from an attraction pool and forecast
    Generate(cli::generate::GenerateArgs),
    /// Replace one slot of a day with an unused attraction
    Replace(cli::repair::ReplaceArgs),
    /// Swap morning and evening of a day
    Swap(cli::repair::SwapArgs),
    /// Propose fresh activities for a day
    Repair(cli::repair::RepairArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = itinex::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    itinex::observability::init_observability(
        "itinex",
        env!("CARGO_PKG_VERSION"),
        &config.logging.level,
        &config.logging.format,
    )?;

    match cli.command {
        Commands::Generate(args) => cli::generate::generate(&config, args),
        Commands::Replace(args) => cli::repair::replace(args),
        Commands::Swap(args) => cli::repair::swap(args),
        Commands::Repair(args) => cli::repair::repair(args),
    }
}
