//! phac CLI - phase-amplitude coupling analysis of WAV recordings.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "phac")]
#[command(author, version, about = "Phase-amplitude coupling analysis", long_about = None)]
struct Cli {
    /// Analysis settings (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure coupling between one slow and one fast band
    Pac(commands::pac::PacArgs),

    /// Sweep slow and fast band series and write the coupling table as CSV
    Comodulogram(commands::comodulogram::ComodulogramArgs),

    /// Generate a synthetic recording with known coupling
    Generate(commands::generate::GenerateArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for JSON and CSV output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Pac(args) => commands::pac::run(args, config),
        Commands::Comodulogram(args) => commands::comodulogram::run(args, config),
        Commands::Generate(args) => commands::generate::run(args),
    }
}
