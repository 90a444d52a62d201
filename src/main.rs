use analytics::PcaEngine;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use configuration::{Config, OutputFormat, init_logging, load_config};
use eigensolver::SolverSettings;
use returns::DateWindow;
use std::path::PathBuf;

mod render;

/// The main entry point for the Eigentrend application.
fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    // Keep the guard alive for the whole run so file logs are flushed on exit.
    let _log_guard = init_logging(&config.logging).context("Failed to initialize logging")?;

    // Execute the appropriate command
    match cli.command {
        Commands::Analyze(args) => handle_analyze(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Principal component analysis of the daily returns of an instrument basket.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file (defaults to ./config.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the PCA over a price document and print the result.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// JSON price document: { "YYYY-MM-DD": { "<instrument>": <price>, ... }, ... }.
    #[arg(long)]
    prices: PathBuf,

    /// The first trading date to include (format: YYYY-MM-DD).
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// The last trading date to include (format: YYYY-MM-DD).
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    /// Output format; overrides `report.format` from the configuration.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Also print the correlation matrix.
    #[arg(long)]
    correlation: bool,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

/// Handles the orchestration of a single analysis run.
fn handle_analyze(args: AnalyzeArgs, config: &Config) -> Result<()> {
    let basket = &config.basket.instruments;
    tracing::info!(file = %args.prices.display(), instruments = basket.len(), "Loading prices.");
    let prices = market_data::load_price_file(&args.prices, basket)
        .with_context(|| format!("Failed to load prices from {}", args.prices.display()))?;

    let settings = SolverSettings {
        max_sweeps: config.solver.max_sweeps,
        tolerance: config.solver.tolerance,
    };
    let mut engine = PcaEngine::new(settings, config.analysis.dominance);

    if let (Some(from), Some(to)) = (args.from, args.to) {
        let window = DateWindow::new(from, to).context("Invalid analysis window")?;
        engine = engine.with_window(window);
    }

    let report = engine.run(&prices).context("PCA analysis failed")?;
    tracing::info!(
        main_trend = %report.result.main_trend_instrument,
        trading_days = report.trading_days,
        "Analysis complete."
    );

    let format = args.format.unwrap_or(config.report.format);
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            let show_correlation = args.correlation || config.report.show_correlation;
            render::print_report(&report, show_correlation);
        }
    }

    Ok(())
}
