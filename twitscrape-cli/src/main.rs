//! twitscrape CLI — scrape sentiment, volume and posts for ticker symbols.
//!
//! Commands:
//! - `scrape` — hydrate the given symbols and print what was found
//! - `demo` — same, over a fixed list that mixes real and bogus symbols
//! - `config` — print the effective configuration as TOML

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;
use twitscrape_core::{present, Hydrator, ScrapeConfig, StocktwitsFetcher, SymbolStore};

const DEMO_SYMBOLS: [&str; 4] = ["HOGE.X", "Doesnt exist", "SAFEMOON.X", "Fake"];

#[derive(Parser)]
#[command(
    name = "twitscrape",
    about = "twitscrape — social sentiment, volume and posts per ticker symbol"
)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Log every HTTP attempt.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch sentiment, volume and posts for symbols and print the results.
    Scrape {
        /// Symbols to scrape (e.g., AAPL TSLA BTC.X).
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Scrape a fixed list of real and made-up symbols.
    Demo {
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.json_logs, cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Scrape { symbols, format } => run_scrape(&config, symbols, format),
        Commands::Demo { format } => {
            let symbols = DEMO_SYMBOLS.iter().map(|s| s.to_string()).collect();
            run_scrape(&config, symbols, format)
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ScrapeConfig> {
    match path {
        Some(path) => ScrapeConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(ScrapeConfig::default()),
    }
}

fn run_scrape(config: &ScrapeConfig, symbols: Vec<String>, format: OutputFormat) -> Result<()> {
    let fetcher = StocktwitsFetcher::from_config(config).context("building HTTP client")?;
    let hydrator = Hydrator::new(fetcher);

    let mut store = SymbolStore::new(symbols);
    let report = hydrator.hydrate(&mut store);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => present::render_all(&store, &mut out)?,
        OutputFormat::Json => present::render_json(&store, &mut out)?,
    }
    out.flush()?;

    if report.attempted > 0 && report.survivors() == 0 {
        warn!("none of the {} requested symbols returned data", report.attempted);
        std::process::exit(1);
    }

    Ok(())
}
