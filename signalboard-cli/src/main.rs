//! Signalboard CLI: analyze one ticker and print the result as JSON.
//!
//! Commands:
//! - `analyze`: load bars (CSV file, data directory, or synthetic), run the
//!   indicator and signal pipeline, print a `ResultRecord`
//! - `config`: print the default analysis config as TOML

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use signalboard_core::data::{BarSource, CsvSource, SyntheticSource, DEFAULT_LOOKBACK, MIN_LOOKBACK};
use signalboard_core::{AnalysisConfig, AnalysisError, Analyzer, ClassifierPolicy, ErrorReport};
use tracing::{debug, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "signalboard",
    about = "Signalboard CLI: technical indicators and buy/sell/hold signals"
)]
struct Cli {
    /// Debug logging on stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the analysis pipeline for one ticker.
    Analyze {
        /// Ticker symbol (upper-cased).
        ticker: String,

        /// Read bars from a single CSV file.
        #[arg(long, conflicts_with_all = ["data_dir", "synthetic"])]
        csv: Option<PathBuf>,

        /// Read bars from <DATA_DIR>/<TICKER>.csv.
        #[arg(long, conflicts_with = "synthetic")]
        data_dir: Option<PathBuf>,

        /// Generate deterministic synthetic bars (no input file needed).
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Path to a TOML analysis config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Classifier policy. Overrides the config file.
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,

        /// Number of most recent bars to analyze.
        #[arg(long, default_value_t = DEFAULT_LOOKBACK)]
        lookback: usize,

        /// Last bar date for synthetic data (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        as_of: Option<String>,

        /// Pretty-print the JSON output.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Print the default analysis config as TOML.
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    RsiOnly,
    TrendRsi,
}

impl From<PolicyArg> for ClassifierPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::RsiOnly => ClassifierPolicy::RsiOnly,
            PolicyArg::TrendRsi => ClassifierPolicy::TrendRsi,
        }
    }
}

#[derive(Serialize)]
struct ErrorOutput {
    error: ErrorReport,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            ticker,
            csv,
            data_dir,
            synthetic,
            config,
            policy,
            lookback,
            as_of,
            pretty,
        } => {
            let source = build_source(csv, data_dir, synthetic, as_of.as_deref())?;
            run_analyze(&ticker, source.as_ref(), config, policy, lookback, pretty)
        }
        Commands::Config => {
            print!("{}", AnalysisConfig::default().to_toml()?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "signalboard=debug,signalboard_core=debug"
    } else {
        "signalboard=info,signalboard_core=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_source(
    csv: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    synthetic: bool,
    as_of: Option<&str>,
) -> Result<Box<dyn BarSource>> {
    if let Some(path) = csv {
        return Ok(Box::new(CsvSource::file(path)));
    }
    if let Some(dir) = data_dir {
        return Ok(Box::new(CsvSource::directory(dir)));
    }
    if synthetic {
        let as_of = as_of
            .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .transpose()
            .context("--as-of must be YYYY-MM-DD")?
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        return Ok(Box::new(SyntheticSource::new(as_of)));
    }
    bail!("one of --csv, --data-dir or --synthetic is required");
}

fn run_analyze(
    ticker: &str,
    source: &dyn BarSource,
    config_path: Option<PathBuf>,
    policy: Option<PolicyArg>,
    lookback: usize,
    pretty: bool,
) -> Result<()> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.is_empty() {
        bail!("ticker must not be empty");
    }
    if lookback < MIN_LOOKBACK {
        warn!(lookback, min = MIN_LOOKBACK, "lookback is shorter than the indicator warm-up allows");
    }

    let mut config = match &config_path {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(policy) = policy {
        config.signal.policy = policy.into();
    }

    let bars = source
        .fetch(&ticker, lookback)
        .with_context(|| format!("fetching {ticker} from {} source", source.name()))?;
    debug!(ticker = %ticker, source = source.name(), bars = bars.len(), "loaded bars");

    let analyzer = Analyzer::new(config).context("invalid analysis config")?;
    match analyzer.analyze_ticker(&ticker, bars) {
        Ok(record) => {
            println!("{}", to_json(&record, pretty)?);
            Ok(())
        }
        Err(err) => report_failure(&ticker, &err, pretty),
    }
}

fn report_failure(ticker: &str, err: &AnalysisError, pretty: bool) -> Result<()> {
    warn!(ticker, kind = err.kind(), "analysis failed: {err}");
    let output = ErrorOutput {
        error: err.report(),
    };
    println!("{}", to_json(&output, pretty)?);
    std::process::exit(1);
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
