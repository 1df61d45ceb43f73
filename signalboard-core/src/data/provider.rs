//! Bar source trait and structured data errors.
//!
//! A `BarSource` is the input collaborator of the pipeline: given a ticker and
//! a lookback it returns ascending daily bars. It never validates prices;
//! that is the series store's job, so an empty or malformed result reaches
//! the analyzer and surfaces there as a typed `AnalysisError`.

use crate::domain::Bar;
use std::path::PathBuf;
use thiserror::Error;

/// Bars requested when the caller does not say otherwise (about one year).
pub const DEFAULT_LOOKBACK: usize = 252;

/// Smallest lookback that leaves a usable tail after the 200-day warm-up.
pub const MIN_LOOKBACK: usize = 210;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {reason}")]
    Parse { line: u64, reason: String },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },
}

/// Trait for bar sources (CSV files, synthetic data).
pub trait BarSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Return at most `lookback` of the most recent daily bars for `ticker`,
    /// oldest first.
    fn fetch(&self, ticker: &str, lookback: usize) -> Result<Vec<Bar>, DataError>;
}

/// Keep only the trailing `lookback` bars.
pub(crate) fn keep_tail(mut bars: Vec<Bar>, lookback: usize) -> Vec<Bar> {
    let start = bars.len().saturating_sub(lookback);
    bars.split_off(start)
}
