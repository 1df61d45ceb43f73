//! CSV bar source.
//!
//! Reads the common `Date,Open,High,Low,Close[,Adj Close,Volume]` export
//! layout. Header names match case-insensitively for the usual spellings;
//! unknown columns are ignored. Empty price cells become NaN and are left
//! for the series store to reject.

use super::provider::{keep_tail, BarSource, DataError};
use crate::domain::Bar;
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Date", alias = "date", alias = "DATE", alias = "Datetime")]
    date: String,
    #[serde(rename = "Open", alias = "open", alias = "OPEN")]
    open: Option<f64>,
    #[serde(rename = "High", alias = "high", alias = "HIGH")]
    high: Option<f64>,
    #[serde(rename = "Low", alias = "low", alias = "LOW")]
    low: Option<f64>,
    #[serde(rename = "Close", alias = "close", alias = "CLOSE")]
    close: Option<f64>,
}

/// Parse bars from any CSV reader.
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<Bar>, DataError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut bars = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: CsvRecord = record.deserialize(Some(&headers))?;
        let date = parse_date(&row.date).ok_or_else(|| DataError::Parse {
            line,
            reason: format!("unrecognized date '{}'", row.date),
        })?;
        let price = |v: Option<f64>| v.unwrap_or(f64::NAN);
        bars.push(Bar::new(
            date,
            price(row.open),
            price(row.high),
            price(row.low),
            price(row.close),
        ));
    }
    Ok(bars)
}

/// Accept `YYYY-MM-DD`, optionally followed by a time component.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Directory(PathBuf),
}

/// Bars from a single CSV file, or from `<dir>/<TICKER>.csv`.
#[derive(Debug, Clone)]
pub struct CsvSource {
    location: Location,
}

impl CsvSource {
    /// Serve every ticker from one file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
        }
    }

    /// Serve each ticker from its own file in `dir`.
    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::Directory(dir.into()),
        }
    }

    fn resolve(&self, ticker: &str) -> Result<PathBuf, DataError> {
        match &self.location {
            Location::File(path) => Ok(path.clone()),
            Location::Directory(dir) => [ticker.to_string(), ticker.to_uppercase()]
                .iter()
                .map(|t| dir.join(format!("{t}.csv")))
                .find(|p| p.is_file())
                .ok_or_else(|| DataError::SymbolNotFound {
                    symbol: ticker.to_string(),
                }),
        }
    }
}

fn open(path: &Path) -> Result<std::fs::File, DataError> {
    std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl BarSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self, ticker: &str, lookback: usize) -> Result<Vec<Bar>, DataError> {
        let path = self.resolve(ticker)?;
        let bars = read_bars(open(&path)?)?;
        debug!(ticker, path = %path.display(), rows = bars.len(), "read CSV bars");
        if bars.len() < lookback {
            warn!(
                ticker,
                rows = bars.len(),
                lookback,
                "CSV holds fewer bars than requested"
            );
        }
        Ok(keep_tail(bars, lookback))
    }
}
