//! Result assembly.
//!
//! Packages the latest scalars, the recommendation, and the full cleaned
//! frame into a transport-ready [`ResultRecord`]. Field names and the
//! parallel-array block shape are the consumer contract: `ma50` and `ma200`
//! carry the configured fast and slow moving averages whatever their windows.
//!
//! # Rounding
//! Every reported number goes through [`round2`]: round half away from zero
//! at two decimals, applied to the binary `f64` value, with negative zero
//! normalized to `0.0`.

use crate::engine::align::{AlignedFrame, AlignedRow};
use crate::signals::{Action, ClassifierPolicy, Qualifier, Recommendation};
use serde::{Deserialize, Serialize};

/// ISO calendar date format used for every reported date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Round to two decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    /// Date of the latest aligned row.
    pub as_of: String,
    /// Number of rows in every series block.
    pub rows: usize,
    pub price: f64,
    pub ma50: f64,
    pub ma200: f64,
    pub rsi: f64,
    pub bb_upper: f64,
    pub bb_lower: f64,
    pub recommendation: String,
    pub signal: SignalSummary,
    pub ohlc: OhlcBlock,
    pub macd: MacdBlock,
    pub rsi_series: RsiBlock,
}

/// Structured form of the recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSummary {
    pub action: Action,
    pub qualifier: Option<Qualifier>,
    pub policy: ClassifierPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcBlock {
    pub dates: Vec<String>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub ma50: Vec<f64>,
    pub ma200: Vec<f64>,
    pub bb_upper: Vec<f64>,
    pub bb_middle: Vec<f64>,
    pub bb_lower: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdBlock {
    pub dates: Vec<String>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiBlock {
    pub dates: Vec<String>,
    pub rsi: Vec<f64>,
}

/// Build the record for one invocation.
pub fn assemble(
    frame: &AlignedFrame,
    recommendation: Recommendation,
    policy: ClassifierPolicy,
    ticker: Option<&str>,
) -> ResultRecord {
    let latest = frame.latest();
    let dates: Vec<String> = frame
        .dates()
        .iter()
        .map(|d| d.format(DATE_FORMAT).to_string())
        .collect();
    let col = |f: fn(&AlignedRow) -> f64| -> Vec<f64> {
        frame.column(f).into_iter().map(round2).collect()
    };

    ResultRecord {
        ticker: ticker.map(str::to_string),
        as_of: latest.date.format(DATE_FORMAT).to_string(),
        rows: frame.len(),
        price: round2(latest.close),
        ma50: round2(latest.ma_fast),
        ma200: round2(latest.ma_slow),
        rsi: round2(latest.rsi),
        bb_upper: round2(latest.bb_upper),
        bb_lower: round2(latest.bb_lower),
        recommendation: recommendation.to_string(),
        signal: SignalSummary {
            action: recommendation.action,
            qualifier: recommendation.qualifier,
            policy,
        },
        ohlc: OhlcBlock {
            dates: dates.clone(),
            open: col(|r| r.open),
            high: col(|r| r.high),
            low: col(|r| r.low),
            close: col(|r| r.close),
            ma50: col(|r| r.ma_fast),
            ma200: col(|r| r.ma_slow),
            bb_upper: col(|r| r.bb_upper),
            bb_middle: col(|r| r.bb_middle),
            bb_lower: col(|r| r.bb_lower),
        },
        macd: MacdBlock {
            dates: dates.clone(),
            macd: col(|r| r.macd),
            signal: col(|r| r.macd_signal),
            histogram: col(|r| r.macd_histogram),
        },
        rsi_series: RsiBlock {
            dates,
            rsi: col(|r| r.rsi),
        },
    }
}
