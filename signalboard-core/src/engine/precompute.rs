//! Indicator precomputation.
//!
//! The standard indicator set is computed once over the close projection.
//! Each transform is independent of the others; results land in
//! `IndicatorColumns`, one column per aligned-frame field.

use crate::config::IndicatorConfig;
use crate::indicators::{Bollinger, Indicator, Macd, Rsi, Sma};
use tracing::debug;

/// Output of the indicator engine, every column the length of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorColumns {
    pub ma_fast: Vec<f64>,
    pub ma_slow: Vec<f64>,
    pub rsi: Vec<f64>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_histogram: Vec<f64>,
    pub bb_upper: Vec<f64>,
    pub bb_middle: Vec<f64>,
    pub bb_lower: Vec<f64>,
}

/// The named indicator instances behind each column.
#[derive(Debug, Clone)]
pub struct StandardIndicators {
    pub ma_fast: Sma,
    pub ma_slow: Sma,
    pub rsi: Rsi,
    pub macd: Macd,
    pub macd_signal: Macd,
    pub macd_histogram: Macd,
    pub bb_upper: Bollinger,
    pub bb_middle: Bollinger,
    pub bb_lower: Bollinger,
}

impl StandardIndicators {
    pub fn from_config(cfg: &IndicatorConfig) -> Self {
        let (fast, slow, signal) = (cfg.macd_fast, cfg.macd_slow, cfg.macd_signal);
        Self {
            ma_fast: Sma::new(cfg.ma_fast),
            ma_slow: Sma::new(cfg.ma_slow),
            rsi: Rsi::new(cfg.rsi_period),
            macd: Macd::line(fast, slow, signal),
            macd_signal: Macd::signal(fast, slow, signal),
            macd_histogram: Macd::histogram(fast, slow, signal),
            bb_upper: Bollinger::upper(cfg.bollinger_period, cfg.bollinger_k),
            bb_middle: Bollinger::middle(cfg.bollinger_period, cfg.bollinger_k),
            bb_lower: Bollinger::lower(cfg.bollinger_period, cfg.bollinger_k),
        }
    }

    pub fn all(&self) -> [&dyn Indicator; 9] {
        [
            &self.ma_fast,
            &self.ma_slow,
            &self.rsi,
            &self.macd,
            &self.macd_signal,
            &self.macd_histogram,
            &self.bb_upper,
            &self.bb_middle,
            &self.bb_lower,
        ]
    }

    /// Longest warm-up across the set; the aligned frame starts here.
    pub fn warmup(&self) -> usize {
        compute_warmup(&self.all())
    }

    pub fn compute(&self, closes: &[f64]) -> IndicatorColumns {
        IndicatorColumns {
            ma_fast: run_indicator(&self.ma_fast, closes),
            ma_slow: run_indicator(&self.ma_slow, closes),
            rsi: run_indicator(&self.rsi, closes),
            macd: run_indicator(&self.macd, closes),
            macd_signal: run_indicator(&self.macd_signal, closes),
            macd_histogram: run_indicator(&self.macd_histogram, closes),
            bb_upper: run_indicator(&self.bb_upper, closes),
            bb_middle: run_indicator(&self.bb_middle, closes),
            bb_lower: run_indicator(&self.bb_lower, closes),
        }
    }
}

fn run_indicator(indicator: &dyn Indicator, closes: &[f64]) -> Vec<f64> {
    let series = indicator.compute(closes);
    debug_assert_eq!(
        series.len(),
        closes.len(),
        "indicator '{}' produced {} values for {} closes",
        indicator.name(),
        series.len(),
        closes.len()
    );
    debug!(
        indicator = indicator.name(),
        lookback = indicator.lookback(),
        "computed indicator"
    );
    series
}

impl Default for StandardIndicators {
    fn default() -> Self {
        Self::from_config(&IndicatorConfig::default())
    }
}

/// Compute the warm-up length from a set of indicators.
pub fn compute_warmup(indicators: &[&dyn Indicator]) -> usize {
    indicators.iter().map(|i| i.lookback()).max().unwrap_or(0)
}
