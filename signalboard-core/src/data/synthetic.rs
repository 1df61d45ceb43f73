//! Synthetic bar source.
//!
//! Deterministic random walk seeded from the ticker (BLAKE3 of its name), one
//! bar per weekday, ending at a fixed `as_of` date. Same ticker, lookback,
//! and date always give the same bars. Developer/demo use only.

use super::provider::{BarSource, DataError};
use crate::domain::Bar;
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct SyntheticSource {
    as_of: NaiveDate,
    start_price: f64,
}

impl SyntheticSource {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            start_price: 100.0,
        }
    }

    pub fn with_start_price(mut self, price: f64) -> Self {
        self.start_price = price;
        self
    }
}

impl BarSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, ticker: &str, lookback: usize) -> Result<Vec<Bar>, DataError> {
        Ok(generate_bars(ticker, self.as_of, lookback, self.start_price))
    }
}

/// The `count` weekdays ending at (or before) `end`, oldest first.
fn trading_days(end: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut current = end;
    while days.len() < count {
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(current);
        }
        match current.pred_opt() {
            Some(prev) => current = prev,
            None => break,
        }
    }
    days.reverse();
    days
}

fn generate_bars(ticker: &str, end: NaiveDate, count: usize, start_price: f64) -> Vec<Bar> {
    let seed: [u8; 32] = *blake3::hash(ticker.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut price = start_price;
    trading_days(end, count)
        .into_iter()
        .map(|date| {
            let daily_return: f64 = rng.gen_range(-0.03..0.03);
            let open = price;
            let close = price * (1.0 + daily_return);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            price = close;
            Bar::new(date, open, high, low, close)
        })
        .collect()
}
