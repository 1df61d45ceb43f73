//! Bar: one trading day of OHLC prices.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Daily OHLC bar.
///
/// Volume is deliberately absent: nothing downstream reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Why a bar was rejected by the series store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BarError {
    #[error("{field} price is not a finite number")]
    NonFinitePrice { field: &'static str },

    #[error("{field} price must be positive (got {value})")]
    NonPositivePrice { field: &'static str, value: f64 },

    #[error("high/low range does not contain open and close")]
    InconsistentRange,

    #[error("date {date} does not follow previous bar date {previous}")]
    DateNotIncreasing { date: NaiveDate, previous: NaiveDate },
}

impl Bar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
        }
    }

    /// Returns true if any OHLC field is NaN or infinite.
    pub fn is_void(&self) -> bool {
        self.prices().iter().any(|(_, v)| !v.is_finite())
    }

    /// Check the per-bar invariants (finite, positive, consistent range).
    ///
    /// Date ordering is a property of the sequence and is checked by
    /// [`PriceSeries`](crate::domain::PriceSeries).
    pub fn validate(&self) -> Result<(), BarError> {
        for (field, value) in self.prices() {
            if !value.is_finite() {
                return Err(BarError::NonFinitePrice { field });
            }
            if value <= 0.0 {
                return Err(BarError::NonPositivePrice { field, value });
            }
        }
        let sane = self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close;
        if !sane {
            return Err(BarError::InconsistentRange);
        }
        Ok(())
    }

    fn prices(&self) -> [(&'static str, f64); 4] {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ]
    }
}
