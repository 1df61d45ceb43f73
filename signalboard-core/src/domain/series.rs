//! PriceSeries: the validated, date-ordered bar container.
//!
//! This is the only structure the indicator engine reads. Construction is
//! the single validation point: once a `PriceSeries` exists, every bar is
//! finite, positive, range-consistent, and strictly after its predecessor.

use super::bar::{Bar, BarError};
use crate::error::AnalysisError;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<Bar>) -> Result<Self, AnalysisError> {
        if bars.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let mut previous: Option<NaiveDate> = None;
        for (index, bar) in bars.iter().enumerate() {
            let invalid = |reason| AnalysisError::InvalidBar {
                index,
                date: bar.date,
                reason,
            };
            bar.validate().map_err(invalid)?;
            if let Some(prev) = previous {
                if bar.date <= prev {
                    return Err(invalid(BarError::DateNotIncreasing {
                        date: bar.date,
                        previous: prev,
                    }));
                }
            }
            previous = Some(bar.date);
        }

        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn open(&self) -> Vec<f64> {
        self.project(|b| b.open)
    }

    pub fn high(&self) -> Vec<f64> {
        self.project(|b| b.high)
    }

    pub fn low(&self) -> Vec<f64> {
        self.project(|b| b.low)
    }

    pub fn close(&self) -> Vec<f64> {
        self.project(|b| b.close)
    }

    fn project(&self, f: impl Fn(&Bar) -> f64) -> Vec<f64> {
        self.bars.iter().map(f).collect()
    }
}
