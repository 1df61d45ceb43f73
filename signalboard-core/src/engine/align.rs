//! Alignment & cleaning.
//!
//! Joins the bar projections and every indicator column on the bar index,
//! then drops each row that still holds an undefined value. What survives is
//! the only view the classifier and the report assembler read.

use super::precompute::IndicatorColumns;
use crate::domain::PriceSeries;
use crate::error::AnalysisError;
use chrono::NaiveDate;

/// One fully defined row of the aligned frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub ma_fast: f64,
    pub ma_slow: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
}

impl AlignedRow {
    fn values(&self) -> [f64; 13] {
        [
            self.open,
            self.high,
            self.low,
            self.close,
            self.ma_fast,
            self.ma_slow,
            self.rsi,
            self.macd,
            self.macd_signal,
            self.macd_histogram,
            self.bb_upper,
            self.bb_middle,
            self.bb_lower,
        ]
    }

    pub fn is_defined(&self) -> bool {
        self.values().iter().all(|v| v.is_finite())
    }
}

/// Non-empty, date-ordered frame of fully defined rows.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedFrame {
    rows: Vec<AlignedRow>,
    dropped: usize,
}

impl AlignedFrame {
    /// Join `columns` onto the bar index of `series` and drop undefined rows.
    ///
    /// `warmup` is only used to report how much history would have been
    /// needed when nothing survives.
    pub fn build(
        series: &PriceSeries,
        columns: &IndicatorColumns,
        warmup: usize,
    ) -> Result<Self, AnalysisError> {
        let n = series.len();
        let rows: Vec<AlignedRow> = series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| AlignedRow {
                date: bar.date,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                ma_fast: columns.ma_fast[i],
                ma_slow: columns.ma_slow[i],
                rsi: columns.rsi[i],
                macd: columns.macd[i],
                macd_signal: columns.macd_signal[i],
                macd_histogram: columns.macd_histogram[i],
                bb_upper: columns.bb_upper[i],
                bb_middle: columns.bb_middle[i],
                bb_lower: columns.bb_lower[i],
            })
            .filter(AlignedRow::is_defined)
            .collect();

        if rows.is_empty() {
            return Err(AnalysisError::InsufficientHistory {
                bars: n,
                required: warmup + 1,
            });
        }

        Ok(Self {
            dropped: n - rows.len(),
            rows,
        })
    }

    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: `build` rejects an empty result.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of input rows discarded during cleaning.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// The most recent row.
    pub fn latest(&self) -> &AlignedRow {
        &self.rows[self.rows.len() - 1]
    }

    /// Extract one field across all rows, in date order.
    pub fn column(&self, f: impl Fn(&AlignedRow) -> f64) -> Vec<f64> {
        self.rows.iter().map(f).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }
}
