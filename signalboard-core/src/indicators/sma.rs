//! Simple Moving Average (SMA).
//!
//! Rolling mean over a trailing window.
//! Lookback: period - 1 (first valid value at index period-1).

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        sma_of_series(values, self.period)
    }
}

/// Rolling mean of `values` over `period`, NaN where the window is short or
/// contains NaN.
pub fn sma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < period || period == 0 {
        return result;
    }

    // Initial window
    let mut sum: f64 = values[..period].iter().sum();
    let mut nan_in_window = sum.is_nan();
    if !nan_in_window {
        result[period - 1] = sum / period as f64;
    }

    for i in period..n {
        let leaving = values[i - period];
        let entering = values[i];

        if entering.is_nan() || leaving.is_nan() || nan_in_window {
            // A NaN poisons a rolling sum; rescan the window instead.
            let window = &values[(i + 1 - period)..=i];
            sum = window.iter().sum();
            nan_in_window = sum.is_nan();
            if nan_in_window {
                continue;
            }
        } else {
            sum = sum - leaving + entering;
        }

        result[i] = sum / period as f64;
    }

    result
}
