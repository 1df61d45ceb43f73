//! Moving Average Convergence Divergence (MACD).
//!
//! Three lines (separate Indicator instances):
//! - Line: EMA(fast) - EMA(slow), lookback slow - 1
//! - Signal: EMA(signal) of the line, lookback slow + signal - 2
//! - Histogram: line - signal, same lookback as the signal
//!
//! The signal EMA is seeded from the first `signal` defined line values,
//! so its warm-up stacks on top of the line's warm-up.

use super::ema::ema_of_series;
use super::Indicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdComponent {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    component: MacdComponent,
    name: String,
}

impl Macd {
    fn with_component(fast: usize, slow: usize, signal: usize, component: MacdComponent) -> Self {
        assert!(
            fast >= 1 && slow >= 1 && signal >= 1,
            "MACD periods must be >= 1"
        );
        assert!(fast < slow, "MACD fast period must be below slow period");
        let label = match component {
            MacdComponent::Line => "line",
            MacdComponent::Signal => "signal",
            MacdComponent::Histogram => "histogram",
        };
        Self {
            fast,
            slow,
            signal,
            component,
            name: format!("macd_{label}_{fast}_{slow}_{signal}"),
        }
    }

    pub fn line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_component(fast, slow, signal, MacdComponent::Line)
    }

    pub fn signal(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_component(fast, slow, signal, MacdComponent::Signal)
    }

    pub fn histogram(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_component(fast, slow, signal, MacdComponent::Histogram)
    }

    pub fn component(&self) -> MacdComponent {
        self.component
    }

    fn macd_line(&self, values: &[f64]) -> Vec<f64> {
        let fast = ema_of_series(values, self.fast);
        let slow = ema_of_series(values, self.slow);
        fast.iter().zip(&slow).map(|(f, s)| f - s).collect()
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        let line = self.slow - 1;
        match self.component {
            MacdComponent::Line => line,
            MacdComponent::Signal | MacdComponent::Histogram => line + self.signal - 1,
        }
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let line = self.macd_line(values);
        if self.component == MacdComponent::Line {
            return line;
        }

        let signal = ema_of_series(&line, self.signal);
        match self.component {
            MacdComponent::Signal => signal,
            _ => line.iter().zip(&signal).map(|(l, s)| l - s).collect(),
        }
    }
}
