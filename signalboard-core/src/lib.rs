//! Signalboard Core: technical indicators and buy/sell/hold signals for a
//! single ticker's daily price history.
//!
//! This crate contains the whole analysis pipeline:
//! - Domain types (bars, validated price series)
//! - Indicators (SMA, EMA, Wilder RSI, MACD, Bollinger Bands)
//! - Alignment of indicator columns with the price frame
//! - The signal classifier with its two policies
//! - The JSON-ready result record
//! - Bar sources (CSV files, synthetic data)

pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod report;
pub mod signals;

pub use config::{AnalysisConfig, ConfigError};
pub use domain::{Bar, PriceSeries};
pub use engine::{analyze, Analyzer};
pub use error::{AnalysisError, ErrorReport};
pub use report::ResultRecord;
pub use signals::{Action, ClassifierPolicy, Qualifier, Recommendation};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: pipeline types can cross threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();

        require_send::<engine::Analyzer>();
        require_sync::<engine::Analyzer>();
        require_send::<engine::AlignedFrame>();
        require_sync::<engine::AlignedFrame>();
        require_send::<engine::StandardIndicators>();
        require_sync::<engine::StandardIndicators>();

        require_send::<report::ResultRecord>();
        require_sync::<report::ResultRecord>();
        require_send::<error::AnalysisError>();
        require_sync::<error::AnalysisError>();

        require_send::<data::CsvSource>();
        require_sync::<data::CsvSource>();
        require_send::<data::SyntheticSource>();
        require_sync::<data::SyntheticSource>();
    }

    /// Compile-time check: indicators see only closes, never the bar index
    /// they are evaluated at.
    #[allow(dead_code)]
    fn indicator_trait_sees_only_values(ind: &dyn indicators::Indicator, closes: &[f64]) -> Vec<f64> {
        ind.compute(closes)
    }

    #[test]
    fn analyzer_shared_across_threads() {
        let analyzer = std::sync::Arc::new(Analyzer::default());
        let bars = indicators::make_bars(&vec![100.0; 210]);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let analyzer = analyzer.clone();
                let bars = bars.clone();
                std::thread::spawn(move || analyzer.analyze(bars).unwrap())
            })
            .collect();
        let records: Vec<ResultRecord> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(records.windows(2).all(|w| w[0] == w[1]));
    }
}
