//! The analysis pipeline: bars in, one `ResultRecord` (or one typed error) out.
//!
//! Stages, in order:
//! 1. Series store: validate bars into a `PriceSeries`
//! 2. Indicator engine: compute every standard indicator over closes
//! 3. Alignment & cleaning: join on the bar index, drop undefined rows
//! 4. Classify the latest row and assemble the record
//!
//! Pure and synchronous. An `Analyzer` holds only its configuration, so
//! one instance can serve any number of threads.

use super::align::AlignedFrame;
use super::precompute::StandardIndicators;
use crate::config::{AnalysisConfig, ConfigError};
use crate::domain::{Bar, PriceSeries};
use crate::error::AnalysisError;
use crate::report::{assemble, ResultRecord};
use crate::signals::{classify, ClassifierPolicy, Recommendation};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
    indicators: StandardIndicators,
}

impl Analyzer {
    /// Build an analyzer, rejecting configs that fail
    /// [`AnalysisConfig::validate`].
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: AnalysisConfig) -> Self {
        let indicators = StandardIndicators::from_config(&config.indicators);
        Self { config, indicators }
    }

    /// Same configuration with a different classifier policy.
    pub fn with_policy(mut self, policy: ClassifierPolicy) -> Self {
        self.config.signal.policy = policy;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Bars needed before the first aligned row exists.
    pub fn min_bars(&self) -> usize {
        self.indicators.warmup() + 1
    }

    /// Run stages 1-3 and return the cleaned frame.
    pub fn frame(&self, bars: Vec<Bar>) -> Result<AlignedFrame, AnalysisError> {
        let series = PriceSeries::new(bars)?;
        let warmup = self.indicators.warmup();
        let columns = self.indicators.compute(&series.close());
        let frame = AlignedFrame::build(&series, &columns, warmup)?;
        debug!(
            bars = series.len(),
            warmup,
            rows = frame.len(),
            dropped = frame.dropped(),
            "aligned indicator frame"
        );
        Ok(frame)
    }

    /// Classify the latest row of a frame under the configured policy.
    pub fn recommend(&self, frame: &AlignedFrame) -> Recommendation {
        let signal = &self.config.signal;
        classify(frame.latest(), signal.policy, &signal.thresholds())
    }

    /// Full pipeline without a ticker label.
    pub fn analyze(&self, bars: Vec<Bar>) -> Result<ResultRecord, AnalysisError> {
        self.run(None, bars)
    }

    /// Full pipeline, tagging the record with `ticker`.
    pub fn analyze_ticker(
        &self,
        ticker: &str,
        bars: Vec<Bar>,
    ) -> Result<ResultRecord, AnalysisError> {
        self.run(Some(ticker), bars)
    }

    fn run(&self, ticker: Option<&str>, bars: Vec<Bar>) -> Result<ResultRecord, AnalysisError> {
        let frame = self.frame(bars)?;
        let recommendation = self.recommend(&frame);
        let policy = self.config.signal.policy;
        info!(
            ticker = ticker.unwrap_or("-"),
            as_of = %frame.latest().date,
            %policy,
            %recommendation,
            "analysis complete"
        );
        Ok(assemble(&frame, recommendation, policy, ticker))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::from_validated(AnalysisConfig::default())
    }
}

/// Run the default pipeline under `policy`.
pub fn analyze(bars: Vec<Bar>, policy: ClassifierPolicy) -> Result<ResultRecord, AnalysisError> {
    Analyzer::default().with_policy(policy).analyze(bars)
}
