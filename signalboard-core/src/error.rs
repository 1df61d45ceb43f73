//! Typed failures of the analysis pipeline.
//!
//! Every failure is local and recoverable by the caller. Transports map an
//! [`AnalysisError`] to an [`ErrorReport`] instead of a free-text blob.

use crate::domain::BarError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("no bars supplied")]
    EmptyInput,

    #[error("insufficient history: {bars} bars supplied, at least {required} required to clear indicator warm-up")]
    InsufficientHistory { bars: usize, required: usize },

    #[error("invalid bar at index {index} ({date}): {reason}")]
    InvalidBar {
        index: usize,
        date: NaiveDate,
        reason: BarError,
    },
}

impl AnalysisError {
    /// Stable machine-readable identifier for this error class.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::EmptyInput => "empty_input",
            AnalysisError::InsufficientHistory { .. } => "insufficient_history",
            AnalysisError::InvalidBar { .. } => "invalid_bar",
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

/// Serializable form of an [`AnalysisError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: String,
    pub message: String,
}
