//! Input collaborators: where bars come from.

pub mod csv;
pub mod provider;
pub mod synthetic;

pub use self::csv::{read_bars, CsvSource};
pub use provider::{BarSource, DataError, DEFAULT_LOOKBACK, MIN_LOOKBACK};
pub use synthetic::SyntheticSource;
