//! Pipeline orchestration: indicator precompute, alignment, and the
//! `Analyzer` entry point.

pub mod align;
pub mod pipeline;
pub mod precompute;

pub use align::{AlignedFrame, AlignedRow};
pub use pipeline::{analyze, Analyzer};
pub use precompute::{compute_warmup, IndicatorColumns, StandardIndicators};
