//! Domain types: bars and the validated price series.

pub mod bar;
pub mod series;

pub use bar::{Bar, BarError};
pub use series::PriceSeries;
