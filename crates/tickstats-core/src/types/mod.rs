//! Domain types for OHLC price data.

mod bar;
mod interval;
mod series;

pub use bar::Bar;
pub use interval::Interval;
pub use series::PriceSeries;
