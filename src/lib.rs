//! CuantoVale
//!
//! Domain core of a price-comparison service: validated prices and form drafts,
//! product search, store grouping, the per-store price comparison and price
//! trend charts.

pub mod chart;
pub mod comparison;
pub mod drafts;
pub mod fixtures;
pub mod observations;
pub mod prelude;
pub mod prices;
pub mod search;
pub mod stores;
