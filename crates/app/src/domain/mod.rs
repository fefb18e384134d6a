//! CuantoVale Domain Concerns

pub mod prices;
pub mod products;
