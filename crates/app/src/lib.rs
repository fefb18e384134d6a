//! Persistence, live data and view models for CuantoVale.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod live;
pub mod uuids;
pub mod views;

#[cfg(test)]
mod test;
