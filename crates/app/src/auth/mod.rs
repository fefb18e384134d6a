//! Authentication

mod errors;
mod models;
mod repository;
mod service;
mod session;
mod token;

pub use errors::*;
pub use models::*;
pub use repository::PgAuthRepository;
pub use service::*;
pub use session::Session;
pub use token::*;
