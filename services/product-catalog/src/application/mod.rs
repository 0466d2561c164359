//! Application layer

pub mod converter;
pub mod dto;
pub mod handler;

pub use dto::*;
pub use handler::ProductHandler;
