//! Persistence implementations

mod memory;
mod postgres;
mod rows;

pub use memory::InMemoryProductRepository;
pub use postgres::PostgresProductRepository;
