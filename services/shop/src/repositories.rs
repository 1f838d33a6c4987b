//! Repositories for database operations

pub mod order;
pub mod product;

pub use order::OrderRepository;
pub use product::ProductRepository;
