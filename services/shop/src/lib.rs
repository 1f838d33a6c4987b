//! NeoCoffee webshop backend
//!
//! Public catalog and order intake, plus admin-only catalog and order
//! management behind bearer tokens issued by the `auth` crate.

pub mod cart;
pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod server;
pub mod state;
pub mod validation;

pub use state::AppState;
