//! Admin authentication for the NeoCoffee webshop
//!
//! Verifies admin credentials against Argon2 hashes, issues signed
//! bearer tokens with a fixed lifetime, and guards protected routes.
//! Tokens can be revoked at logout; the revocation list lives in the
//! same SQLite database as everything else.

pub mod bootstrap;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod service;

pub use error::AuthError;
pub use models::AdminIdentity;
pub use service::AuthService;
