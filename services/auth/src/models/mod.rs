//! Authentication service models

pub mod admin;

// Re-export for convenience
pub use admin::{Admin, AdminIdentity, LoginCredentials};
