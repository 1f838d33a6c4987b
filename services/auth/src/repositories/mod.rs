//! Repositories for admin accounts and revoked tokens

pub mod admin;
pub mod revocation;

pub use admin::AdminRepository;
pub use revocation::RevocationRepository;
