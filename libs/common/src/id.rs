//! Record identifiers
//!
//! Every row is keyed by an 8-character lowercase hex string drawn from a
//! random `u32`, the format the storefront client already expects.

/// Generate a new record id
pub fn generate_id() -> String {
    format!("{:08x}", rand::random::<u32>())
}
