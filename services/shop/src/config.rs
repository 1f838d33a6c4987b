//! HTTP server configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load from `SERVER_HOST` / `SERVER_PORT`, defaulting to `0.0.0.0:3000`
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000_i64)?
            .add_source(Environment::with_prefix("SERVER").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Address to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
