//! Admin account bootstrap from the environment

use tracing::info;

use crate::{error::AuthError, service::AuthService};

/// Admin account to provision at startup
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl AdminConfig {
    /// Read `ADMIN_USERNAME` and `ADMIN_PASSWORD`; both must be set
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("ADMIN_USERNAME").ok()?;
        let password = std::env::var("ADMIN_PASSWORD").ok()?;

        Some(Self { username, password })
    }
}

/// Provision the configured admin account, if any
pub async fn bootstrap_admin(
    auth: &AuthService,
    config: Option<AdminConfig>,
) -> Result<(), AuthError> {
    match config {
        Some(config) => {
            auth.ensure_admin(&config.username, &config.password).await?;
        }
        None => info!("ADMIN_USERNAME/ADMIN_PASSWORD not set, skipping admin bootstrap"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::tests::test_service;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_admin_config_requires_both_variables() {
        unsafe {
            std::env::set_var("ADMIN_USERNAME", "admin");
            std::env::remove_var("ADMIN_PASSWORD");
        }
        assert!(AdminConfig::from_env().is_none());

        unsafe {
            std::env::set_var("ADMIN_PASSWORD", "Minad123!");
        }
        let config = AdminConfig::from_env().unwrap();
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "Minad123!");

        unsafe {
            std::env::remove_var("ADMIN_USERNAME");
            std::env::remove_var("ADMIN_PASSWORD");
        }
    }

    #[tokio::test]
    async fn test_bootstrap_admin() {
        let auth = test_service().await;

        bootstrap_admin(&auth, None).await.unwrap();
        assert!(auth.login("admin", "Minad123!").await.is_err());

        let config = AdminConfig {
            username: "admin".to_string(),
            password: "Minad123!".to_string(),
        };
        bootstrap_admin(&auth, Some(config)).await.unwrap();
        assert!(auth.login("admin", "Minad123!").await.is_ok());
    }
}
