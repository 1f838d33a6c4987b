//! Admin authentication service
//!
//! Ties the admin repository, password verification, token issuance and
//! the revocation list together. Both failure paths of a login (unknown
//! user, wrong password) return the same error.

use jsonwebtoken::get_current_timestamp;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::{
    error::AuthError,
    jwt::{JwtConfig, JwtService},
    models::{Admin, AdminIdentity},
    password,
    repositories::{AdminRepository, RevocationRepository},
};

/// Authentication service shared across handlers
#[derive(Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    admin_repository: AdminRepository,
    revocation_repository: RevocationRepository,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(pool: SqlitePool, jwt_config: JwtConfig) -> Self {
        Self {
            jwt_service: JwtService::new(jwt_config),
            admin_repository: AdminRepository::new(pool.clone()),
            revocation_repository: RevocationRepository::new(pool),
        }
    }

    /// Check credentials and issue a signed token
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(Admin, String), AuthError> {
        let Some(admin) = self.admin_repository.find_by_username(username).await? else {
            password::verify_against_dummy(password);
            warn!("Rejected login for unknown admin");
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify_password(password, &admin.password_hash)? {
            warn!("Rejected login for admin {}: wrong password", admin.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt_service.issue_token(&admin)?;
        info!("Admin {} logged in", admin.username);

        Ok((admin, token))
    }

    /// Validate a bearer token and return the identity it carries
    pub async fn verify(&self, token: &str) -> Result<AdminIdentity, AuthError> {
        let claims = self.jwt_service.validate_token(token)?;

        if self.revocation_repository.is_revoked(&claims.jti).await? {
            warn!("Rejected revoked token for admin {}", claims.sub);
            return Err(AuthError::InvalidToken);
        }

        Ok(claims.identity())
    }

    /// Revoke a token so it is refused for the rest of its lifetime
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.jwt_service.validate_token(token)?;

        self.revocation_repository
            .revoke(&claims.jti, claims.exp, get_current_timestamp())
            .await?;

        info!("Admin {} logged out", claims.username);
        Ok(())
    }

    /// Create the admin account, or reset its password if it already exists
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<Admin, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::BadRequest(
                "Admin username and password must not be empty".to_string(),
            ));
        }

        let password_hash = password::hash_password(password)?;

        if self
            .admin_repository
            .update_password_hash(username, &password_hash)
            .await?
        {
            if let Some(admin) = self.admin_repository.find_by_username(username).await? {
                info!("Admin password reset for {}", username);
                return Ok(admin);
            }
        }

        let admin = self.admin_repository.create(username, &password_hash).await?;
        info!("Admin account {} created", username);

        Ok(admin)
    }
}
