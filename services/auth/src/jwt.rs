//! JWT service for token generation and validation
//!
//! Tokens are signed with HS256 and carry the admin's id and username,
//! plus a unique `jti` so that individual tokens can be revoked.

use anyhow::Result;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    get_current_timestamp,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    error::AuthError,
    models::{Admin, AdminIdentity},
};

const DEV_SECRET: &str = "neocoffee-secret-key-change-in-production";

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret for signing and verifying tokens
    pub secret: String,
    /// Token lifetime in seconds (default: 24 hours)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Signing secret (a development default is used when unset)
    /// - `JWT_EXPIRY`: Token lifetime in seconds (default: 86400)
    pub fn from_env() -> Result<Self> {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if secret.is_empty() => anyhow::bail!("JWT_SECRET must not be empty"),
            Ok(secret) => secret,
            Err(_) => {
                warn!("JWT_SECRET not set, using the development secret");
                DEV_SECRET.to_string()
            }
        };

        let token_expiry = std::env::var("JWT_EXPIRY")
            .unwrap_or_else(|_| "86400".to_string()) // 24 hours
            .parse()
            .unwrap_or(86400);

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin ID
    pub sub: String,
    /// Admin username
    pub username: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
    /// Unique token id, the revocation key
    pub jti: Uuid,
}

impl Claims {
    /// The admin identity the token proves
    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            id: self.sub.clone(),
            username: self.username.clone(),
        }
    }
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Issue a token for an admin
    pub fn issue_token(&self, admin: &Admin) -> Result<String, AuthError> {
        let now = get_current_timestamp();

        let claims = Claims {
            sub: admin.id.clone(),
            username: admin.username.clone(),
            iat: now,
            exp: now + self.config.token_expiry,
            jti: Uuid::new_v4(),
        };

        self.encode_claims(&claims)
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(AuthError::Signing)
    }

    /// Validate a token's signature and expiry and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                AuthError::InvalidToken
            })?;

        Ok(token_data.claims)
    }
}
