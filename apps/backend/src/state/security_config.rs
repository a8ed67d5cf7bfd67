use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::config::app::{AppConfig, DEFAULT_BCRYPT_COST, DEFAULT_TOKEN_TAG, DEFAULT_TOKEN_TTL};

/// Token signing and credential hashing settings, fixed at startup.
#[derive(Clone)]
pub struct SecurityConfig {
    /// HMAC key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    pub algorithm: Algorithm,
    pub issuer: String,
    pub audience: String,
    /// Lifetime of an issued token
    pub token_ttl: Duration,
    /// bcrypt cost factor
    pub bcrypt_cost: u32,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            issuer: DEFAULT_TOKEN_TAG.to_string(),
            audience: DEFAULT_TOKEN_TAG.to_string(),
            token_ttl: DEFAULT_TOKEN_TTL,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(cfg.jwt_secret.as_bytes())
            .with_issuer(cfg.jwt_issuer.clone())
            .with_audience(cfg.jwt_audience.clone())
            .with_token_ttl(cfg.jwt_ttl)
            .with_bcrypt_cost(cfg.bcrypt_cost)
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}
