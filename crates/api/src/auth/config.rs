use anyhow::{Context, Result};
use std::env;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiration_minutes: u64,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            token_expiration_minutes: env::var("TOKEN_EXPIRATION_MINUTES")
                .unwrap_or_else(|_| "1440".to_string())
                .parse()
                .unwrap_or(1440),
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(bcrypt::DEFAULT_COST),
        })
    }
}
