use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::config::{env_lookup, optional, parse_or};
use crate::error::AppError;

pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 15 * 60;

/// JWT signing settings.
#[derive(Clone)]
pub struct SecurityConfig {
    pub jwt_secret: Vec<u8>,
    /// Pinned on both mint and verify (HS256).
    pub algorithm: Algorithm,
    pub access_token_ttl: Duration,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .finish()
    }
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            access_token_ttl: Duration::from_secs(DEFAULT_ACCESS_TOKEN_TTL_SECS),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(env_lookup)
    }

    /// `BACKEND_JWT_SECRET` is required; `ACCESS_TOKEN_TTL_SECS` is optional.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = optional(&lookup, "BACKEND_JWT_SECRET")
            .ok_or_else(|| AppError::config("BACKEND_JWT_SECRET must be set"))?;
        let ttl = parse_or(&lookup, "ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL_SECS)?;

        Ok(Self {
            access_token_ttl: Duration::from_secs(ttl),
            ..Self::new(secret.into_bytes())
        })
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
