//! Signing configuration shared by the token issuer, verifier and cookie
//! manager.
//!
//! # Environment Variables
//!
//! | Variable | Default |
//! |---|---|
//! | `JWT_SECRET` | `development-secret` |
//! | `JWT_ISSUER` | `example.com` |
//! | `JWT_AUDIENCE` | `example.com` |
//! | `JWT_ACCESS_EXPIRY` | `900` (15 minutes) |
//! | `JWT_REFRESH_EXPIRY` | `86400` (24 hours) |
//! | `COOKIE_NAME` | `_unsecure_Host-refresh_token` |
//! | `COOKIE_PATH` | `/` |
//! | `COOKIE_DOMAIN` | `localhost` |

use std::env;

use thiserror::Error;

use crate::env_or;

pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 15 * 60;
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 24 * 60 * 60;

/// Attributes of the refresh token cookie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: String,
    pub path: String,
    pub domain: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "_unsecure_Host-refresh_token".to_string(),
            path: "/".to_string(),
            domain: "localhost".to_string(),
        }
    }
}

/// Process-wide signing configuration.
///
/// Token lifetimes are in seconds.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
    pub cookie: CookieConfig,
}

// The secret never reaches the logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .field("cookie", &self.cookie)
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{0} must be a positive number of seconds")]
    NonPositiveTtl(&'static str),
    #[error("refresh token expiry must be longer than access token expiry")]
    RefreshNotLongerThanAccess,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env_or("JWT_SECRET", "development-secret"),
            issuer: env_or("JWT_ISSUER", "example.com"),
            audience: env_or("JWT_AUDIENCE", "example.com"),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRY),
            refresh_token_expiry: env::var("JWT_REFRESH_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_REFRESH_TOKEN_EXPIRY),
            cookie: CookieConfig {
                name: env_or("COOKIE_NAME", "_unsecure_Host-refresh_token"),
                path: env_or("COOKIE_PATH", "/"),
                domain: env_or("COOKIE_DOMAIN", "localhost"),
            },
        }
    }

    /// Rejects configurations that would mint unusable or unverifiable tokens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::Empty("JWT_SECRET"));
        }
        if self.issuer.is_empty() {
            return Err(ConfigError::Empty("JWT_ISSUER"));
        }
        if self.cookie.name.is_empty() {
            return Err(ConfigError::Empty("COOKIE_NAME"));
        }
        if self.access_token_expiry <= 0 {
            return Err(ConfigError::NonPositiveTtl("JWT_ACCESS_EXPIRY"));
        }
        if self.refresh_token_expiry <= 0 {
            return Err(ConfigError::NonPositiveTtl("JWT_REFRESH_EXPIRY"));
        }
        if self.refresh_token_expiry <= self.access_token_expiry {
            return Err(ConfigError::RefreshNotLongerThanAccess);
        }
        Ok(())
    }
}
