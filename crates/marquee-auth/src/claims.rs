//! JWT claim structures.
//!
//! A single [`Claims`] type covers both token kinds. Fields that only access
//! tokens carry are optional and left out of the payload when absent, so a
//! refresh token discloses nothing beyond its subject and lifetime.

use marquee_config::JwtConfig;
use serde::{Deserialize, Serialize};

/// The user a token is minted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl Principal {
    pub fn new(id: i32, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by every token.
///
/// Unknown keys fail deserialization, so a token that verifies but carries
/// claims this service never writes is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Issuer (access tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience (access tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Principal id, stringified
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(rename = "typ")]
    pub kind: TokenKind,
    /// Display name (access tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Claims {
    pub fn access(principal: &Principal, config: &JwtConfig, now: i64) -> Self {
        Self {
            iss: Some(config.issuer.clone()),
            aud: Some(config.audience.clone()),
            sub: principal.id.to_string(),
            iat: now,
            exp: now + config.access_token_expiry,
            kind: TokenKind::Access,
            name: Some(principal.display_name()),
        }
    }

    pub fn refresh(principal: &Principal, config: &JwtConfig, now: i64) -> Self {
        Self {
            iss: None,
            aud: None,
            sub: principal.id.to_string(),
            iat: now,
            exp: now + config.refresh_token_expiry,
            kind: TokenKind::Refresh,
            name: None,
        }
    }
}
