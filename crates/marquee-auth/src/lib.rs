//! # Marquee Auth
//!
//! Token lifecycle for the Marquee API:
//!
//! - [`claims`]: the typed claim set carried inside every token
//! - [`jwt`]: [`TokenIssuer`] mints access/refresh pairs, [`TokenVerifier`]
//!   checks bearer headers and raw tokens
//! - [`cookie`]: [`CookieManager`] builds and clears the refresh cookie
//! - [`error`]: [`TokenError`], one variant per rejection kind
//!
//! # Token Types
//!
//! - **Access token**: short-lived, carries issuer, audience and display name
//! - **Refresh token**: long-lived, lives only in an `HttpOnly` cookie and
//!   carries nothing but the subject and its lifetime
//!
//! Both are HMAC-signed with the same secret. Verification refuses any token
//! whose header declares a non-HMAC algorithm before the secret is touched.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use marquee_auth::{Principal, TokenIssuer, TokenVerifier};
//! use marquee_config::JwtConfig;
//!
//! let config = Arc::new(JwtConfig::from_env());
//! let issuer = TokenIssuer::new(config.clone());
//! let verifier = TokenVerifier::new(config);
//!
//! let pair = issuer.issue(&Principal::new(7, "Ada", "Lovelace"))?;
//! let (claims, _raw) = verifier.verify(&format!("Bearer {}", pair.access_token))?;
//! assert_eq!(claims.sub, "7");
//! ```

pub mod claims;
pub mod cookie;
pub mod error;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, Principal, TokenKind};
pub use cookie::CookieManager;
pub use error::TokenError;
pub use jwt::{SUPPORTED_ALGORITHMS, TokenIssuer, TokenPair, TokenVerifier};
