//! # Marquee Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing and refresh cookie configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection settings
//!
//! Every config is built once at startup and shared read-only afterwards.
//!
//! # Example
//!
//! ```ignore
//! use marquee_config::{CorsConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! jwt_config.validate()?;
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::{ConfigError, CookieConfig, JwtConfig};

pub(crate) fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
