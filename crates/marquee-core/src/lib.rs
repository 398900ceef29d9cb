//! # Marquee Core
//!
//! Foundational types shared by every Marquee crate:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use marquee_core::{AppError, verify_password};
//!
//! if !verify_password("secret", &stored_hash)? {
//!     return Err(AppError::unauthorized(anyhow::anyhow!("invalid credentials")));
//! }
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
