//! # Marquee Models
//!
//! Domain models and request/response DTOs shared by the API layer.
//!
//! - [`auth`]: login request, status and session payloads
//! - [`users`]: the stored user record

pub mod auth;
pub mod users;

pub use auth::{LoginRequest, SessionResponse, StatusResponse};
pub use users::User;

// Re-export token types so handlers only need one models import
pub use marquee_auth::{Claims, Principal, TokenPair};
