//! Request middleware.
//!
//! - [`auth`]: the bearer-token gate for protected route groups and the
//!   [`auth::AuthUser`] extractor
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::require_auth`] verifies it and stores the claims in the request
//!    extensions, or answers 401
//! 3. Handlers take [`auth::AuthUser`] to read the verified claims
//!
//! Every response from a gated route carries `Vary: Authorization`.

pub mod auth;
