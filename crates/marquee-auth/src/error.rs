//! Token rejection kinds.

use anyhow::anyhow;
use marquee_core::AppError;
use thiserror::Error;

/// Why a token could not be issued or verified.
///
/// The `Display` text is for logs. Clients only ever see
/// [`TokenError::public_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("no authorization header")]
    MissingHeader,
    #[error("invalid authorization header")]
    MalformedHeader,
    #[error("unexpected signing method: {0}")]
    UnexpectedSigningMethod(String),
    #[error("token has expired")]
    ExpiredToken,
    #[error("token failed verification")]
    InvalidToken,
    #[error("token was not issued by this service")]
    InvalidIssuer,
    #[error("failed to sign token: {0}")]
    SigningFailure(String),
}

impl TokenError {
    /// Short machine-friendly label, used as a log field and metric label.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::MissingHeader => "missing_header",
            TokenError::MalformedHeader => "malformed_header",
            TokenError::UnexpectedSigningMethod(_) => "unexpected_signing_method",
            TokenError::ExpiredToken => "expired_token",
            TokenError::InvalidToken => "invalid_token",
            TokenError::InvalidIssuer => "invalid_issuer",
            TokenError::SigningFailure(_) => "signing_failure",
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            TokenError::ExpiredToken => "expired token",
            TokenError::SigningFailure(_) => "internal server error",
            _ => "unauthorized",
        }
    }

    pub fn is_server_fault(&self) -> bool {
        matches!(self, TokenError::SigningFailure(_))
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        let message = anyhow!(err.public_message());
        if err.is_server_fault() {
            AppError::internal(message)
        } else {
            AppError::unauthorized(message)
        }
    }
}
