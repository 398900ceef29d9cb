use anyhow::anyhow;
use marquee_auth::{TokenError, TokenKind, TokenPair};
use marquee_core::{AppError, verify_password};
use marquee_models::LoginRequest;
use thiserror::Error;
use tracing::{instrument, warn};

use crate::metrics::{track_jwt_issued, track_token_refresh, track_user_login};
use crate::state::AppState;

/// Where a refresh request stood when it was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    NoCookie,
    CookiePresentInvalid,
    CookiePresentValid,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("unauthorized ({0:?})")]
    Unauthorized(RefreshState),
    #[error("unknown user")]
    UnknownUser,
    #[error("error generating tokens: {0}")]
    TokenGenerationFailed(#[source] TokenError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("user store failure: {}", .0.error)]
    Store(AppError),
}

impl AuthError {
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Unauthorized(RefreshState::NoCookie) => "no_cookie",
            AuthError::Unauthorized(_) => "invalid_cookie",
            AuthError::UnknownUser => "unknown_user",
            AuthError::TokenGenerationFailed(_) => "token_generation_failed",
            AuthError::Token(err) => err.reason(),
            AuthError::Store(_) => "store_failure",
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::unauthorized(anyhow!("invalid credentials")),
            AuthError::Unauthorized(_)
            | AuthError::UnknownUser
            | AuthError::TokenGenerationFailed(_) => AppError::unauthorized(anyhow!("unauthorized")),
            AuthError::Token(err) => err.into(),
            AuthError::Store(err) => err,
        }
    }
}

pub struct AuthService;

impl AuthService {
    /// Checks credentials and mints the first token pair of a session.
    ///
    /// Unknown email and wrong password produce the same error.
    #[instrument(skip(state))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<TokenPair, AuthError> {
        let result = Self::check_credentials_and_issue(state, &dto).await;

        match &result {
            Ok(_) => track_user_login("success"),
            Err(err) => {
                warn!(reason = err.reason(), "login rejected");
                track_user_login(err.reason());
            }
        }

        result
    }

    async fn check_credentials_and_issue(
        state: &AppState,
        dto: &LoginRequest,
    ) -> Result<TokenPair, AuthError> {
        let user = state
            .users
            .find_by_email(&dto.email)
            .await
            .map_err(AuthError::Store)?
            .ok_or(AuthError::InvalidCredentials)?;

        // A corrupt stored hash is indistinguishable from a wrong password to the client.
        let valid = verify_password(&dto.password, &user.password).unwrap_or_else(|err| {
            warn!(user_id = user.id, error = %err.error, "stored password hash unusable");
            false
        });
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let pair = state.issuer.issue(&user.principal())?;
        track_jwt_issued();
        Ok(pair)
    }

    /// Exchanges a refresh token for a brand-new pair.
    ///
    /// The presented refresh token is not invalidated: nothing server-side
    /// records it, so it stays usable until its own expiry.
    #[instrument(skip_all)]
    pub async fn rotate(
        state: &AppState,
        refresh_token: Option<&str>,
    ) -> Result<TokenPair, AuthError> {
        let result = Self::rotate_inner(state, refresh_token).await;

        match &result {
            Ok(_) => track_token_refresh("rotated"),
            Err(err) => {
                warn!(reason = err.reason(), "refresh rejected");
                track_token_refresh(err.reason());
            }
        }

        result
    }

    async fn rotate_inner(
        state: &AppState,
        refresh_token: Option<&str>,
    ) -> Result<TokenPair, AuthError> {
        let token = refresh_token.ok_or(AuthError::Unauthorized(RefreshState::NoCookie))?;

        let claims = state.verifier.verify_raw(token).map_err(|err| {
            warn!(reason = err.reason(), "refresh cookie failed verification");
            AuthError::Unauthorized(RefreshState::CookiePresentInvalid)
        })?;
        if claims.kind != TokenKind::Refresh {
            warn!("access token presented as refresh cookie");
            return Err(AuthError::Unauthorized(RefreshState::CookiePresentInvalid));
        }
        tracing::debug!(state = ?RefreshState::CookiePresentValid, sub = %claims.sub, "refresh cookie accepted");

        let user_id: i32 = claims.sub.parse().map_err(|_| AuthError::UnknownUser)?;

        let user = match state.users.find_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(AuthError::UnknownUser),
            Err(err) => {
                warn!(user_id, error = %err.error, "user lookup failed during refresh");
                return Err(AuthError::UnknownUser);
            }
        };

        let pair = state
            .issuer
            .issue(&user.principal())
            .map_err(AuthError::TokenGenerationFailed)?;
        track_jwt_issued();

        Ok(pair)
    }
}
