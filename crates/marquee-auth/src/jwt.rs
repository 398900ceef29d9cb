//! Token issuing and verification.
//!
//! [`TokenIssuer`] and [`TokenVerifier`] are built once from the shared
//! [`JwtConfig`] and are cheap to clone into request handlers. Neither keeps
//! any mutable state, so they can be used from any number of requests at once.
//!
//! # Verification order
//!
//! 1. The `Authorization` header must be present and non-empty.
//! 2. It must be exactly `Bearer <token>`, with a single space.
//! 3. The algorithm declared in the token header must be HMAC. Anything else,
//!    `none` included, is rejected before the secret is consulted.
//! 4. An expired token is reported as [`TokenError::ExpiredToken`].
//! 5. Any other signature or structure failure is [`TokenError::InvalidToken`].
//! 6. The issuer claim must match the configured issuer.
//!
//! Steps 3 to 6 are also available on their own through
//! [`TokenVerifier::verify_raw`], for tokens read from the refresh cookie.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use marquee_config::JwtConfig;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::claims::{Claims, Principal, TokenKind};
use crate::error::TokenError;

/// Algorithms a token header may declare. All of them are HMAC.
pub const SUPPORTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// An access token and its matching refresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Mints access/refresh token pairs.
#[derive(Clone)]
pub struct TokenIssuer {
    config: Arc<JwtConfig>,
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: Arc<JwtConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
        }
    }

    /// Issues a fresh pair for `principal`, timestamped now.
    pub fn issue(&self, principal: &Principal) -> Result<TokenPair, TokenError> {
        self.issue_at(principal, Utc::now().timestamp())
    }

    /// Issues a pair as if the current time were `now` (Unix seconds).
    pub fn issue_at(&self, principal: &Principal, now: i64) -> Result<TokenPair, TokenError> {
        let access_token = self.sign(&Claims::access(principal, &self.config, now))?;
        let refresh_token = self.sign(&Claims::refresh(principal, &self.config, now))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        if self.config.secret.is_empty() {
            return Err(TokenError::SigningFailure("signing secret is empty".to_string()));
        }

        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailure(e.to_string()))
    }
}

/// Validates tokens minted by a [`TokenIssuer`] sharing the same config.
#[derive(Clone)]
pub struct TokenVerifier {
    config: Arc<JwtConfig>,
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Deserialize)]
struct DeclaredHeader {
    alg: Option<String>,
}

impl TokenVerifier {
    pub fn new(config: Arc<JwtConfig>) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = SUPPORTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            config,
            decoding_key,
            validation,
        }
    }

    /// Authenticates an `Authorization` header value.
    ///
    /// Only access tokens are accepted here; a refresh token presented as a
    /// bearer credential is [`TokenError::InvalidToken`].
    pub fn verify(&self, header_value: &str) -> Result<(Claims, String), TokenError> {
        if header_value.is_empty() {
            return Err(TokenError::MissingHeader);
        }

        // Exactly `Bearer` and the token, separated by one space.
        let token = match header_value.split_once(' ') {
            Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => token,
            _ => return Err(TokenError::MalformedHeader),
        };

        let claims = self.verify_raw(token)?;
        if claims.kind != TokenKind::Access {
            return Err(TokenError::InvalidToken);
        }

        Ok((claims, token.to_string()))
    }

    /// Verifies a bare token string, e.g. the refresh cookie value.
    ///
    /// Access tokens must carry the configured issuer. Refresh tokens are
    /// minted without one; if one is present anyway it must match.
    pub fn verify_raw(&self, token: &str) -> Result<Claims, TokenError> {
        let algorithm = declared_algorithm(token)?;
        match algorithm.parse::<Algorithm>() {
            Ok(alg) if SUPPORTED_ALGORITHMS.contains(&alg) => {}
            _ => return Err(TokenError::UnexpectedSigningMethod(algorithm)),
        }

        // Signature and registered claims are checked on the raw payload first,
        // so a past `exp` reports as expired even if the claim set is malformed.
        let payload = decode::<serde_json::Value>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
                ErrorKind::InvalidAlgorithm => {
                    TokenError::UnexpectedSigningMethod(algorithm.clone())
                }
                _ => TokenError::InvalidToken,
            })?;
        let claims: Claims =
            serde_json::from_value(payload).map_err(|_| TokenError::InvalidToken)?;

        if claims.exp <= claims.iat {
            return Err(TokenError::InvalidToken);
        }

        let issuer_ok = match (claims.kind, claims.iss.as_deref()) {
            (TokenKind::Access, Some(iss)) => iss == self.config.issuer,
            (TokenKind::Access, None) => false,
            (TokenKind::Refresh, Some(iss)) => iss == self.config.issuer,
            (TokenKind::Refresh, None) => true,
        };
        if !issuer_ok {
            return Err(TokenError::InvalidIssuer);
        }

        Ok(claims)
    }
}

/// Reads `alg` from the token header without touching the signature.
fn declared_algorithm(token: &str) -> Result<String, TokenError> {
    let encoded = token
        .split('.')
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenError::InvalidToken)?;

    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| TokenError::InvalidToken)?;
    let header: DeclaredHeader =
        serde_json::from_slice(&bytes).map_err(|_| TokenError::InvalidToken)?;

    header
        .alg
        .ok_or_else(|| TokenError::UnexpectedSigningMethod("missing".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_config::CookieConfig;

    fn config() -> Arc<JwtConfig> {
        Arc::new(JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            issuer: "example.com".to_string(),
            audience: "example.com".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 86400,
            cookie: CookieConfig::default(),
        })
    }

    fn ada() -> Principal {
        Principal::new(7, "Ada", "Lovelace")
    }

    fn forge(header: &str, payload: &str) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload),
            URL_SAFE_NO_PAD.encode("signature")
        )
    }

    #[test]
    fn test_issue_and_verify_access_token() {
        let issuer = TokenIssuer::new(config());
        let verifier = TokenVerifier::new(config());

        let pair = issuer.issue(&ada()).unwrap();
        let (claims, raw) = verifier
            .verify(&format!("Bearer {}", pair.access_token))
            .unwrap();

        assert_eq!(raw, pair.access_token);
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_refresh_token_verifies_raw() {
        let issuer = TokenIssuer::new(config());
        let verifier = TokenVerifier::new(config());

        let pair = issuer.issue(&ada()).unwrap();
        let claims = verifier.verify_raw(&pair.refresh_token).unwrap();

        assert_eq!(claims.kind, TokenKind::Refresh);
        assert_eq!(claims.exp - claims.iat, 86400);
        assert!(claims.iss.is_none());
        assert!(claims.aud.is_none());
        assert!(claims.name.is_none());
    }

    #[test]
    fn test_refresh_token_rejected_as_bearer() {
        let pair = TokenIssuer::new(config()).issue(&ada()).unwrap();
        let result = TokenVerifier::new(config()).verify(&format!("Bearer {}", pair.refresh_token));
        assert_eq!(result.unwrap_err(), TokenError::InvalidToken);
    }

    #[test]
    fn test_pair_tokens_differ() {
        let pair = TokenIssuer::new(config()).issue(&ada()).unwrap();
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn test_missing_header() {
        let verifier = TokenVerifier::new(config());
        assert_eq!(verifier.verify("").unwrap_err(), TokenError::MissingHeader);
    }

    #[test]
    fn test_malformed_headers() {
        let verifier = TokenVerifier::new(config());
        for header in [
            "Bearer",
            "Bearer ",
            "Basic abc",
            "bearer abc",
            "Bearer a b",
            "Bearer  abc",
            " Bearer abc",
            "Bearer\tabc",
            "   ",
        ] {
            assert_eq!(
                verifier.verify(header).unwrap_err(),
                TokenError::MalformedHeader,
                "header {header:?}"
            );
        }
    }

    #[test]
    fn test_alg_none_rejected() {
        let token = forge(
            r#"{"alg":"none","typ":"JWT"}"#,
            r#"{"iss":"example.com","aud":"example.com","sub":"7","iat":1,"exp":99999999999,"typ":"access"}"#,
        );
        let err = TokenVerifier::new(config()).verify_raw(&token).unwrap_err();
        assert_eq!(err, TokenError::UnexpectedSigningMethod("none".to_string()));
    }

    #[test]
    fn test_asymmetric_alg_rejected() {
        for alg in ["RS256", "ES256", "PS512", "EdDSA"] {
            let token = forge(&format!(r#"{{"alg":"{alg}","typ":"JWT"}}"#), r#"{"sub":"7"}"#);
            let err = TokenVerifier::new(config()).verify_raw(&token).unwrap_err();
            assert_eq!(err, TokenError::UnexpectedSigningMethod(alg.to_string()));
        }
    }

    #[test]
    fn test_missing_alg_rejected() {
        let token = forge(r#"{"typ":"JWT"}"#, r#"{"sub":"7"}"#);
        let err = TokenVerifier::new(config()).verify_raw(&token).unwrap_err();
        assert!(matches!(err, TokenError::UnexpectedSigningMethod(_)));
    }

    #[test]
    fn test_garbage_is_invalid_token() {
        let verifier = TokenVerifier::new(config());
        for token in ["", "not-a-token", "a.b.c", "...."] {
            assert_eq!(verifier.verify_raw(token).unwrap_err(), TokenError::InvalidToken);
        }
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now().timestamp();
        let pair = TokenIssuer::new(config())
            .issue_at(&ada(), now - 1_000)
            .unwrap();

        let err = TokenVerifier::new(config())
            .verify(&format!("Bearer {}", pair.access_token))
            .unwrap_err();
        assert_eq!(err, TokenError::ExpiredToken);
    }

    #[test]
    fn test_wrong_secret() {
        let other = Arc::new(JwtConfig {
            secret: "a-completely-different-secret-value".to_string(),
            ..(*config()).clone()
        });
        let pair = TokenIssuer::new(other).issue(&ada()).unwrap();

        let err = TokenVerifier::new(config())
            .verify_raw(&pair.access_token)
            .unwrap_err();
        assert_eq!(err, TokenError::InvalidToken);
    }

    #[test]
    fn test_foreign_issuer() {
        let other = Arc::new(JwtConfig {
            issuer: "evil.example".to_string(),
            ..(*config()).clone()
        });
        let pair = TokenIssuer::new(other).issue(&ada()).unwrap();

        let err = TokenVerifier::new(config())
            .verify_raw(&pair.access_token)
            .unwrap_err();
        assert_eq!(err, TokenError::InvalidIssuer);
    }

    #[test]
    fn test_empty_secret_is_signing_failure() {
        let broken = Arc::new(JwtConfig {
            secret: String::new(),
            ..(*config()).clone()
        });
        let err = TokenIssuer::new(broken).issue(&ada()).unwrap_err();
        assert!(matches!(err, TokenError::SigningFailure(_)));
    }

    #[test]
    fn test_hs512_token_accepted() {
        let now = Utc::now().timestamp();
        let cfg = config();
        let claims = Claims::access(&ada(), &cfg, now);
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(cfg.secret.as_bytes()),
        )
        .unwrap();

        let verified = TokenVerifier::new(cfg).verify_raw(&token).unwrap();
        assert_eq!(verified, claims);
    }
}
