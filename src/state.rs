use std::sync::Arc;

use marquee_auth::{CookieManager, TokenIssuer, TokenVerifier};
use marquee_config::{CorsConfig, JwtConfig};

use crate::modules::users::repository::UserStore;

/// Shared application state.
///
/// Everything in here is immutable after startup; the token components share
/// one `Arc<JwtConfig>`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub jwt_config: Arc<JwtConfig>,
    pub cors_config: CorsConfig,
    pub issuer: TokenIssuer,
    pub verifier: TokenVerifier,
    pub cookies: CookieManager,
}

impl AppState {
    pub fn new(jwt_config: JwtConfig, cors_config: CorsConfig, users: Arc<dyn UserStore>) -> Self {
        let jwt_config = Arc::new(jwt_config);

        Self {
            users,
            issuer: TokenIssuer::new(jwt_config.clone()),
            verifier: TokenVerifier::new(jwt_config.clone()),
            cookies: CookieManager::new(jwt_config.clone()),
            jwt_config,
            cors_config,
        }
    }
}
