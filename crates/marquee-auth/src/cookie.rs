//! Refresh token cookie.
//!
//! The refresh token only ever travels in this cookie. It is `HttpOnly`,
//! `Secure` and `SameSite=Strict`, and nothing about it is stored server-side:
//! the token's own signature and expiry are the only record of its validity.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use marquee_config::JwtConfig;
use time::{Duration, OffsetDateTime};

#[derive(Clone)]
pub struct CookieManager {
    config: Arc<JwtConfig>,
}

impl CookieManager {
    pub fn new(config: Arc<JwtConfig>) -> Self {
        Self { config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie.name
    }

    /// The refresh token carried by the request, if any.
    pub fn refresh_token<'a>(&self, jar: &'a CookieJar) -> Option<&'a str> {
        jar.get(self.cookie_name()).map(|cookie| cookie.value())
    }

    /// Cookie carrying `refresh_token`, living as long as the token does.
    pub fn refresh_cookie(&self, refresh_token: &str) -> Cookie<'static> {
        self.refresh_cookie_at(refresh_token, OffsetDateTime::now_utc())
    }

    pub fn refresh_cookie_at(&self, refresh_token: &str, now: OffsetDateTime) -> Cookie<'static> {
        let ttl = Duration::seconds(self.config.refresh_token_expiry);
        self.build(refresh_token.to_string(), now + ttl, ttl)
    }

    /// Cookie telling the client to drop the refresh token immediately.
    pub fn expired_cookie(&self) -> Cookie<'static> {
        self.build(
            String::new(),
            OffsetDateTime::UNIX_EPOCH,
            Duration::seconds(-1),
        )
    }

    fn build(&self, value: String, expires: OffsetDateTime, max_age: Duration) -> Cookie<'static> {
        let cookie = &self.config.cookie;
        let mut builder = Cookie::build((cookie.name.clone(), value))
            .path(cookie.path.clone())
            .expires(expires)
            .max_age(max_age)
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Strict);

        if !cookie.domain.is_empty() {
            builder = builder.domain(cookie.domain.clone());
        }

        builder.build()
    }
}
