use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};
use marquee_auth::CookieManager;
use marquee_config::{CookieConfig, JwtConfig};
use time::Duration;

fn manager() -> CookieManager {
    CookieManager::new(Arc::new(JwtConfig {
        secret: "cookie-test-secret".to_string(),
        issuer: "example.com".to_string(),
        audience: "example.com".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 86400,
        cookie: CookieConfig {
            name: "_unsecure_Host-refresh_token".to_string(),
            path: "/".to_string(),
            domain: "localhost".to_string(),
        },
    }))
}

#[test]
fn test_refresh_cookie_round_trips_through_header() {
    let cookies = manager();
    let rendered = cookies.refresh_cookie("header.payload.sig").to_string();

    let parsed = Cookie::parse(rendered).unwrap();
    assert_eq!(parsed.name(), "_unsecure_Host-refresh_token");
    assert_eq!(parsed.value(), "header.payload.sig");
    assert_eq!(parsed.path(), Some("/"));
    assert_eq!(parsed.domain(), Some("localhost"));
    assert_eq!(parsed.http_only(), Some(true));
    assert_eq!(parsed.secure(), Some(true));
    assert_eq!(parsed.same_site(), Some(SameSite::Strict));
    assert_eq!(parsed.max_age(), Some(Duration::seconds(86400)));
}

#[test]
fn test_expired_cookie_clears_value() {
    let rendered = manager().expired_cookie().to_string();

    assert!(rendered.starts_with("_unsecure_Host-refresh_token=;"));
    assert!(rendered.contains("Max-Age=-1"));
    assert!(rendered.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    assert!(rendered.contains("HttpOnly"));
    assert!(rendered.contains("SameSite=Strict"));
}
