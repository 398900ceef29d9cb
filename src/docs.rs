use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use marquee_models::{LoginRequest, SessionResponse, StatusResponse, TokenPair};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::status::home,
        crate::modules::auth::controller::authenticate,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::session,
    ),
    components(
        schemas(
            LoginRequest,
            TokenPair,
            SessionResponse,
            StatusResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Status", description = "Service liveness"),
        (name = "Authentication", description = "Login, refresh cookie rotation and logout"),
        (name = "Admin", description = "Endpoints behind the bearer-token gate")
    ),
    info(
        title = "Marquee API",
        description = "JWT access/refresh token lifecycle for the Marquee back office.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/authenticate", "/refresh", "/logout", "/admin/session"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
