//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use common::{ApiError, GenericResponse};
use domain::{FieldErrors, RegisterUser, UserProfile};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::create_user,
        crate::handlers::login_handler::login,
    ),
    components(
        schemas(
            RegisterUser,
            UserProfile,
            GenericResponse,
            ApiError,
            FieldErrors,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "User registration"),
        (name = "Authentication", description = "Basic authentication login"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}
