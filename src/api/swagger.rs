use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pin Map Service API",
        version = "1.0.0",
        description = "Accounts and geo-located review pins.\n\n**Authentication:** login returns a JWT. Sending it as a Bearer token on pin creation binds the pin to the token's username."
    ),
    paths(
        crate::api::users::register,
        crate::api::users::login,
        crate::api::pins::list_pins,
        crate::api::pins::create_pin,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::RegisterRequest,
            crate::models::LoginRequest,
            crate::models::UserInfo,
            crate::models::LoginResponse,
            crate::models::CreatePinRequest,
            crate::models::PinResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Registration and login."),
        (name = "Pins", description = "Create and list map pins."),
        (name = "Health", description = "Service and database status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /api/users/login"))
                        .build()
                ),
            );
        }
    }
}
