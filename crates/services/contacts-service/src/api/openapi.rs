//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, contact_handler, user_handler};
use crate::schemas::{
    ContactModel, ContactResponse, LoginRequest, RequestEmail, SignupRequest, TokenResponse,
    UserDb, UserResponse,
};
use crate::types::MessageResponse;

/// OpenAPI documentation for the contacts API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contacts App",
        version = "0.1.0",
        description = "Personal address book with authentication and birthday reminders"
    ),
    paths(
        auth_handler::signup,
        auth_handler::login,
        auth_handler::refresh_token,
        auth_handler::confirmed_email,
        auth_handler::request_email,
        user_handler::me,
        contact_handler::list_contacts,
        contact_handler::upcoming_birthdays,
        contact_handler::get_contact,
        contact_handler::create_contact,
        contact_handler::update_contact,
        contact_handler::delete_contact,
    ),
    components(
        schemas(
            SignupRequest,
            LoginRequest,
            RequestEmail,
            TokenResponse,
            UserDb,
            UserResponse,
            ContactModel,
            ContactResponse,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login and email confirmation"),
        (name = "Users", description = "Current user profile"),
        (name = "Contacts", description = "Address book operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
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
                        .description(Some("Access token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
