//! OpenAPI documentation configuration.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, user_handler};
use crate::domain::UserResponse;
use crate::services::UserLogin;

/// OpenAPI documentation for the blog user API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Pessoal",
        version = "0.1.0",
        description = "User registration, update and listing for a personal blog",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        user_handler::register,
        user_handler::update_user,
        user_handler::list_users,
        user_handler::get_user,
        auth_handler::login,
    ),
    components(
        schemas(
            UserResponse,
            UserLogin,
            user_handler::UserRequest,
            auth_handler::LoginRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Usuarios", description = "User registration, login and management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for HTTP basic authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Basic)
                        .description(Some("Email and password of a registered user"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_user_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/usuarios/cadastrar",
            "/usuarios/atualizar",
            "/usuarios/all",
            "/usuarios/{id}",
            "/usuarios/logar",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {}",
                expected
            );
        }
    }
}
