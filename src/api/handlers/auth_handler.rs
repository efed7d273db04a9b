//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::UserLogin;

/// User login request; any other login fields sent by the client are ignored
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Login email
    #[validate(email(message = "usuario must be a valid email"))]
    #[schema(example = "root@root.com")]
    pub usuario: String,
    /// Password
    #[validate(length(min = 1, message = "senha is required"))]
    #[schema(example = "12345678")]
    pub senha: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/logar", post(login))
}

/// Login and get a Basic token
#[utoipa::path(
    post,
    path = "/usuarios/logar",
    tag = "Usuarios",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserLogin),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<UserLogin>> {
    let login = state
        .auth_service
        .login(payload.usuario, payload.senha)
        .await?;

    Ok(Json(login))
}
