//! User handlers.

use std::borrow::Cow;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{MAX_PHOTO_LENGTH, MAX_TEXT_LENGTH, MIN_PASSWORD_LENGTH};
use crate::domain::{CreateUser, UpdateUser, UserResponse};
use crate::errors::{AppError, AppResult};

/// User record sent by clients on registration and update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    /// 0 on registration, the existing identifier on update
    #[serde(default)]
    #[schema(example = 0)]
    pub id: i64,
    /// Display name
    #[validate(
        length(max = MAX_TEXT_LENGTH, message = "nome must be at most 255 characters"),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "Thiago")]
    pub nome: String,
    /// Login email
    #[validate(
        email(message = "usuario must be a valid email"),
        length(max = MAX_TEXT_LENGTH, message = "usuario must be at most 255 characters")
    )]
    #[schema(example = "thiago@email.com")]
    pub usuario: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "senha must be at least 8 characters"))]
    #[schema(example = "123456789", min_length = 8)]
    pub senha: String,
    /// Photo URL
    #[validate(length(max = MAX_PHOTO_LENGTH, message = "foto must be at most 5000 characters"))]
    #[schema(example = "https://i.imgur.com/FETvs2O.jpg")]
    pub foto: Option<String>,
}

impl From<UserRequest> for CreateUser {
    fn from(req: UserRequest) -> Self {
        Self {
            name: req.nome,
            email: req.usuario,
            password: req.senha,
            photo: req.foto,
        }
    }
}

impl From<UserRequest> for UpdateUser {
    fn from(req: UserRequest) -> Self {
        Self {
            id: req.id,
            name: req.nome,
            email: req.usuario,
            password: req.senha,
            photo: req.foto,
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::Borrowed("nome must not be blank"));
        return Err(error);
    }
    Ok(())
}

/// Routes open to anonymous clients
pub fn public_user_routes() -> Router<AppState> {
    Router::new().route("/cadastrar", post(register))
}

/// Routes requiring basic authentication
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(list_users))
        .route("/atualizar", put(update_user))
        .route("/:id", get(get_user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/usuarios/cadastrar",
    tag = "Usuarios",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error or email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service
        .register(payload.into())
        .await?
        .ok_or(AppError::EmailTaken)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Replace an existing user's fields
#[utoipa::path(
    put,
    path = "/usuarios/atualizar",
    tag = "Usuarios",
    security(("basic_auth" = [])),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error or email already registered"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<Json<UserResponse>> {
    tracing::debug!(requested_by = current_user.id, user_id = payload.id, "Update requested");

    let user = state.user_service.update_user(payload.into()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// List all users
#[utoipa::path(
    get,
    path = "/usuarios/all",
    tag = "Usuarios",
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "All registered users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/usuarios/{id}",
    tag = "Usuarios",
    security(("basic_auth" = [])),
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User record", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}
