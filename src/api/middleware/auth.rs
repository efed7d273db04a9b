//! HTTP basic authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};

use crate::api::AppState;
use crate::errors::AppError;

/// Authenticated user resolved from basic credentials
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

/// Basic authentication middleware.
///
/// Decodes the `Authorization: Basic` header, checks the credentials against
/// the stored users and injects the [`CurrentUser`] into the request
/// extensions. Missing or wrong credentials yield 401 with a Basic challenge.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credentials = request
        .headers()
        .typed_get::<Authorization<Basic>>()
        .ok_or(AppError::Unauthorized)?;

    let user = state
        .auth_service
        .authenticate(credentials.username(), credentials.password())
        .await
        .map_err(|e| match e {
            AppError::InvalidCredentials => AppError::Unauthorized,
            other => other,
        })?;

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        email: user.email,
    });

    Ok(next.run(request).await)
}
