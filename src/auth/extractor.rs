use crate::api::ErrorResponse;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::db::get_user_from_token;

/// Authenticated identity for a request, resolved from the bearer token.
///
/// Handlers take this as an argument; the session lookup runs before the
/// handler body, and a bad token short-circuits with a 401. This is the only
/// way identity reaches a handler, so the session context is always explicit.
pub struct AuthUser(pub User);

/// Why a request failed authentication.
#[derive(Debug, PartialEq)]
pub enum AuthError {
    /// No Authorization header, or one that is not `Bearer <token>`
    MissingBearerToken,
    /// Token unknown, expired, or belonging to a deleted user
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingBearerToken => "Missing or malformed bearer token",
            AuthError::InvalidToken => "Invalid or expired token",
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingBearerToken)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let user = get_user_from_token(&state.pool, token)
            .await
            .ok_or(AuthError::InvalidToken)?;

        Ok(AuthUser(user))
    }
}
