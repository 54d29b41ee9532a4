use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use darsak_model::UserId;
use tracing::debug;

use crate::auth::jwt::AuthError;
use crate::infra::{app_state::AppState, errors::AppError};

/// The caller, as identified by a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn id(&self) -> UserId {
        self.0
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_token(parts)
            .and_then(|token| state.tokens.verify(token))
            .map_err(|err| {
                debug!(error = %err, "rejecting unauthenticated request");
                AppError::unauthorized("Authentication required")
            })?;

        Ok(Self(UserId(claims.sub)))
    }
}
