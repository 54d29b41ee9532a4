use axum::{
    extract::State,
    http::StatusCode,
};
use darsak_model::{ContentId, UserId};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::infra::{app_state::AppState, errors::AppResult, extract::ApiPath};

pub async fn grant_ownership_handler(
    State(state): State<AppState>,
    admin: AuthenticatedUser,
    ApiPath((user_id, lesson_id)): ApiPath<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state
        .entitlements
        .grant_ownership(admin.id(), UserId(user_id), ContentId(lesson_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn revoke_ownership_handler(
    State(state): State<AppState>,
    admin: AuthenticatedUser,
    ApiPath((user_id, lesson_id)): ApiPath<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state
        .entitlements
        .revoke_ownership(admin.id(), UserId(user_id), ContentId(lesson_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
