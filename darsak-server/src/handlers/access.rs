use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use darsak_model::{ContentId, OwnershipGrant};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::infra::{app_state::AppState, errors::AppResult, extract::ApiPath};

/// Decide whether the caller may open a lesson.
///
/// Responds 200 with the decision when allowed and 403 with the same body
/// when denied, so clients can show the reason either way.
pub async fn lesson_access_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(lesson_id): ApiPath<Uuid>,
) -> AppResult<Response> {
    let decision = state
        .entitlements
        .check_access(user.id(), ContentId(lesson_id))
        .await?;

    let status = if decision.allowed {
        StatusCode::OK
    } else {
        StatusCode::FORBIDDEN
    };
    Ok((status, Json(decision)).into_response())
}

/// Lessons the caller owns through ad-hoc purchases.
pub async fn my_ownership_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<OwnershipGrant>>> {
    Ok(Json(state.entitlements.list_owned(user.id()).await?))
}
