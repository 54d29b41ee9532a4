use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use darsak_core::devices::{DeviceError, DeviceRegistrationOutcome};
use darsak_model::{DeviceId, DeviceRegistration};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::AuthenticatedUser;
use crate::infra::{app_state::AppState, errors::AppResult, extract::ApiPath};

#[derive(Debug, Deserialize)]
pub struct RegisterDeviceRequest {
    pub device_id: DeviceId,
    /// Falls back to the `User-Agent` header when absent.
    #[serde(default)]
    pub device_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterDeviceResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<DeviceRegistrationOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Called once after login completes. A refusal must block the session on
/// the client, so it is reported as 403 with the localized message.
pub async fn register_device_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    headers: HeaderMap,
    Json(request): Json<RegisterDeviceRequest>,
) -> AppResult<Response> {
    let device_name = request
        .device_name
        .or_else(|| {
            headers
                .get(header::USER_AGENT)
                .and_then(|ua| ua.to_str().ok())
                .map(str::to_string)
        })
        .unwrap_or_default();

    match state
        .devices
        .register_device(user.id(), request.device_id, &device_name)
        .await
    {
        Ok(outcome) => Ok(Json(RegisterDeviceResponse {
            success: true,
            outcome: Some(outcome),
            error: None,
        })
        .into_response()),
        Err(DeviceError::LimitReached { message, .. }) => Ok((
            StatusCode::FORBIDDEN,
            Json(RegisterDeviceResponse {
                success: false,
                outcome: None,
                error: Some(message),
            }),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

/// Called on explicit logout. Succeeds whether or not the device was known;
/// an id that could never have been stored matches nothing.
pub async fn unregister_device_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(device_id): ApiPath<String>,
) -> AppResult<StatusCode> {
    match DeviceId::parse(&device_id) {
        Ok(device_id) => {
            state
                .devices
                .unregister_device(user.id(), &device_id)
                .await?;
        }
        Err(err) => debug!(error = %err, "unregister for malformed device id"),
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_devices_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<DeviceRegistration>>> {
    Ok(Json(state.devices.list_devices(user.id()).await?))
}
