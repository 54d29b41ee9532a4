use axum::{
    Router,
    routing::{delete, get, put},
};
use darsak_core::api::routes::{utils::relative_to_v1, v1};

use crate::handlers::{access, admin, devices};
use crate::infra::app_state::AppState;

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            relative_to_v1(v1::lessons::ACCESS),
            get(access::lesson_access_handler),
        )
        .route(
            relative_to_v1(v1::ownership::MINE),
            get(access::my_ownership_handler),
        )
        .route(
            relative_to_v1(v1::devices::COLLECTION),
            get(devices::list_devices_handler)
                .post(devices::register_device_handler),
        )
        .route(
            relative_to_v1(v1::devices::ITEM),
            delete(devices::unregister_device_handler),
        )
        .route(
            relative_to_v1(v1::admin::OWNERSHIP),
            put(admin::grant_ownership_handler)
                .delete(admin::revoke_ownership_handler),
        )
}
