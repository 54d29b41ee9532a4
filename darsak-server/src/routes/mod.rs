pub mod v1;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use darsak_core::api::routes::{HEALTH, v1::ROOT};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::handlers::health::health_handler;
use crate::infra::{app_state::AppState, config::CorsConfig};

/// Create the main API router with all versions
pub fn create_api_router() -> Router<AppState> {
    Router::new().nest(ROOT, v1::create_v1_router())
}

/// Full application: versioned API, health probe, CORS and request tracing.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config().cors);

    Router::new()
        .route(HEALTH, get(health_handler))
        .merge(create_api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
