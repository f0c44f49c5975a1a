use crate::{api, health};

use crate::AppState;

use axum::{
    Router,
    routing::{get, patch, post, put},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Public endpoints
        .route("/api/v1/register", post(api::auth::auth::register))
        .route("/api/v1/login", post(api::auth::auth::login))
        // Authenticated endpoints (bearer token via AuthUser extractor)
        .route("/api/v1/users/me", get(api::users::users::get_me))
        .route(
            "/api/v1/users/me/password",
            put(api::users::users::change_password),
        )
        .route(
            "/api/v1/users/me/kyc",
            post(api::users::users::initiate_kyc),
        )
        .route(
            "/api/v1/users/{id}/kyc",
            patch(api::users::users::advance_kyc),
        )
        .route("/api/v1/users", get(api::users::users::list_users))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Add shared state
        .with_state(state)
        // CORS middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
