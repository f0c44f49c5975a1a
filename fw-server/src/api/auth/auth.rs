//! Authentication REST API handlers
//!
//! Public endpoints: registration and login.

use crate::{
    ApiResult, AppState, LoginRequest, LoginResponse, RegisterRequest, UserResponse,
    services::{AuthService, UserService},
};

use axum::{Json, extract::State, http::StatusCode};

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        UserService::new(state.pool.clone(), state.password_hasher),
        state.token_issuer.clone(),
        state.jwt_validator.clone(),
        state.access_token_ttl,
    )
}

/// POST /api/v1/register
///
/// Create a new identity. Responds 201 with the stored record
/// (credential hash scrubbed), 409 if the email is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let service = UserService::new(state.pool.clone(), state.password_hasher);
    let user = service
        .register(&req.full_name, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse { user: user.into() }),
    ))
}

/// POST /api/v1/login
///
/// Verify credentials and issue a session token. Unknown email and wrong
/// password are indistinguishable in the response.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let service = auth_service(&state);
    let (user, token) = service.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}
