//! User REST API handlers
//!
//! All endpoints here require bearer authentication via [`AuthUser`].

use crate::{
    ApiResult, AppState, AuthUser, ChangeKycRequest, ChangePasswordRequest, ListUsersQuery,
    UserDto, UserListResponse, UserResponse, services::UserService,
};

use fw_core::KycStatus;

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

fn user_service(state: &AppState) -> UserService {
    UserService::new(state.pool.clone(), state.password_hasher)
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/v1/users/me
///
/// The authenticated caller's own identity record
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user_id = auth.0.user_id()?;

    let user = user_service(&state).get_by_id(user_id).await?;

    Ok(Json(UserResponse { user: user.into() }))
}

/// PUT /api/v1/users/me/password
///
/// Replace the caller's credential. Responds 204 on success.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    let user_id = auth.0.user_id()?;

    user_service(&state)
        .change_password(user_id, &req.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/me/kyc
///
/// Submit the caller for KYC review (current status -> pending)
pub async fn initiate_kyc(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user_id = auth.0.user_id()?;

    let user = user_service(&state)
        .change_kyc_status(user_id, KycStatus::Pending)
        .await?;

    Ok(Json(UserResponse { user: user.into() }))
}

/// PATCH /api/v1/users/{id}/kyc
///
/// Record a KYC review decision for a user. The requested status must be
/// a permitted transition from the current one (409 otherwise).
pub async fn advance_kyc(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<ChangeKycRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = Uuid::parse_str(&id)?;
    let requested = KycStatus::from_str(&req.status)?;

    let user = user_service(&state)
        .change_kyc_status(user_id, requested)
        .await?;

    Ok(Json(UserResponse { user: user.into() }))
}

/// GET /api/v1/users
///
/// Page through users, optionally filtered by KYC status
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<UserListResponse>> {
    let status = match query.status.as_deref() {
        None | Some("") => None,
        Some(s) => Some(KycStatus::from_str(s)?),
    };

    let page = user_service(&state)
        .list_users(status, query.page, query.page_size)
        .await?;

    Ok(Json(UserListResponse {
        users: page.users.into_iter().map(UserDto::from).collect(),
        total: page.total,
        page: query.page,
        page_size: query.page_size,
    }))
}
