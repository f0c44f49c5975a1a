pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod services;
pub mod state;

pub use api::{
    auth::{
        auth::{login, register},
        login_request::LoginRequest,
        login_response::LoginResponse,
        register_request::RegisterRequest,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::auth_user::AuthUser,
    users::{
        change_kyc_request::ChangeKycRequest,
        change_password_request::ChangePasswordRequest,
        list_users_query::ListUsersQuery,
        user_dto::UserDto,
        user_list_response::UserListResponse,
        user_response::UserResponse,
        users::{advance_kyc, change_password, get_me, initiate_kyc, list_users},
    },
};

pub use crate::routes::build_router;
pub use crate::services::{AuthService, ServiceError, UserService};
pub use crate::state::AppState;

#[cfg(test)]
mod tests;
