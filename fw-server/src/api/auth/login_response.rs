use crate::UserDto;

use serde::Serialize;

/// Successful login: the session token plus the caller's identity
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserDto,
}
