use crate::UserDto;
use serde::Serialize;

/// One page of users plus the total for the applied filter
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserDto>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}
