use fw_core::User;

use serde::Serialize;

/// User DTO for JSON serialization.
///
/// This is the only client-facing projection of an identity record; the
/// credential hash is deliberately absent.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub kyc_status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_string(),
            full_name: u.full_name,
            email: u.email,
            kyc_status: u.kyc_status.as_str().to_string(),
            created_at: u.created_at.timestamp(),
            updated_at: u.updated_at.timestamp(),
        }
    }
}
