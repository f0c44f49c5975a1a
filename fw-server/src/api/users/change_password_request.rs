use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    /// New plaintext password (min 8 characters)
    pub new_password: String,
}
