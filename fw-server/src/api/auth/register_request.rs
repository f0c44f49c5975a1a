use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Display name (required, non-blank)
    pub full_name: String,

    /// Login email (required, unique)
    pub email: String,

    /// Plaintext password (required, min 8 characters)
    pub password: String,
}
