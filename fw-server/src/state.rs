use fw_auth::{JwtValidator, PasswordHasher, TokenIssuer};

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

/// Shared application state: every dependency the services need is passed
/// in explicitly at construction - no ambient singletons.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub token_issuer: Arc<TokenIssuer>,
    pub jwt_validator: Arc<JwtValidator>,
    pub password_hasher: PasswordHasher,
    pub access_token_ttl: Duration,
}
