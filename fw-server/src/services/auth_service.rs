//! Session service - login and token-to-identity resolution.

use crate::services::{Result as ServiceResult, UserService};

use fw_auth::{Claims, JwtValidator, TokenIssuer};
use fw_core::User;

use std::sync::Arc;
use std::time::Duration;

pub struct AuthService {
    users: UserService,
    issuer: Arc<TokenIssuer>,
    validator: Arc<JwtValidator>,
    access_token_ttl: Duration,
}

impl AuthService {
    pub fn new(
        users: UserService,
        issuer: Arc<TokenIssuer>,
        validator: Arc<JwtValidator>,
        access_token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            issuer,
            validator,
            access_token_ttl,
        }
    }

    /// Verify credentials and issue a session token. Credential failures
    /// propagate unchanged (opaque `InvalidCredentials`).
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<(User, String)> {
        let user = self.users.verify_credentials(email, password).await?;
        let token = self.issuer.issue(&user, self.access_token_ttl)?;

        log::info!("User {} logged in", user.id);

        Ok((user, token))
    }

    /// Resolve a bearer token to its identity claims. Pure - no store
    /// access; failures carry the specific validation error.
    pub fn authenticate(&self, token: &str) -> ServiceResult<Claims> {
        Ok(self.validator.validate(token)?)
    }
}
