//! Identity service - registration, lookup, credential verification and
//! KYC transitions.
//!
//! Credential rules enforced here:
//! - the plaintext password never reaches the store, only its bcrypt hash
//! - `verify_credentials` answers "unknown email" and "wrong password"
//!   with the same opaque error so accounts cannot be enumerated
//! - the KYC transition table is checked before any status write; the
//!   repository's raw status update is never reachable from outside this
//!   service

use crate::services::{Result as ServiceResult, ServiceError};

use fw_auth::{AuthError, PasswordHasher};
use fw_core::{KycStatus, User, normalize_email};
use fw_db::{DbError, UserPage, UserRepository};

use std::panic::Location;

use error_location::ErrorLocation;
use sqlx::SqlitePool;
use uuid::Uuid;

const MIN_PASSWORD_LENGTH: usize = 8;

pub struct UserService {
    repo: UserRepository,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(pool: SqlitePool, hasher: PasswordHasher) -> Self {
        Self {
            repo: UserRepository::new(pool),
            hasher,
        }
    }

    /// Register a new identity. The email is normalized before storage and
    /// must be unique; KYC starts at `Unverified`. The returned record
    /// still carries the hash - callers project it away before any
    /// client-facing response.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<User> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(validation("full name is required", "full_name"));
        }

        let email = normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(validation("a valid email is required", "email"));
        }

        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(validation(
                format!("password must be at least {} characters", MIN_PASSWORD_LENGTH),
                "password",
            ));
        }

        let password_hash = self.hash_password(password).await?;

        let user = User::new(full_name.to_string(), email, password_hash);
        self.repo.create(&user).await?;

        log::info!("Registered user {}", user.id);

        Ok(user)
    }

    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<User> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Check a login attempt. Unknown email and hash mismatch both come
    /// back as the same `InvalidCredentials` - callers must not be able to
    /// tell which one happened.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> ServiceResult<User> {
        let email = normalize_email(email);

        let user = match self.repo.find_by_email(&email).await {
            Ok(user) => user,
            Err(DbError::UserNotFound { .. }) => {
                return Err(invalid_credentials());
            }
            Err(e) => return Err(e.into()),
        };

        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || {
            PasswordHasher::verify(&password, &stored_hash)
        })
        .await
        .map_err(|e| ServiceError::Internal {
            message: format!("password verification task failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if !matches {
            return Err(invalid_credentials());
        }

        Ok(user)
    }

    /// Replace the stored credential with the hash of a new password.
    pub async fn change_password(&self, id: Uuid, new_password: &str) -> ServiceResult<()> {
        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(validation(
                format!("password must be at least {} characters", MIN_PASSWORD_LENGTH),
                "new_password",
            ));
        }

        let new_hash = self.hash_password(new_password).await?;
        self.repo.update_password_hash(id, &new_hash).await?;

        log::info!("Updated credentials for user {}", id);

        Ok(())
    }

    /// Advance the user's KYC status. The transition table is the single
    /// gatekeeper: the store is only called with an already-validated
    /// target status. Returns the updated record.
    pub async fn change_kyc_status(&self, id: Uuid, requested: KycStatus) -> ServiceResult<User> {
        let user = self.repo.find_by_id(id).await?;
        let new_status = user.kyc_status.transition_to(requested)?;

        self.repo.update_kyc_status(id, new_status).await?;

        log::info!(
            "KYC status of user {} changed: {} -> {}",
            id,
            user.kyc_status,
            new_status
        );

        Ok(self.repo.find_by_id(id).await?)
    }

    /// One page of users, optionally filtered by KYC status.
    pub async fn list_users(
        &self,
        status: Option<KycStatus>,
        page: u32,
        page_size: u32,
    ) -> ServiceResult<UserPage> {
        if page < 1 {
            return Err(validation("page must be >= 1", "page"));
        }
        if page_size < 1 {
            return Err(validation("page_size must be >= 1", "page_size"));
        }

        Ok(self.repo.list(status, page, page_size).await?)
    }

    /// bcrypt is CPU-bound; run it off the async path so in-flight
    /// requests are not stalled behind a hash computation.
    async fn hash_password(&self, password: &str) -> ServiceResult<String> {
        let hasher = self.hasher;
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ServiceError::Internal {
                message: format!("password hashing task failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .map_err(ServiceError::from)
    }
}

#[track_caller]
fn validation<S: Into<String>>(message: S, field: &str) -> ServiceError {
    ServiceError::Validation {
        message: message.into(),
        field: Some(field.to_string()),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn invalid_credentials() -> ServiceError {
    ServiceError::Auth {
        source: AuthError::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        },
    }
}
