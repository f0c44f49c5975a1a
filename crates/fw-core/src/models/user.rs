//! User entity - one registered identity and its credential.

use crate::KycStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. The email is the login key and is stored in
/// normalized (trimmed, lowercased) form; `password_hash` is the bcrypt
/// digest and must never appear in a client-facing projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub kyc_status: KycStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id and timestamps.
    /// KYC always starts at `Unverified`.
    pub fn new(full_name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            full_name,
            email,
            password_hash,
            kyc_status: KycStatus::Unverified,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the user has passed KYC review
    pub fn is_verified(&self) -> bool {
        self.kyc_status == KycStatus::Verified
    }
}

/// Normalize an email for storage and lookup: trim whitespace and
/// lowercase. Uniqueness is enforced on the normalized form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
