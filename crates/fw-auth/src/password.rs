//! Password hashing and verification.
//!
//! bcrypt embeds a per-password random salt and scales its work with the
//! cost factor, so equal passwords hash differently and brute force stays
//! expensive as hardware improves. Verification is constant-time.

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// One-way password hasher with an operator-tunable cost factor.
///
/// Hashing is CPU-bound; callers on an async path should run `hash` under
/// `tokio::task::spawn_blocking`.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Produce a salted digest of `plaintext`. Fails only on internal
    /// error (bad cost factor, entropy source unavailable) - never on
    /// normal input.
    #[track_caller]
    pub fn hash(&self, plaintext: &str) -> AuthErrorResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| AuthError::Hashing {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Check `plaintext` against a stored digest. A malformed stored hash
    /// is a non-match, not an error.
    pub fn verify(plaintext: &str, stored_hash: &str) -> bool {
        bcrypt::verify(plaintext, stored_hash).unwrap_or(false)
    }
}
