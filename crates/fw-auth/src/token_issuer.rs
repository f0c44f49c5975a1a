use crate::{AuthError, Claims, Result as AuthErrorResult};

use fw_core::User;

use std::panic::Location;
use std::time::Duration;

use chrono::Utc;
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

/// Issues self-contained session tokens signed with a symmetric secret.
///
/// Tokens are not stored or revocable server-side; their lifetime is
/// bounded only by the embedded expiry, so the configured TTL should stay
/// short.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    header: Header,
}

impl TokenIssuer {
    /// Create issuer with HS256 (symmetric secret)
    pub fn with_hs256(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
        }
    }

    /// Sign a token carrying the user's identity claims, expiring `ttl`
    /// from now.
    #[track_caller]
    pub fn issue(&self, user: &User, ttl: Duration) -> AuthErrorResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            kyc: user.kyc_status.as_str().to_string(),
            exp: now + ttl.as_secs() as i64,
            iat: now,
        };

        encode(&self.header, &claims, &self.encoding_key).map_err(|e| AuthError::Signing {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
