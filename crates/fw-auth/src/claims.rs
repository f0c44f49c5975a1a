use crate::{AuthError, Result as AuthErrorResult};

use fw_core::KycStatus;

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in a session token. Self-contained: everything the
/// request boundary needs for authorization is carried here, nothing is
/// looked up server-side during validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Login email at issuance
    pub email: String,
    /// KYC status snapshot at issuance
    pub kyc: String,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
}

impl Claims {
    /// Validate claims after signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub (user id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.email.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "email".to_string(),
                message: "email cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // kyc must be a member of the closed status set
        self.kyc_status()?;

        Ok(())
    }

    /// Parse the subject as a user id
    #[track_caller]
    pub fn user_id(&self) -> AuthErrorResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|e| AuthError::InvalidClaim {
            claim: "sub".to_string(),
            message: format!("not a valid user id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Parse the KYC status snapshot
    #[track_caller]
    pub fn kyc_status(&self) -> AuthErrorResult<KycStatus> {
        KycStatus::from_str(&self.kyc).map_err(|_| AuthError::InvalidClaim {
            claim: "kyc".to_string(),
            message: format!("unknown KYC status '{}'", self.kyc),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
