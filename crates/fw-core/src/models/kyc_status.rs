use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// KYC verification status of an identity record.
///
/// Every verification must pass through `Pending` review before reaching a
/// decision; `Rejected` users may resubmit. `Unverified` is only ever the
/// initial state and is never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    /// Initial state: no verification submitted yet
    #[default]
    Unverified,
    /// Verification submitted, awaiting review
    Pending,
    /// Review approved
    Verified,
    /// Review rejected (may resubmit)
    Rejected,
}

impl KycStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unverified => "unverified",
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    /// Whether the edge `self -> requested` is in the transition table.
    pub fn can_transition_to(&self, requested: KycStatus) -> bool {
        matches!(
            (self, requested),
            (Self::Unverified, Self::Pending)
                | (Self::Pending, Self::Verified)
                | (Self::Pending, Self::Rejected)
                | (Self::Rejected, Self::Pending)
        )
    }

    /// Validate the requested transition and return the new status.
    ///
    /// Self-transitions are invalid, as is skipping review
    /// (e.g. `Unverified -> Verified`).
    #[track_caller]
    pub fn transition_to(&self, requested: KycStatus) -> CoreErrorResult<KycStatus> {
        if self.can_transition_to(requested) {
            Ok(requested)
        } else {
            Err(CoreError::InvalidKycTransition {
                from: *self,
                to: requested,
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}

impl FromStr for KycStatus {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "unverified" => Ok(Self::Unverified),
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::InvalidKycStatus {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for KycStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
