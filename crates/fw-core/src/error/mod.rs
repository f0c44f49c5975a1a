use crate::KycStatus;

use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid KYC status: {value} {location}")]
    InvalidKycStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid KYC transition: {from} -> {to} {location}")]
    InvalidKycTransition {
        from: KycStatus,
        to: KycStatus,
        location: ErrorLocation,
    },

    #[error("UUID parse error: {source} {location}")]
    Uuid {
        source: uuid::Error,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
