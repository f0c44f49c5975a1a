use fw_auth::AuthError;
use fw_core::CoreError;
use fw_db::DbError;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors surfaced by the service layer. Domain-rule violations wrap the
/// originating error unchanged so the API layer can translate them;
/// infrastructure faults are logged there and returned opaquely.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },

    #[error("{source}")]
    Db {
        #[source]
        source: DbError,
    },

    #[error("{source}")]
    Core {
        #[source]
        source: CoreError,
    },

    #[error("{source}")]
    Auth {
        #[source]
        source: AuthError,
    },
}

impl From<DbError> for ServiceError {
    fn from(source: DbError) -> Self {
        Self::Db { source }
    }
}

impl From<CoreError> for ServiceError {
    fn from(source: CoreError) -> Self {
        Self::Core { source }
    }
}

impl From<AuthError> for ServiceError {
    fn from(source: AuthError) -> Self {
        Self::Auth { source }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
