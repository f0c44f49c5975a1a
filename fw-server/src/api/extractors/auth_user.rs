//! Axum extractor for bearer-token authentication

use crate::{ApiError, AppState};

use fw_auth::{AuthError, Claims};

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;
use http::header::AUTHORIZATION;

/// Extracts and validates the bearer token from the `Authorization`
/// header, yielding the authenticated caller's claims. Handlers that take
/// this extractor reject unauthenticated requests with 401.
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .ok_or_else(|| {
                    ApiError::from(AuthError::MissingHeader {
                        location: ErrorLocation::from(Location::caller()),
                    })
                })?
                .to_str()
                .map_err(|_| {
                    ApiError::from(AuthError::InvalidScheme {
                        location: ErrorLocation::from(Location::caller()),
                    })
                })?;

            let token = header.strip_prefix("Bearer ").ok_or_else(|| {
                ApiError::from(AuthError::InvalidScheme {
                    location: ErrorLocation::from(Location::caller()),
                })
            })?;

            let claims = state.jwt_validator.validate(token)?;

            Ok(AuthUser(claims))
        }
    }
}
