//! Request extractors

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use linkvault_core::{AuthFailure, Error, Identity, VaultServices};

use crate::error::ApiError;

/// Verified caller identity. Handlers taking this cannot run without the gate.
pub struct AuthUser(pub Identity);

#[async_trait]
impl FromRequestParts<VaultServices> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        services: &VaultServices,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| Error::unauthorized(AuthFailure::Malformed))?,
            ),
            None => None,
        };

        let identity = services.gate.authenticate(header)?;
        Ok(AuthUser(identity))
    }
}

/// Unwrap a JSON body, turning axum's rejection into the usual error body
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError(Error::validation(rejection.body_text())))
}
