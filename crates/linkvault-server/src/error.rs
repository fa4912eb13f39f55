//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use linkvault_core::{ApiResponse, Error, Status};

/// A core error on its way out as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        if status == Status::Internal {
            log::error!("Internal error: {}", self.0);
        }

        let code = StatusCode::from_u16(status.http_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (code, Json(ApiResponse::<()>::from_error(&self.0))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
