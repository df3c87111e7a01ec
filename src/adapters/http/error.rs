use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use tracing::{error, warn};

use crate::application::dto::ErrorResponse;
use crate::domain::errors::DomainError;

/// Wraps a domain error so handlers can return it with `?`.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            warn!(error = %self.0, "rejected request");
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self.0, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_are_bad_requests() {
        let response = ApiError(DomainError::Decode("bad dicom".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_faults_are_server_errors() {
        let response = ApiError(DomainError::Internal("decoder task failed: panicked".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
