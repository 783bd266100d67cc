use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use realmap_core::GeoError;
use serde::Serialize;
use tracing::warn;

/// Error wrapper for API handlers.
#[derive(Debug)]
pub struct ApiError(pub GeoError);

impl From<GeoError> for ApiError {
    fn from(e: GeoError) -> Self {
        ApiError(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            GeoError::NotFound(_) => StatusCode::NOT_FOUND,
            GeoError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self.0 {
            GeoError::NotFound(_) => "not_found",
            GeoError::Validation(_) => "invalid_request",
            GeoError::Transport(_) => "transport_error",
            GeoError::Cancelled => "cancelled",
            _ => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self.0, "request failed");
        }
        let body = ErrorBody {
            error: self.kind(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(ApiError(GeoError::NotFound("x".into())).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError(GeoError::Validation("x".into())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError(GeoError::InvalidData("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
