//! Mapping of query failures to HTTP responses.

use api_shared::ErrorRes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ods_core::{ClientError, QueryError, UpstreamError};

#[derive(Debug)]
pub enum ApiError {
    /// Rejected at the boundary before any handler ran.
    BadRequest(String),
    Query(QueryError),
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::Query(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Query(QueryError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Query(QueryError::Upstream(UpstreamError::NotFound(_))) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Query(QueryError::Upstream(UpstreamError::Client(ClientError::Timeout))) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            ApiError::Query(QueryError::Upstream(_)) | ApiError::Query(QueryError::Parse { .. }) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Query(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "request rejected");
        }

        (status, Json(ErrorRes { message })).into_response()
    }
}
