use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};
use service::errors::ServiceError;
use tracing::error;

/// Error rendered as `{"error": {"<title>": "<detail>"}}` with a matching status.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: impl Into<String>) -> Self {
        Self { status, title, detail: detail.into() }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", detail)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert(self.title.to_string(), Value::String(self.detail));
        (self.status, Json(serde_json::json!({ "error": body }))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::BadRequest(msg) => JsonApiError::bad_request(msg),
            ServiceError::NotFound(msg) | ServiceError::EmptyCollection(msg) => {
                JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", msg)
            }
            ServiceError::Forbidden(msg) => JsonApiError::new(StatusCode::FORBIDDEN, "Forbidden", msg),
            ServiceError::Conflict(msg) => JsonApiError::new(StatusCode::CONFLICT, "Conflict", msg),
            ServiceError::Db(msg) => {
                error!(error = %msg, "database failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", "database error")
            }
        }
    }
}
