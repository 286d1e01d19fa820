use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON error body shared by every BetEngine endpoint.
///
/// `error` is the user-facing message, `code` the machine tag.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
    pub code: &'a str,
}

/// Render `{error, code}` with the given status.
pub fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message,
            code,
        }),
    )
        .into_response()
}

/// Fallback for unmatched API paths.
pub async fn endpoint_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "endpoint not found")
}
