use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use vitrine_infra::StoreError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Storage faults are fatal to the current request only.
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!("catalog store error: {err}");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", err.to_string())
}

pub fn io_error_to_response(err: std::io::Error) -> axum::response::Response {
    tracing::error!("media store error: {err}");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "media_error", err.to_string())
}
