pub mod comments;
pub mod health;
pub mod likes;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;

use wishwall_core::domain::comments::AckResponse;

/// Parses a JSON body, `None` when it is empty or malformed.
pub fn parse_json<T>(body: &Bytes) -> Option<T>
where
    T: DeserializeOwned,
{
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body).ok()
}

pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(AckResponse::failed(message))).into_response()
}
