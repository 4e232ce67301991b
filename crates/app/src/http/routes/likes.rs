use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::http::routes::{failure, parse_json};
use crate::state::AppState;
use wishwall_core::domain::comments::{AckResponse, LikeRequest};
use wishwall_core::error::CoreError;
use wishwall_core::types::comment_id::CommentId;
use wishwall_infra::db::{apply_like, CommentsRepoError};

#[derive(Debug, Error)]
pub enum LikeApiError {
    #[error("invalid payload")]
    InvalidPayload,
    #[error("{0}")]
    Validation(#[from] CoreError),
    #[error("db error: {0}")]
    Db(#[from] CommentsRepoError),
}

/// Unknown ids are acknowledged without touching anything.
pub async fn post_like(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AckResponse>, LikeApiError> {
    let payload: LikeRequest = parse_json(&body).ok_or(LikeApiError::InvalidPayload)?;
    let id = CommentId::try_from(payload.id.unwrap_or_default())?;
    let found = apply_like(&state.db, id.as_str(), payload.action).await?;
    if found {
        info!(id = %id, action = payload.action.as_str(), "like applied");
    } else {
        debug!(id = %id, "like for unknown comment ignored");
    }
    Ok(Json(AckResponse::ok()))
}

impl IntoResponse for LikeApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            LikeApiError::InvalidPayload | LikeApiError::Validation(_) => {
                warn!(error = %self, "like rejected");
                failure(StatusCode::BAD_REQUEST, self.to_string())
            }
            LikeApiError::Db(_) => {
                error!(error = %self, "like store failure");
                failure(StatusCode::SERVICE_UNAVAILABLE, "storage unavailable")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::LikeApiError;
    use wishwall_core::error::CoreError;

    #[test]
    fn bad_input_is_a_client_error() {
        let status = |err: LikeApiError| err.into_response().status();
        assert_eq!(status(LikeApiError::InvalidPayload), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(LikeApiError::Validation(CoreError::MissingId)),
            StatusCode::BAD_REQUEST
        );
    }
}
