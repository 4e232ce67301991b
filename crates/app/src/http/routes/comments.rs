use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::http::routes::{failure, parse_json};
use crate::state::AppState;
use wishwall_core::domain::comments::{AckResponse, Comment, CreateCommentRequest, NewComment};
use wishwall_core::error::CoreError;
use wishwall_core::types::relative_time::now_millis;
use wishwall_infra::db::{insert_comment, list_comments, CommentsRepoError};

#[derive(Debug, Error)]
pub enum CommentsApiError {
    #[error("invalid payload")]
    InvalidPayload,
    #[error("{0}")]
    Validation(#[from] CoreError),
    #[error("db error: {0}")]
    Db(#[from] CommentsRepoError),
}

pub async fn get_comments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Comment>>, CommentsApiError> {
    let comments = list_comments(&state.db).await?;
    debug!(count = comments.len(), "comments listed");
    Ok(Json(comments))
}

pub async fn post_comment(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AckResponse>, CommentsApiError> {
    let payload: CreateCommentRequest =
        parse_json(&body).ok_or(CommentsApiError::InvalidPayload)?;
    let comment = NewComment::validate(payload, now_millis())?;
    insert_comment(&state.db, &comment).await?;
    info!(id = %comment.id, name = %comment.name, "comment added");
    Ok(Json(AckResponse::ok()))
}

impl IntoResponse for CommentsApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            CommentsApiError::InvalidPayload | CommentsApiError::Validation(_) => {
                warn!(error = %self, "comment rejected");
                failure(StatusCode::BAD_REQUEST, self.to_string())
            }
            CommentsApiError::Db(CommentsRepoError::DuplicateId(_)) => {
                warn!(error = %self, "comment rejected");
                failure(StatusCode::CONFLICT, "comment id already exists")
            }
            CommentsApiError::Db(CommentsRepoError::Sqlx(_)) => {
                error!(error = %self, "comment store failure");
                failure(StatusCode::SERVICE_UNAVAILABLE, "storage unavailable")
            }
        }
    }
}
