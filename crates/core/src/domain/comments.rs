use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::comment_id::CommentId;

pub const ANONYMOUS_NAME: &str = "Anonymous";
pub const MAX_NAME_LEN: usize = 64;
pub const MAX_TEXT_LEN: usize = 1000;
/// Upper bound for a client-supplied initial like count.
pub const MAX_INITIAL_LIKES: i64 = 1_000_000;
/// How far ahead of the server clock a client timestamp may be.
pub const MAX_CLOCK_SKEW_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub text: String,
    pub likes: i64,
    pub timestamp: i64,
}

/// Body of `POST /comments`. Every field is optional on the wire so that
/// missing values surface as validation errors rather than parse failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// A comment that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub id: CommentId,
    pub name: String,
    pub text: String,
    pub likes: i64,
    pub timestamp: i64,
}

impl NewComment {
    pub fn validate(request: CreateCommentRequest, now_ms: i64) -> Result<Self, CoreError> {
        let id = CommentId::try_from(request.id.unwrap_or_default())?;
        let text = normalize_text(request.text.as_deref())?;
        let name = normalize_name(request.name.as_deref())?;
        let likes = request.likes.unwrap_or(0);
        if likes < 0 {
            return Err(CoreError::NegativeLikes);
        }
        if likes > MAX_INITIAL_LIKES {
            return Err(CoreError::TooManyLikes(MAX_INITIAL_LIKES));
        }
        let timestamp = request.timestamp.unwrap_or(now_ms);
        if timestamp < 0 || timestamp > now_ms.saturating_add(MAX_CLOCK_SKEW_MS) {
            return Err(CoreError::TimestampOutOfRange(timestamp));
        }
        Ok(NewComment {
            id,
            name,
            text,
            likes,
            timestamp,
        })
    }

    pub fn into_comment(self) -> Comment {
        Comment {
            id: self.id.into(),
            name: self.name,
            text: self.text,
            likes: self.likes,
            timestamp: self.timestamp,
        }
    }
}

pub fn normalize_text(text: Option<&str>) -> Result<String, CoreError> {
    let trimmed = text.unwrap_or("").trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyText);
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(CoreError::TextTooLong(MAX_TEXT_LEN));
    }
    Ok(trimmed.to_string())
}

/// Blank names fall back to [`ANONYMOUS_NAME`].
pub fn normalize_name(name: Option<&str>) -> Result<String, CoreError> {
    let trimmed = name.unwrap_or("").trim();
    if trimmed.is_empty() {
        return Ok(ANONYMOUS_NAME.to_string());
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::NameTooLong(MAX_NAME_LEN));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    #[default]
    Like,
    Unlike,
}

impl LikeAction {
    pub fn as_str(self) -> &'static str {
        match self {
            LikeAction::Like => "like",
            LikeAction::Unlike => "unlike",
        }
    }
}

/// Body of `POST /like`. A missing `action` means `like`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LikeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub action: LikeAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AckResponse {
    pub fn ok() -> Self {
        AckResponse {
            ok: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        AckResponse {
            ok: false,
            error: Some(message.into()),
        }
    }
}

/// Display order: most likes first, newer first among equal likes.
pub fn display_order(a: &Comment, b: &Comment) -> Ordering {
    b.likes
        .cmp(&a.likes)
        .then_with(|| b.timestamp.cmp(&a.timestamp))
}

pub fn sort_for_display(comments: &mut [Comment]) {
    comments.sort_by(display_order);
}
