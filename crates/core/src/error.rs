use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("id is required")]
    MissingId,
    #[error("invalid comment id: {0}")]
    InvalidId(String),
    #[error("text is required")]
    EmptyText,
    #[error("text is too long (max {0} chars)")]
    TextTooLong(usize),
    #[error("name is too long (max {0} chars)")]
    NameTooLong(usize),
    #[error("likes must not be negative")]
    NegativeLikes,
    #[error("likes must not exceed {0}")]
    TooManyLikes(i64),
    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}
