use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const MAX_COMMENT_ID_LEN: usize = 64;

/// Opaque identifier of a wish. Assigned once by whoever creates the wish and
/// never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentId(String);

impl CommentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for CommentId {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::MissingId);
        }
        if trimmed.len() > MAX_COMMENT_ID_LEN || trimmed.chars().any(|ch| ch.is_whitespace()) {
            return Err(CoreError::InvalidId(trimmed.to_string()));
        }
        Ok(CommentId(trimmed.to_string()))
    }
}

impl TryFrom<String> for CommentId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CommentId::try_from(value.as_str())
    }
}

impl From<CommentId> for String {
    fn from(value: CommentId) -> Self {
        value.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_generated_shape() {
        let id = CommentId::try_from("id_k3j9x0a").unwrap();
        assert_eq!(id.as_str(), "id_k3j9x0a");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let id = CommentId::try_from("  a  ").unwrap();
        assert_eq!(id.as_str(), "a");
    }

    #[test]
    fn rejects_empty_and_inner_whitespace() {
        assert_eq!(CommentId::try_from("   "), Err(CoreError::MissingId));
        assert!(matches!(
            CommentId::try_from("a b"),
            Err(CoreError::InvalidId(_))
        ));
    }

    #[test]
    fn rejects_overlong() {
        let raw = "x".repeat(MAX_COMMENT_ID_LEN + 1);
        assert!(CommentId::try_from(raw.as_str()).is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: CommentId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(ok.as_str(), "abc");
        assert!(serde_json::from_str::<CommentId>("\"\"").is_err());
    }
}
