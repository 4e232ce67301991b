use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Ids of the comments the local visitor has liked. Serializes as a plain
/// JSON array of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikedSet(BTreeSet<String>);

impl LikedSet {
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn insert(&mut self, id: &str) -> bool {
        self.0.insert(id.to_string())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LikedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        LikedSet(iter.into_iter().map(Into::into).collect())
    }
}
