use crate::domain::comments::{Comment, sort_for_display};
use crate::domain::liked::LikedSet;
use crate::types::relative_time::time_ago;

pub const HIGHLIGHT_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallEntry {
    pub comment: Comment,
    pub liked: bool,
    pub age: String,
}

/// Everything a painter needs, already sorted and labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallView {
    pub entries: Vec<WallEntry>,
    pub highlights: [String; HIGHLIGHT_COUNT],
}

impl WallView {
    pub fn liked_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.liked)
            .map(|entry| entry.comment.id.as_str())
            .collect()
    }
}

pub fn build_view(comments: &[Comment], liked: &LikedSet, now_ms: i64) -> WallView {
    let mut sorted = comments.to_vec();
    sort_for_display(&mut sorted);
    let highlights = std::array::from_fn(|rank| {
        sorted
            .get(rank)
            .map(|comment| comment.text.clone())
            .unwrap_or_default()
    });
    let entries = sorted
        .into_iter()
        .map(|comment| WallEntry {
            liked: liked.contains(&comment.id),
            age: time_ago(comment.timestamp, now_ms),
            comment,
        })
        .collect();
    WallView {
        entries,
        highlights,
    }
}
