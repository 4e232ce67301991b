use std::collections::HashSet;

use wishwall_core::domain::comments::{Comment, LikeAction};
use wishwall_core::domain::liked::LikedSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Loaded,
    Error,
}

/// In-memory state of one wall, owned by its widget.
#[derive(Debug)]
pub struct WallState {
    pub phase: LoadPhase,
    pub comments: Vec<Comment>,
    pub liked: LikedSet,
    issued_loads: u64,
    pending_likes: HashSet<String>,
}

impl WallState {
    pub fn new(liked: LikedSet) -> Self {
        Self {
            phase: LoadPhase::Loading,
            comments: Vec::new(),
            liked,
            issued_loads: 0,
            pending_likes: HashSet::new(),
        }
    }

    /// Registers a new load and returns its sequence number.
    pub fn begin_load(&mut self) -> u64 {
        self.issued_loads += 1;
        self.issued_loads
    }

    /// Applies a finished load unless a newer one has been issued since.
    /// A failed load leaves an empty list. Returns whether the result was applied.
    pub fn finish_load(&mut self, seq: u64, result: Option<Vec<Comment>>) -> bool {
        if seq != self.issued_loads {
            return false;
        }
        match result {
            Some(comments) => {
                self.comments = comments;
                self.phase = LoadPhase::Loaded;
            }
            None => {
                self.comments.clear();
                self.phase = LoadPhase::Error;
            }
        }
        true
    }

    /// Marks a like toggle for `id` as in flight and returns its direction.
    /// `None` while an earlier toggle for the same id is still pending.
    pub fn begin_like(&mut self, id: &str) -> Option<LikeAction> {
        if !self.pending_likes.insert(id.to_string()) {
            return None;
        }
        if self.liked.contains(id) {
            Some(LikeAction::Unlike)
        } else {
            Some(LikeAction::Like)
        }
    }

    pub fn finish_like(&mut self, id: &str) {
        self.pending_likes.remove(id);
    }

    pub fn insert_local(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    pub fn remove_local(&mut self, id: &str) -> bool {
        let before = self.comments.len();
        self.comments.retain(|comment| comment.id != id);
        self.comments.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: &str) -> Comment {
        Comment {
            id: id.to_string(),
            name: "Anonymous".to_string(),
            text: "hi".to_string(),
            likes: 0,
            timestamp: 0,
        }
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut state = WallState::new(LikedSet::default());
        let older = state.begin_load();
        let newer = state.begin_load();
        assert!(state.finish_load(newer, Some(vec![comment("new")])));
        assert!(!state.finish_load(older, Some(vec![comment("old")])));
        assert_eq!(state.comments[0].id, "new");
        assert_eq!(state.phase, LoadPhase::Loaded);
    }

    #[test]
    fn failed_load_empties_list() {
        let mut state = WallState::new(LikedSet::default());
        let seq = state.begin_load();
        state.insert_local(comment("a"));
        assert!(state.finish_load(seq, None));
        assert!(state.comments.is_empty());
        assert_eq!(state.phase, LoadPhase::Error);
    }

    #[test]
    fn one_like_toggle_per_id_at_a_time() {
        let mut state = WallState::new(["b"].into_iter().collect());
        assert_eq!(state.begin_like("a"), Some(LikeAction::Like));
        assert_eq!(state.begin_like("a"), None);
        assert_eq!(state.begin_like("b"), Some(LikeAction::Unlike));
        state.finish_like("a");
        assert_eq!(state.begin_like("a"), Some(LikeAction::Like));
    }

    #[test]
    fn local_insert_and_rollback() {
        let mut state = WallState::new(LikedSet::default());
        state.insert_local(comment("a"));
        state.insert_local(comment("b"));
        assert_eq!(state.comments[0].id, "b");
        assert!(state.remove_local("b"));
        assert!(!state.remove_local("b"));
        assert_eq!(state.comments.len(), 1);
    }
}
