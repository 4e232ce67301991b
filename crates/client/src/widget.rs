use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::CommentsApi;
use crate::error::ClientError;
use crate::ids::generate_comment_id;
use crate::render::{wall_page, Surface};
use crate::state::{LoadPhase, WallState};
use crate::storage::{LikedStore, LocalStorage};
use wishwall_core::domain::comments::{
    normalize_name, normalize_text, Comment, CreateCommentRequest, LikeAction, ANONYMOUS_NAME,
};
use wishwall_core::domain::liked::LikedSet;
use wishwall_core::domain::wall::{build_view, WallView};
use wishwall_core::types::comment_id::CommentId;
use wishwall_core::types::relative_time::now_millis;

/// One wish wall as seen by a single visitor: the remote comments, the
/// visitor's liked-set and the surface the wall is painted on.
pub struct Widget<A, S, P> {
    api: A,
    liked_store: LikedStore<S>,
    surface: P,
    state: Mutex<WallState>,
}

impl<A, S, P> Widget<A, S, P>
where
    A: CommentsApi,
    S: LocalStorage,
    P: Surface,
{
    /// The liked-set is read from local storage once, here.
    pub fn new(api: A, storage: S, surface: P) -> Self {
        let liked_store = LikedStore::new(storage);
        let liked = liked_store.read();
        debug!(liked = liked.len(), "liked set restored");
        Self {
            api,
            liked_store,
            surface,
            state: Mutex::new(WallState::new(liked)),
        }
    }

    pub async fn phase(&self) -> LoadPhase {
        self.state.lock().await.phase
    }

    pub async fn comments(&self) -> Vec<Comment> {
        self.state.lock().await.comments.clone()
    }

    pub async fn liked(&self) -> LikedSet {
        self.state.lock().await.liked.clone()
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    /// Replaces the local list with the remote one and repaints. A failed
    /// fetch leaves an empty wall; a result overtaken by a newer load is dropped.
    pub async fn load(&self) {
        let seq = self.state.lock().await.begin_load();
        let result = match self.api.list_comments().await {
            Ok(comments) => Some(comments),
            Err(err) => {
                warn!(error = %err, "failed to load comments");
                None
            }
        };
        let applied = self.state.lock().await.finish_load(seq, result);
        if applied {
            self.render().await;
        } else {
            debug!(seq, "stale comment load discarded");
        }
    }

    /// Shows the wish immediately, then submits it. A rejected or failed
    /// submit takes the wish back off the wall.
    pub async fn add_comment(
        &self,
        name: &str,
        text: &str,
        anonymous: bool,
    ) -> Result<Comment, ClientError> {
        let text = normalize_text(Some(text))?;
        let name = if anonymous {
            ANONYMOUS_NAME.to_string()
        } else {
            normalize_name(Some(name))?
        };
        let comment = Comment {
            id: generate_comment_id(),
            name,
            text,
            likes: 0,
            timestamp: now_millis(),
        };
        self.state.lock().await.insert_local(comment.clone());
        self.render().await;

        let request = CreateCommentRequest {
            id: Some(comment.id.clone()),
            name: Some(comment.name.clone()),
            text: Some(comment.text.clone()),
            likes: None,
            timestamp: Some(comment.timestamp),
        };
        match self.api.create_comment(&request).await {
            Ok(()) => {
                info!(id = %comment.id, "wish submitted");
                Ok(comment)
            }
            Err(err) => {
                warn!(id = %comment.id, error = %err, "wish submit failed; rolling back");
                self.state.lock().await.remove_local(&comment.id);
                self.render().await;
                Err(err.into())
            }
        }
    }

    /// Likes `id`, or unlikes it when the visitor already liked it. The
    /// liked-set only changes once the store accepted the change and the new
    /// set is persisted. A second toggle for an id still in flight is refused.
    pub async fn handle_like(&self, id: &str) -> Result<LikeAction, ClientError> {
        let id = CommentId::try_from(id)?;
        let Some(action) = self.state.lock().await.begin_like(id.as_str()) else {
            debug!(id = %id, "like toggle already in flight");
            return Err(ClientError::LikeInFlight(id.to_string()));
        };
        let outcome = self.send_like(&id, action).await;
        self.state.lock().await.finish_like(id.as_str());
        match outcome {
            Ok(()) => {
                info!(id = %id, action = action.as_str(), "like toggled");
                self.load().await;
                Ok(action)
            }
            Err(err @ ClientError::Storage(_)) => {
                self.load().await;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    async fn send_like(&self, id: &CommentId, action: LikeAction) -> Result<(), ClientError> {
        if let Err(err) = self.api.set_like(id.as_str(), action).await {
            warn!(id = %id, action = action.as_str(), error = %err, "like request failed");
            return Err(err.into());
        }
        let mut state = self.state.lock().await;
        let mut liked = state.liked.clone();
        match action {
            LikeAction::Like => liked.insert(id.as_str()),
            LikeAction::Unlike => liked.remove(id.as_str()),
        };
        if let Err(err) = self.liked_store.write(&liked) {
            warn!(id = %id, error = %err, "failed to persist liked set");
            return Err(err.into());
        }
        state.liked = liked;
        Ok(())
    }

    /// Forgets every like of this visitor, in storage first, then locally.
    pub async fn clear_likes(&self) -> Result<(), ClientError> {
        {
            let mut state = self.state.lock().await;
            if let Err(err) = self.liked_store.clear() {
                warn!(error = %err, "failed to clear liked set");
                return Err(err.into());
            }
            state.liked.clear();
        }
        info!("local likes cleared");
        self.render().await;
        Ok(())
    }

    /// Rebuilds the view from current state and paints it.
    pub async fn render(&self) -> WallView {
        let view = {
            let state = self.state.lock().await;
            build_view(&state.comments, &state.liked, now_millis())
        };
        let html = wall_page(&view).into_string();
        if let Err(err) = self.surface.paint(&html) {
            warn!(error = %err, "failed to paint wall");
        }
        view
    }
}
