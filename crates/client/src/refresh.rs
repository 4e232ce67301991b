use std::future::Future;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::api::CommentsApi;
use crate::error::ClientError;
use crate::render::Surface;
use crate::storage::LocalStorage;
use crate::widget::Widget;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Runs `job` every `period`, first one `period` from now. Failures are
/// logged and the next tick runs as usual.
pub async fn run_interval<F, Fut>(name: &'static str, period: Duration, mut job: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), ClientError>>,
{
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if let Err(err) = job().await {
            warn!(error = %err, job = name, "job execution failed");
        }
    }
}

/// Repaints the wall every `period` so relative time labels stay current.
pub async fn refresh_labels<A, S, P>(widget: &Widget<A, S, P>, period: Duration)
where
    A: CommentsApi,
    S: LocalStorage,
    P: Surface,
{
    run_interval("wall_labels", period, move || async move {
        widget.render().await;
        debug!("wall labels refreshed");
        Ok(())
    })
    .await
}

/// Reloads the comment list every `period`.
pub async fn reload_comments<A, S, P>(widget: &Widget<A, S, P>, period: Duration)
where
    A: CommentsApi,
    S: LocalStorage,
    P: Surface,
{
    run_interval("wall_reload", period, move || async move {
        widget.load().await;
        Ok(())
    })
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::{refresh_labels, reload_comments, run_interval};
    use crate::api::CommentsApi;
    use crate::error::ClientError;
    use crate::render::Surface;
    use crate::storage::MemoryStorage;
    use crate::widget::Widget;
    use wishwall_core::domain::comments::{Comment, CreateCommentRequest, LikeAction};
    use wishwall_core::error::CoreError;
    use wishwall_core::types::relative_time::now_millis;
    use wishwall_infra::api::ApiError;

    struct StaticApi {
        comments: Vec<Comment>,
        lists: Arc<AtomicUsize>,
    }

    impl CommentsApi for StaticApi {
        async fn list_comments(&self) -> Result<Vec<Comment>, ApiError> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            Ok(self.comments.clone())
        }

        async fn create_comment(&self, _request: &CreateCommentRequest) -> Result<(), ApiError> {
            Ok(())
        }

        async fn set_like(&self, _id: &str, _action: LikeAction) -> Result<(), ApiError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Frames(Mutex<Vec<String>>);

    impl Surface for Frames {
        fn paint(&self, html: &str) -> std::io::Result<()> {
            self.0.lock().unwrap().push(html.to_string());
            Ok(())
        }
    }

    fn wall() -> (Widget<StaticApi, MemoryStorage, Frames>, Arc<AtomicUsize>) {
        let lists = Arc::new(AtomicUsize::new(0));
        let api = StaticApi {
            comments: vec![Comment {
                id: "a".to_string(),
                name: "Noel".to_string(),
                text: "Peace on earth".to_string(),
                likes: 0,
                timestamp: now_millis() - 5 * 60_000,
            }],
            lists: lists.clone(),
        };
        (Widget::new(api, MemoryStorage::default(), Frames::default()), lists)
    }

    #[tokio::test]
    async fn errors_do_not_stop_the_loop() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let job = run_interval("test", Duration::from_millis(20), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ClientError::Validation(CoreError::EmptyText))
            }
        });
        let _ = tokio::time::timeout(Duration::from_millis(110), job).await;
        assert!(runs.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn label_tick_repaints_each_period() {
        let (w, lists) = wall();
        w.load().await;
        assert_eq!(w.surface().0.lock().unwrap().len(), 1);

        let period = Duration::from_secs(60);
        let _ = tokio::time::timeout(period * 3 + period / 2, refresh_labels(&w, period)).await;

        let frames = w.surface().0.lock().unwrap();
        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|frame| frame.contains("5 minutes ago")));
        assert_eq!(lists.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reload_tick_fetches_again() {
        let (w, lists) = wall();
        let period = Duration::from_secs(300);
        let _ = tokio::time::timeout(period * 2 + period / 2, reload_comments(&w, period)).await;
        assert_eq!(lists.load(Ordering::SeqCst), 2);
        assert_eq!(w.comments().await.len(), 1);
    }
}
