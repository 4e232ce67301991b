use tokio::signal;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::wiring::WallWidget;
use wishwall_client::refresh::{refresh_labels, reload_comments};
use wishwall_client::ClientError;
use wishwall_core::domain::comments::LikeAction;

/// Paints the wall once, or keeps it current until interrupted.
pub async fn wall(widget: &WallWidget, config: &AppConfig, watch: bool) {
    widget.load().await;
    info!(output = %widget.surface().path().display(), "wall painted");
    if !watch {
        return;
    }
    info!(
        refresh_secs = config.refresh_interval.as_secs(),
        reload_secs = config.reload_interval.as_secs(),
        "watching wall"
    );
    tokio::select! {
        _ = refresh_labels(widget, config.refresh_interval) => {}
        _ = reload_comments(widget, config.reload_interval) => {}
        _ = shutdown_signal() => {
            info!("shutdown signal received");
        }
    }
}

pub async fn post(
    widget: &WallWidget,
    name: &str,
    text: &str,
    anonymous: bool,
) -> Result<(), ClientError> {
    widget.load().await;
    let comment = widget.add_comment(name, text, anonymous).await?;
    println!("{}", comment.id);
    Ok(())
}

pub async fn like(widget: &WallWidget, id: &str) -> Result<(), ClientError> {
    widget.load().await;
    match widget.handle_like(id).await? {
        LikeAction::Like => println!("liked {id}"),
        LikeAction::Unlike => println!("unliked {id}"),
    }
    Ok(())
}

pub async fn clear_likes(widget: &WallWidget) -> Result<(), ClientError> {
    widget.load().await;
    widget.clear_likes().await
}

pub async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(error = %err, "failed to install ctrl-c handler");
    }
}
