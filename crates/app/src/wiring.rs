use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;

use crate::config::AppConfig;
use crate::state::AppState;
use wishwall_client::render::FileSurface;
use wishwall_client::storage::FileStorage;
use wishwall_client::Widget;
use wishwall_infra::api::WishApiClient;
use wishwall_infra::db::{connect_lazy, DbPoolError};

pub type WallWidget = Widget<WishApiClient, FileStorage, FileSurface>;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("db error: {0}")]
    Db(#[from] DbPoolError),
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub fn build_state(config: AppConfig) -> Result<AppState, WiringError> {
    let db = connect_lazy(&config.database_url)?;
    Ok(AppState {
        config: Arc::new(config),
        db,
    })
}

pub fn build_widget(config: &AppConfig) -> Result<WallWidget, WiringError> {
    let client = Client::builder().timeout(config.request_timeout).build()?;
    let api = WishApiClient::new(client, &config.api_base);
    Ok(Widget::new(
        api,
        FileStorage::new(&config.liked_store_path),
        FileSurface::new(&config.wall_output_path),
    ))
}
