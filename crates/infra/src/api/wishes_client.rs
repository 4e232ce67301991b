use reqwest::{Response, StatusCode};
use thiserror::Error;

use wishwall_core::domain::comments::{
    AckResponse, Comment, CreateCommentRequest, LikeAction, LikeRequest,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("unexpected status: {0}")]
    Status(StatusCode),
}

/// Client for the wish wall JSON API rooted at `base_url`
/// (for example `http://127.0.0.1:5000/api`).
#[derive(Debug, Clone)]
pub struct WishApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl WishApiClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn list_comments(&self) -> Result<Vec<Comment>, ApiError> {
        let response = self.http.get(self.endpoint("comments")).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(response.json().await?)
    }

    pub async fn create_comment(&self, request: &CreateCommentRequest) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint("comments"))
            .json(request)
            .send()
            .await?;
        read_ack(response).await
    }

    pub async fn set_like(&self, id: &str, action: LikeAction) -> Result<(), ApiError> {
        let body = LikeRequest {
            id: Some(id.to_string()),
            action,
        };
        let response = self
            .http
            .post(self.endpoint("like"))
            .json(&body)
            .send()
            .await?;
        read_ack(response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

async fn read_ack(response: Response) -> Result<(), ApiError> {
    if !response.status().is_success() {
        return Err(rejection(response).await);
    }
    let ack: AckResponse = response.json().await?;
    if ack.ok {
        Ok(())
    } else {
        Err(ApiError::Rejected(
            ack.error.unwrap_or_else(|| "unknown error".to_string()),
        ))
    }
}

async fn rejection(response: Response) -> ApiError {
    let status = response.status();
    match response.json::<AckResponse>().await {
        Ok(AckResponse {
            error: Some(error), ..
        }) => ApiError::Rejected(error),
        _ => ApiError::Status(status),
    }
}

#[cfg(test)]
mod tests {
    use super::WishApiClient;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = WishApiClient::new(reqwest::Client::new(), "http://localhost:5000/api/");
        assert_eq!(client.base_url, "http://localhost:5000/api");
        assert_eq!(client.endpoint("like"), "http://localhost:5000/api/like");
    }
}
