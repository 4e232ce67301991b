use std::future::Future;

use wishwall_core::domain::comments::{Comment, CreateCommentRequest, LikeAction};
use wishwall_infra::api::{ApiError, WishApiClient};

/// Remote side of the wall as seen by the widget.
pub trait CommentsApi: Send + Sync {
    fn list_comments(&self) -> impl Future<Output = Result<Vec<Comment>, ApiError>> + Send;

    fn create_comment(
        &self,
        request: &CreateCommentRequest,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn set_like(
        &self,
        id: &str,
        action: LikeAction,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl CommentsApi for WishApiClient {
    async fn list_comments(&self) -> Result<Vec<Comment>, ApiError> {
        WishApiClient::list_comments(self).await
    }

    async fn create_comment(&self, request: &CreateCommentRequest) -> Result<(), ApiError> {
        WishApiClient::create_comment(self, request).await
    }

    async fn set_like(&self, id: &str, action: LikeAction) -> Result<(), ApiError> {
        WishApiClient::set_like(self, id, action).await
    }
}
