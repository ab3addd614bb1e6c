//! Comment Endpoints

use crate::error::ApiError;
use crate::http::{encode_query, ApiClient};
use crate::models::{Comment, CommentInput, EntityId};

impl ApiClient {
    pub async fn list_task_comments(&self, task_id: &EntityId) -> Result<Vec<Comment>, ApiError> {
        let comments: Option<Vec<Comment>> = self.get(&format!("/tasks/{}/comments", task_id)).await?;
        Ok(comments.unwrap_or_default())
    }

    /// Newest comments across the user's projects, 1-based pages.
    pub async fn recent_comments(&self, page: u32, page_size: u32) -> Result<Vec<Comment>, ApiError> {
        let query = encode_query(&[("page", page.max(1).to_string()), ("page_size", page_size.to_string())]);
        let comments: Option<Vec<Comment>> = self.get(&format!("/comments/recent{}", query)).await?;
        Ok(comments.unwrap_or_default())
    }

    pub async fn create_comment(&self, task_id: &EntityId, input: &CommentInput) -> Result<Comment, ApiError> {
        self.post(&format!("/tasks/{}/comments", task_id), input).await
    }

    pub async fn update_comment(&self, id: &EntityId, input: &CommentInput) -> Result<Comment, ApiError> {
        self.put(&format!("/comments/{}", id), input).await
    }

    pub async fn delete_comment(&self, id: &EntityId) -> Result<(), ApiError> {
        self.delete(&format!("/comments/{}", id)).await
    }
}
