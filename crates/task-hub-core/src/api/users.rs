//! User Endpoints

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::User;

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let users: Option<Vec<User>> = self.get("/users").await?;
        Ok(users.unwrap_or_default())
    }
}
