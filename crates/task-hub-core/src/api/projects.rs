//! Project Endpoints

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{EntityId, Project, ProjectInput};

impl ApiClient {
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let projects: Option<Vec<Project>> = self.get("/projects").await?;
        Ok(projects.unwrap_or_default())
    }

    pub async fn get_project(&self, id: &EntityId) -> Result<Project, ApiError> {
        self.get(&format!("/projects/{}", id)).await
    }

    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project, ApiError> {
        self.post("/projects", input).await
    }

    pub async fn update_project(&self, id: &EntityId, input: &ProjectInput) -> Result<Project, ApiError> {
        self.put(&format!("/projects/{}", id), input).await
    }

    pub async fn delete_project(&self, id: &EntityId) -> Result<(), ApiError> {
        self.delete(&format!("/projects/{}", id)).await
    }
}
