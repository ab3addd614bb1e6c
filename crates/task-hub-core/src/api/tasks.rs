//! Task Endpoints

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{encode_query, ApiClient};
use crate::models::{EntityId, Task, TaskInput, TaskPatch};

/// Server-side list filters. Unset filters are sent as empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl TaskFilter {
    fn query(&self) -> String {
        encode_query(&[
            ("status", self.status.clone().unwrap_or_default()),
            ("priority", self.priority.clone().unwrap_or_default()),
        ])
    }
}

/// Single-field edit sent through one of the `PATCH /tasks/:id/*` routes.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskChange {
    Status(String),
    Priority(String),
    /// User id as the backend expects it, a string. `None` unassigns.
    Assignee(Option<String>),
}

impl TaskChange {
    /// Assignee choice from a select, where "" means unassigned.
    pub fn assignee(raw: &str) -> Self {
        let raw = raw.trim();
        Self::Assignee((!raw.is_empty()).then(|| raw.to_string()))
    }

    /// The task as it reads once the server has accepted the change.
    pub fn apply(self, task: Task) -> Task {
        match self {
            Self::Status(status) => task.with_status(&status),
            Self::Priority(priority) => task.with_priority(&priority),
            Self::Assignee(assignee_id) => task.with_assignee(assignee_id.as_deref().and_then(EntityId::parse)),
        }
    }
}

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
}

#[derive(Serialize)]
struct PriorityBody<'a> {
    priority: &'a str,
}

#[derive(Serialize)]
struct AssigneeBody<'a> {
    assignee_id: Option<&'a str>,
}

#[derive(Serialize)]
struct AssignBody {
    user_id: String,
}

impl ApiClient {
    pub async fn get_task(&self, id: &EntityId) -> Result<Task, ApiError> {
        self.get(&format!("/tasks/{}", id)).await
    }

    pub async fn list_project_tasks(&self, project_id: &EntityId, filter: &TaskFilter) -> Result<Vec<Task>, ApiError> {
        let tasks: Option<Vec<Task>> = self
            .get(&format!("/projects/{}/tasks{}", project_id, filter.query()))
            .await?;
        Ok(tasks.unwrap_or_default())
    }

    /// Tasks assigned to the signed-in user.
    pub async fn list_assigned_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ApiError> {
        let tasks: Option<Vec<Task>> = self.get(&format!("/tasks/assigned{}", filter.query())).await?;
        Ok(tasks.unwrap_or_default())
    }

    pub async fn create_task(&self, project_id: &EntityId, input: &TaskInput) -> Result<Task, ApiError> {
        self.post(&format!("/projects/{}/tasks", project_id), input).await
    }

    pub async fn update_task(&self, id: &EntityId, input: &TaskInput) -> Result<Task, ApiError> {
        self.put(&format!("/tasks/{}", id), input).await
    }

    /// Partial update of title, description or due date.
    pub async fn patch_task_fields(&self, id: &EntityId, patch: &TaskPatch) -> Result<Task, ApiError> {
        self.put(&format!("/tasks/{}", id), patch).await
    }

    pub async fn update_task_status(&self, id: &EntityId, status: &str) -> Result<(), ApiError> {
        self.patch(&format!("/tasks/{}/status", id), &StatusBody { status }).await
    }

    pub async fn update_task_priority(&self, id: &EntityId, priority: &str) -> Result<(), ApiError> {
        self.patch(&format!("/tasks/{}/priority", id), &PriorityBody { priority }).await
    }

    /// `None` unassigns the task.
    pub async fn update_task_assignee(&self, id: &EntityId, assignee_id: Option<&str>) -> Result<(), ApiError> {
        self.patch(&format!("/tasks/{}/assignee", id), &AssigneeBody { assignee_id }).await
    }

    pub async fn change_task(&self, id: &EntityId, change: &TaskChange) -> Result<(), ApiError> {
        match change {
            TaskChange::Status(status) => self.update_task_status(id, status).await,
            TaskChange::Priority(priority) => self.update_task_priority(id, priority).await,
            TaskChange::Assignee(assignee_id) => self.update_task_assignee(id, assignee_id.as_deref()).await,
        }
    }

    pub async fn assign_task(&self, id: &EntityId, user_id: &EntityId) -> Result<Task, ApiError> {
        self.post(&format!("/tasks/{}/assign", id), &AssignBody { user_id: user_id.to_string() }).await
    }

    pub async fn delete_task(&self, id: &EntityId) -> Result<(), ApiError> {
        self.delete(&format!("/tasks/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task() -> Task {
        serde_json::from_value(json!({
            "id": 4,
            "title": "Ship it",
            "status": "OPEN",
            "priority": "LOW",
            "assignee_id": 2,
            "assignee": {"id": 2, "email": "a@b.co"}
        }))
        .unwrap()
    }

    #[test]
    fn test_blank_assignee_unassigns() {
        assert_eq!(TaskChange::assignee(""), TaskChange::Assignee(None));
        assert_eq!(TaskChange::assignee("7"), TaskChange::Assignee(Some("7".into())));
    }

    #[test]
    fn test_change_applies_locally() {
        let done = TaskChange::Status("DONE".into()).apply(task());
        assert_eq!(done.status, "DONE");
        assert_eq!(done.priority, "LOW");

        let moved = TaskChange::assignee("9").apply(task());
        assert_eq!(moved.assignee_id, Some(EntityId::Int(9)));

        let moved = TaskChange::Assignee(None).apply(task());
        assert_eq!(moved.assignee_id, None);
        assert!(!moved.extra.contains_key("assignee"));
    }

    #[test]
    fn test_assignee_ids_serialize_as_strings() {
        let body = serde_json::to_value(AssigneeBody { assignee_id: Some("7") }).unwrap();
        assert_eq!(body, json!({"assignee_id": "7"}));
        let body = serde_json::to_value(AssigneeBody { assignee_id: None }).unwrap();
        assert_eq!(body, json!({"assignee_id": null}));
        let body = serde_json::to_value(AssignBody { user_id: EntityId::Int(7).to_string() }).unwrap();
        assert_eq!(body, json!({"user_id": "7"}));
    }

    #[test]
    fn test_filter_query_keeps_empty_params() {
        let filter = TaskFilter {
            status: Some("DONE".into()),
            priority: None,
        };
        assert_eq!(filter.query(), "?status=DONE&priority=");
    }
}
