//! Domain Records
//!
//! Data structures matching the backend's JSON. Only the fields the client
//! reads are named; everything else is kept in `extra` and sent back untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Task status values accepted by the backend
pub const TASK_STATUSES: [&str; 3] = ["OPEN", "IN_PROGRESS", "DONE"];

/// Task priority values accepted by the backend
pub const TASK_PRIORITIES: [&str; 3] = ["LOW", "MEDIUM", "HIGH"];

pub const DEFAULT_STATUS: &str = "OPEN";
pub const DEFAULT_PRIORITY: &str = "MEDIUM";

/// Record identifier. The backend mixes numeric and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl EntityId {
    /// Parse a path segment or `<select>` value.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.parse::<i64>() {
            Ok(n) => EntityId::Int(n),
            Err(_) => EntityId::Text(raw.to_string()),
        })
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Int(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Name when set, otherwise the local part of the email.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.email.split('@').next().unwrap_or_default().to_string(),
        }
    }

    /// Single uppercase letter for avatars.
    pub fn initial(&self) -> String {
        self.email.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,
    #[serde(default)]
    pub project_id: Option<EntityId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub assignee_id: Option<EntityId>,
    #[serde(default)]
    pub assigned_by_id: Option<EntityId>,
    #[serde(default)]
    pub created_by_id: Option<EntityId>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn with_priority(mut self, priority: &str) -> Self {
        self.priority = priority.to_string();
        self
    }

    /// Embedded `assignee` objects go stale with the id, so they are dropped.
    pub fn with_assignee(mut self, assignee_id: Option<EntityId>) -> Self {
        self.assignee_id = assignee_id;
        self.extra.remove("assignee");
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    #[serde(default)]
    pub task_id: Option<EntityId>,
    #[serde(default)]
    pub user_id: Option<EntityId>,
    pub content: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Comment {
    pub fn author(&self) -> &str {
        self.author_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.author_email.as_deref())
            .unwrap_or("Unknown")
    }
}

/// Records addressed by id in local lists.
pub trait Identified {
    fn id(&self) -> &EntityId;
}

impl Identified for User {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Identified for Project {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Identified for Task {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Identified for Comment {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Replace the record with the same id. Returns false when absent.
pub fn replace_by_id<T: Identified>(list: &mut [T], updated: T) -> bool {
    match list.iter_mut().find(|item| item.id() == updated.id()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

pub fn remove_by_id<T: Identified>(list: &mut Vec<T>, id: &EntityId) {
    list.retain(|item| item.id() != id);
}

/// Apply `patch` to the record with the given id.
pub fn patch_by_id<T: Identified + Clone>(list: &mut [T], id: &EntityId, patch: impl FnOnce(T) -> T) -> bool {
    match list.iter_mut().find(|item| item.id() == id) {
        Some(slot) => {
            *slot = patch(slot.clone());
            true
        }
        None => false,
    }
}

// ========================
// Request Bodies
// ========================

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/login` and `POST /auth/signup`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectInput {
    pub name: String,
    pub description: String,
}

/// Full task body for create and edit forms
#[derive(Debug, Clone, Serialize)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub assignee_id: Option<String>,
    pub due_date: Option<String>,
}

/// Partial task body for `PUT /tasks/:id`
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl TaskPatch {
    /// The task with the patched fields written over it. A blank due date clears it.
    pub fn apply(&self, mut task: Task) -> Task {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(due) = &self.due_date {
            task.due_date = Some(due.clone()).filter(|d| !d.is_empty());
        }
        task
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentInput {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task(id: i64, status: &str) -> Task {
        serde_json::from_value(json!({
            "id": id,
            "project_id": "p1",
            "title": format!("Task {}", id),
            "status": status,
            "priority": "LOW",
            "assignee": {"id": 3, "email": "a@b.c"}
        }))
        .unwrap()
    }

    #[test]
    fn test_entity_id_accepts_numbers_and_strings() {
        let user: User = serde_json::from_value(json!({"id": 1, "email": "a@b.c"})).unwrap();
        assert_eq!(user.id, EntityId::Int(1));

        let project: Project =
            serde_json::from_value(json!({"id": "9f1c", "name": "Web", "owner": "x"})).unwrap();
        assert_eq!(project.id, EntityId::Text("9f1c".into()));
        assert_eq!(project.extra.get("owner"), Some(&json!("x")));
    }

    #[test]
    fn test_entity_id_parse() {
        assert_eq!(EntityId::parse("42"), Some(EntityId::Int(42)));
        assert_eq!(EntityId::parse("abc-1"), Some(EntityId::Text("abc-1".into())));
        assert_eq!(EntityId::parse("  "), None);
        assert_eq!(EntityId::Int(42).to_string(), "42");
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let t = task(1, "OPEN");
        let back = serde_json::to_value(&t).unwrap();
        assert_eq!(back["assignee"]["email"], "a@b.c");
    }

    #[test]
    fn test_patch_by_id_updates_only_target() {
        let mut tasks = vec![task(1, "OPEN"), task(2, "OPEN")];
        let hit = patch_by_id(&mut tasks, &EntityId::Int(2), |t| t.with_status("DONE"));
        assert!(hit);
        assert_eq!(tasks[0].status, "OPEN");
        assert_eq!(tasks[1].status, "DONE");
        assert!(!patch_by_id(&mut tasks, &EntityId::Int(9), |t| t));
    }

    #[test]
    fn test_with_assignee_drops_embedded_user() {
        let t = task(1, "OPEN").with_assignee(Some(EntityId::Int(5)));
        assert_eq!(t.assignee_id, Some(EntityId::Int(5)));
        assert!(!t.extra.contains_key("assignee"));
    }

    #[test]
    fn test_replace_and_remove() {
        let mut tasks = vec![task(1, "OPEN"), task(2, "OPEN")];
        assert!(replace_by_id(&mut tasks, task(1, "DONE")));
        assert_eq!(tasks[0].status, "DONE");
        remove_by_id(&mut tasks, &EntityId::Int(1));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, EntityId::Int(2));
    }

    #[test]
    fn test_user_display_name() {
        let mut user: User = serde_json::from_value(json!({"id": 1, "email": "jane@corp.io"})).unwrap();
        assert_eq!(user.display_name(), "jane");
        assert_eq!(user.initial(), "J");
        user.name = Some("Jane Doe".into());
        assert_eq!(user.display_name(), "Jane Doe");
    }

    #[test]
    fn test_task_patch_touches_only_given_fields() {
        let mut t = task(1, "OPEN");
        t.due_date = Some("2025-03-01".into());

        let renamed = TaskPatch {
            title: Some("Renamed".into()),
            ..Default::default()
        }
        .apply(t.clone());
        assert_eq!(renamed.title, "Renamed");
        assert_eq!(renamed.due_date.as_deref(), Some("2025-03-01"));

        let cleared = TaskPatch {
            due_date: Some(String::new()),
            ..Default::default()
        }
        .apply(t);
        assert_eq!(cleared.due_date, None);
        assert_eq!(cleared.title, "Task 1");
    }
}
