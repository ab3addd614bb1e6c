//! Form Definitions
//!
//! Initial values and validators for each data-entry form, and conversion of
//! submitted values into request bodies.

use std::sync::OnceLock;

use regex::Regex;

use crate::form::{FormController, FormValues, ValidateOn};
use crate::models::{
    CommentInput, Credentials, Project, ProjectInput, Task, TaskInput, User, DEFAULT_PRIORITY, DEFAULT_STATUS,
};

pub const PROFILE_NAME_MAX: usize = 255;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

// ========================
// Validators
// ========================

pub fn validate_email(value: &str) -> String {
    if value.is_empty() {
        return "Email is required".to_string();
    }
    if !email_regex().is_match(value) {
        return "Please enter a valid email".to_string();
    }
    String::new()
}

pub fn validate_login_password(value: &str) -> String {
    if value.is_empty() {
        return "Password is required".to_string();
    }
    String::new()
}

pub fn validate_new_password(value: &str) -> String {
    if value.is_empty() {
        return "Password is required".to_string();
    }
    if value.chars().count() < 8 {
        return "Password must be at least 8 characters".to_string();
    }
    String::new()
}

pub fn validate_password_confirmation(value: &str) -> String {
    if value.is_empty() {
        return "Please confirm your password".to_string();
    }
    String::new()
}

pub fn validate_project_name(value: &str) -> String {
    if value.is_empty() {
        return "Project name is required".to_string();
    }
    if value.chars().count() < 3 {
        return "Project name must be at least 3 characters".to_string();
    }
    String::new()
}

pub fn validate_task_title(value: &str) -> String {
    if value.is_empty() {
        return "Task title is required".to_string();
    }
    if value.chars().count() < 3 {
        return "Task title must be at least 3 characters".to_string();
    }
    String::new()
}

pub fn validate_comment(value: &str) -> String {
    if value.is_empty() {
        return "Comment cannot be empty".to_string();
    }
    String::new()
}

pub fn validate_profile_name(value: &str) -> String {
    if value.chars().count() > PROFILE_NAME_MAX {
        return format!("Name must be at most {} characters", PROFILE_NAME_MAX);
    }
    String::new()
}

// ========================
// Forms
// ========================

pub fn login_form() -> FormController {
    FormController::new([("email", ""), ("password", "")])
        .with_validator("email", validate_email)
        .with_validator("password", validate_login_password)
}

pub fn signup_form() -> FormController {
    FormController::new([("email", ""), ("password", ""), ("confirmPassword", "")])
        .with_validator("email", validate_email)
        .with_validator("password", validate_new_password)
        .with_validator("confirmPassword", validate_password_confirmation)
}

pub fn project_form(project: Option<&Project>) -> FormController {
    let name = project.map(|p| p.name.clone()).unwrap_or_default();
    let description = project.and_then(|p| p.description.clone()).unwrap_or_default();
    FormController::new([("name", name), ("description", description)]).with_validator("name", validate_project_name)
}

pub fn task_form(task: Option<&Task>) -> FormController {
    let text = |f: fn(&Task) -> Option<String>| task.and_then(f).unwrap_or_default();
    FormController::new([
        ("title", text(|t| Some(t.title.clone()))),
        ("description", text(|t| t.description.clone())),
        ("status", task.map(|t| t.status.clone()).filter(|s| !s.is_empty()).unwrap_or_else(|| DEFAULT_STATUS.to_string())),
        ("priority", task.map(|t| t.priority.clone()).filter(|p| !p.is_empty()).unwrap_or_else(|| DEFAULT_PRIORITY.to_string())),
        ("assignee_id", text(|t| t.assignee_id.as_ref().map(|id| id.to_string()))),
        ("due_date", text(|t| t.due_date.as_deref().map(crate::format::date_input_value))),
    ])
    .with_validator("title", validate_task_title)
}

/// The comment box re-validates on every edit.
pub fn comment_form() -> FormController {
    FormController::new([("content", "")])
        .with_validator("content", validate_comment)
        .validate_on(ValidateOn::Change)
}

pub fn profile_form(user: Option<&User>) -> FormController {
    let name = user.and_then(|u| u.name.clone()).unwrap_or_default();
    FormController::new([("name", name)]).with_validator("name", validate_profile_name)
}

// ========================
// Submitted values -> request bodies
// ========================

fn field(values: &FormValues, name: &str) -> String {
    values.get(name).cloned().unwrap_or_default()
}

fn optional(values: &FormValues, name: &str) -> Option<String> {
    values.get(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn credentials(values: &FormValues) -> Credentials {
    Credentials {
        email: field(values, "email"),
        password: field(values, "password"),
    }
}

/// Checked in the signup submit callback, before any request.
pub fn passwords_match(values: &FormValues) -> Result<(), String> {
    if field(values, "password") != field(values, "confirmPassword") {
        return Err("Passwords do not match".to_string());
    }
    Ok(())
}

pub fn project_input(values: &FormValues) -> ProjectInput {
    ProjectInput {
        name: field(values, "name"),
        description: field(values, "description"),
    }
}

pub fn task_input(values: &FormValues) -> TaskInput {
    TaskInput {
        title: field(values, "title"),
        description: field(values, "description"),
        status: optional(values, "status").unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        priority: optional(values, "priority").unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
        assignee_id: optional(values, "assignee_id"),
        due_date: optional(values, "due_date"),
    }
}

pub fn comment_input(values: &FormValues) -> CommentInput {
    CommentInput {
        content: field(values, "content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email(""), "Email is required");
        assert_eq!(validate_email("user@example"), "Please enter a valid email");
        assert_eq!(validate_email("a b@c.d"), "Please enter a valid email");
        assert_eq!(validate_email("user@example.com"), "");
    }

    #[test]
    fn test_length_rules() {
        assert_eq!(validate_new_password("short"), "Password must be at least 8 characters");
        assert_eq!(validate_new_password("longenough"), "");
        assert_eq!(validate_task_title("ab"), "Task title must be at least 3 characters");
        assert_eq!(validate_project_name(""), "Project name is required");
        assert_eq!(validate_profile_name(&"x".repeat(256)), "Name must be at most 255 characters");
        assert_eq!(validate_profile_name(""), "");
    }

    #[test]
    fn test_task_form_defaults() {
        let form = task_form(None);
        assert_eq!(form.value("status"), "OPEN");
        assert_eq!(form.value("priority"), "MEDIUM");
        assert_eq!(form.value("assignee_id"), "");
    }

    #[test]
    fn test_task_form_prefills_from_task() {
        let task: Task = serde_json::from_value(json!({
            "id": 4,
            "title": "Fix login",
            "status": "IN_PROGRESS",
            "priority": "HIGH",
            "assignee_id": 9,
            "due_date": "2025-03-01T00:00:00Z"
        }))
        .unwrap();
        let form = task_form(Some(&task));
        assert_eq!(form.value("title"), "Fix login");
        assert_eq!(form.value("status"), "IN_PROGRESS");
        assert_eq!(form.value("assignee_id"), "9");
        assert_eq!(form.value("due_date"), "2025-03-01");
    }

    #[test]
    fn test_task_input_drops_blank_optionals() {
        let mut form = task_form(None);
        form.handle_change("title", "Write tests");
        let input = task_input(form.values());
        assert_eq!(input.title, "Write tests");
        assert!(input.assignee_id.is_none());
        assert!(input.due_date.is_none());
        assert_eq!(input.status, "OPEN");
    }

    #[test]
    fn test_passwords_match() {
        let mut form = signup_form();
        form.set_values([("password", "password1"), ("confirmPassword", "password2")]);
        assert_eq!(passwords_match(form.values()), Err("Passwords do not match".to_string()));
        form.handle_change("confirmPassword", "password1");
        assert!(passwords_match(form.values()).is_ok());
    }
}
