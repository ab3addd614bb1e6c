//! UI Components
//!
//! Reusable Leptos components.

mod badges;
mod comments;
mod feedback;
mod field;
mod inline_select;
mod list_controls;
mod modal;
mod navbar;
mod project_form;
mod task_form;

pub use badges::{PriorityBadge, StatusBadge};
pub use comments::{CommentForm, CommentList};
pub use feedback::{ErrorMessage, Loading};
pub use field::{vocabulary_options, SelectField, TextAreaField, TextField};
pub use inline_select::{assignee_options, InlineSelect};
pub use list_controls::{FilterSelect, Pagination, SearchBox, SortHeader};
pub use modal::{ConfirmDialog, Modal};
pub use navbar::Navbar;
pub use project_form::ProjectForm;
pub use task_form::TaskForm;
