//! REST Endpoint Bindings
//!
//! Typed wrappers over [`ApiClient`](crate::http::ApiClient), organized by domain.

mod auth;
mod comments;
mod projects;
mod tasks;
mod users;

pub use tasks::{TaskChange, TaskFilter};
