//! Task Hub Core
//!
//! Platform-neutral client logic for the Task Hub UI: the REST client and its
//! session handling, the form and async-operation state machines, and list
//! helpers. Nothing here touches the DOM, so it runs under native tests.

pub mod api;
pub mod async_op;
pub mod cell;
pub mod config;
pub mod envelope;
pub mod error;
pub mod form;
pub mod format;
pub mod forms;
pub mod http;
pub mod listing;
pub mod models;
pub mod session;

#[cfg(test)]
mod tests;

pub use api::{TaskChange, TaskFilter};
pub use async_op::{AsyncOperation, AsyncState, AsyncStatus, Operation};
pub use cell::StateCell;
pub use config::{config, ClientConfig};
pub use error::{ApiError, ErrorPayload, StorageError, TransportError};
pub use form::{submit, FormController, FormValues, SubmitOutcome, ValidateOn};
pub use http::{ApiClient, HttpRequest, HttpResponse, Method, Navigator, Transport};
pub use listing::{ListQuery, Page, SortOrder};
pub use models::{Comment, EntityId, Project, Task, User};
pub use session::{KeyValueStore, MemoryStore, Session, SessionContext};
