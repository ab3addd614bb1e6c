//! Client scenarios against a scripted transport.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::async_op::{execute, AsyncState, AsyncStatus};
use crate::config::ClientConfig;
use crate::error::{ApiError, TransportError};
use crate::form::{submit, SubmitOutcome};
use crate::forms;
use crate::http::{ApiClient, HttpRequest, HttpResponse, Method, Navigator, Transport};
use crate::models::{patch_by_id, EntityId, Task};
use crate::session::{KeyValueStore, MemoryStore, SessionContext, TOKEN_KEY, USER_KEY};
use crate::{TaskChange, TaskFilter};

/// Replays queued responses and records what was sent.
#[derive(Default)]
struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn reply(&self, status: u16, body: Value) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse::new(status, body)));
    }

    fn fail(&self, error: TransportError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())))
    }
}

#[derive(Default)]
struct CountingNavigator {
    redirects: Cell<u32>,
}

impl Navigator for CountingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.set(self.redirects.get() + 1);
    }
}

struct Harness {
    client: ApiClient,
    transport: Rc<ScriptedTransport>,
    navigator: Rc<CountingNavigator>,
    store: Rc<MemoryStore>,
}

fn harness() -> Harness {
    let transport = Rc::new(ScriptedTransport::default());
    let navigator = Rc::new(CountingNavigator::default());
    let store = Rc::new(MemoryStore::new());
    let client = ApiClient::new(
        ClientConfig::new("http://api.test/api"),
        transport.clone(),
        navigator.clone(),
        SessionContext::new(store.clone()),
    );
    Harness {
        client,
        transport,
        navigator,
        store,
    }
}

fn sign_in(h: &Harness) {
    h.store.set(TOKEN_KEY, "t1").unwrap();
    h.store
        .set(USER_KEY, &json!({"id": 1, "email": "user@example.com"}).to_string())
        .unwrap();
    h.client.session().load();
}

#[tokio::test]
async fn test_login_persists_and_authorizes_next_call() {
    let h = harness();
    h.transport.reply(200, json!({"token": "t1", "user": {"id": 1, "email": "user@example.com"}}));
    h.transport.reply(200, json!({"data": [{"id": 5, "name": "Website"}]}));

    let form = Rc::new(RefCell::new(forms::login_form()));
    form.borrow_mut().handle_change("email", "user@example.com");
    form.borrow_mut().handle_change("password", "secret");

    let client = h.client.clone();
    let outcome = submit(&form, |values| async move {
        client.login(&forms::credentials(&values)).await.map(|_| ())
    })
    .await;
    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(h.store.get(TOKEN_KEY).as_deref(), Some("t1"));
    assert!(h.client.session().is_authenticated());

    let projects = h.client.list_projects().await.unwrap();
    assert_eq!(projects.len(), 1);

    let sent = h.transport.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, "http://api.test/api/auth/login");
    assert_eq!(sent[0].body, Some(json!({"email": "user@example.com", "password": "secret"})));
    assert!(sent[0].header("Authorization").is_none());
    assert_eq!(sent[1].url, "http://api.test/api/projects");
    assert_eq!(sent[1].header("Authorization"), Some("Bearer t1"));
    assert_eq!(sent[1].timeout, Duration::from_millis(10_000));
}

#[tokio::test]
async fn test_login_without_token_is_invalid_response() {
    let h = harness();
    h.transport.reply(200, json!({"user": {"id": 1, "email": "user@example.com"}}));

    let err = h
        .client
        .login(&forms::credentials(forms::login_form().values()))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Invalid response from server");
    assert!(h.store.get(TOKEN_KEY).is_none());
}

#[tokio::test]
async fn test_unauthorized_clears_session_and_redirects_once() {
    let h = harness();
    sign_in(&h);
    h.transport.reply(401, json!({"status": "error", "error": "unauthorized", "message": "token expired"}));

    let err = h.client.list_projects().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(err.user_message(), "token expired");
    assert_eq!(h.navigator.redirects.get(), 1);
    assert!(h.store.get(TOKEN_KEY).is_none());
    assert!(h.store.get(USER_KEY).is_none());
    assert!(h.client.session().user().is_none());
}

#[tokio::test]
async fn test_data_envelope_is_unwrapped() {
    let h = harness();
    sign_in(&h);
    h.transport.reply(200, json!({"data": [1, 2, 3]}));

    let value: Vec<u32> = h.client.get("/anything").await.unwrap();
    assert_eq!(value, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_null_list_is_empty() {
    let h = harness();
    sign_in(&h);
    h.transport.reply(200, json!({"data": null}));

    let tasks = h
        .client
        .list_project_tasks(&EntityId::Int(3), &TaskFilter::default())
        .await
        .unwrap();
    assert!(tasks.is_empty());
    assert_eq!(h.transport.sent()[0].url, "http://api.test/api/projects/3/tasks?status=&priority=");
}

#[tokio::test]
async fn test_empty_title_blocks_create() {
    let h = harness();
    sign_in(&h);

    let form = Rc::new(RefCell::new(forms::task_form(None)));
    let client = h.client.clone();
    let outcome = submit(&form, |values| async move {
        client
            .create_task(&EntityId::Int(3), &forms::task_input(&values))
            .await
            .map(|_| ())
    })
    .await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(form.borrow().visible_error("title"), Some("Task title is required"));
    assert!(h.transport.sent().is_empty());
}

#[tokio::test]
async fn test_login_unwraps_enveloped_auth_response() {
    let h = harness();
    h.transport.reply(
        200,
        json!({"data": {"token": "t1", "user": {"id": 1, "email": "user@example.com"}}}),
    );
    h.transport.reply(200, json!({"data": []}));

    let form = Rc::new(RefCell::new(forms::login_form()));
    form.borrow_mut().handle_change("email", "user@example.com");
    form.borrow_mut().handle_change("password", "secret");

    let client = h.client.clone();
    let outcome = submit(&form, |values| async move {
        client.login(&forms::credentials(&values)).await.map(|_| ())
    })
    .await;
    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(h.store.get(TOKEN_KEY).as_deref(), Some("t1"));
    assert_eq!(h.client.session().user().map(|u| u.email), Some("user@example.com".to_string()));

    h.client.list_projects().await.unwrap();
    assert_eq!(h.transport.sent()[1].header("Authorization"), Some("Bearer t1"));
}

#[tokio::test]
async fn test_status_patch_updates_local_list() {
    let h = harness();
    sign_in(&h);
    h.transport.reply(200, json!({"status": "success"}));

    let mut tasks: Vec<Task> = serde_json::from_value(json!([
        {"id": 1, "title": "Write docs", "status": "OPEN"},
        {"id": 2, "title": "Deploy", "status": "OPEN"}
    ]))
    .unwrap();

    let id = EntityId::Int(2);
    h.client.update_task_status(&id, "DONE").await.unwrap();
    assert!(patch_by_id(&mut tasks, &id, |t| t.with_status("DONE")));

    assert_eq!(tasks[0].status, "OPEN");
    assert_eq!(tasks[1].status, "DONE");
    let sent = h.transport.sent();
    assert_eq!(sent[0].method, Method::Patch);
    assert_eq!(sent[0].url, "http://api.test/api/tasks/2/status");
    assert_eq!(sent[0].body, Some(json!({"status": "DONE"})));
}

#[tokio::test]
async fn test_assignee_change_sends_string_id() {
    let h = harness();
    sign_in(&h);
    h.transport.reply(200, json!({"status": "success"}));
    h.transport.reply(200, json!({"status": "success"}));

    let id = EntityId::Int(2);
    h.client.change_task(&id, &TaskChange::assignee("7")).await.unwrap();
    h.client.change_task(&id, &TaskChange::assignee("")).await.unwrap();

    let sent = h.transport.sent();
    assert_eq!(sent[0].method, Method::Patch);
    assert_eq!(sent[0].url, "http://api.test/api/tasks/2/assignee");
    assert_eq!(sent[0].body, Some(json!({"assignee_id": "7"})));
    assert_eq!(sent[1].body, Some(json!({"assignee_id": null})));
}

#[tokio::test]
async fn test_timeout_surfaces_as_transport_error() {
    let h = harness();
    sign_in(&h);
    h.transport.fail(TransportError::Timeout(Duration::from_millis(10_000)));

    let state = Rc::new(RefCell::new(AsyncState::<Vec<Task>>::new()));
    let client = h.client.clone();
    let result = execute(&state, async move { client.list_assigned_tasks(&TaskFilter::default()).await }).await;

    assert!(matches!(result, Err(ApiError::Transport(TransportError::Timeout(_)))));
    assert_eq!(state.borrow().status(), AsyncStatus::Error);
    assert_eq!(
        state.borrow().error().map(|e| e.user_message()).as_deref(),
        Some("The server took too long to respond")
    );
    assert_eq!(h.navigator.redirects.get(), 0);
    assert!(h.client.session().is_authenticated());
}

#[tokio::test]
async fn test_server_error_carries_message() {
    let h = harness();
    sign_in(&h);
    h.transport.reply(
        400,
        json!({"status": "error", "error": "bad_request", "message": "Project name already exists", "code": "DUPLICATE"}),
    );

    let err = h
        .client
        .create_project(&forms::project_input(forms::project_form(None).values()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.payload().and_then(|p| p.code.as_deref()), Some("DUPLICATE"));
    assert_eq!(err.user_message(), "Project name already exists");
    assert_eq!(h.navigator.redirects.get(), 0);
}

#[tokio::test]
async fn test_profile_update_refreshes_cached_user() {
    let h = harness();
    sign_in(&h);
    h.transport.reply(200, json!({"data": {"id": 1, "email": "user@example.com", "name": "Ada"}}));

    let update = crate::models::ProfileUpdate { name: "Ada".into() };
    h.client.update_profile(&update).await.unwrap();

    assert_eq!(h.client.session().user().and_then(|u| u.name).as_deref(), Some("Ada"));
    assert_eq!(h.transport.sent()[0].method, Method::Put);
}

#[tokio::test]
async fn test_logout_forgets_token() {
    let h = harness();
    sign_in(&h);
    h.client.logout();
    h.transport.reply(200, json!({"data": []}));

    h.client.list_projects().await.unwrap();
    assert!(h.transport.sent()[0].header("Authorization").is_none());
}
