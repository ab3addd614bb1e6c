//! Reactive Hooks
//!
//! Leptos bindings for the core form and async controllers. The controller
//! state lives in an `RwSignal`, so views re-render from it directly.

use std::future::Future;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use leptos::prelude::*;
use leptos::task::spawn_local;

use task_hub_core::form::{self, FormController, FormValues};
use task_hub_core::{ApiError, AsyncOperation, AsyncState, AsyncStatus, StateCell};

/// Signal-backed state cell.
pub struct SignalCell<S: 'static>(pub RwSignal<S>);

impl<S: 'static> Clone for SignalCell<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for SignalCell<S> {}

/// A view can unmount while its call is in flight, disposing the signal.
/// Late reads and writes then land on a scratch value.
impl<S: Default + Send + Sync + 'static> StateCell<S> for SignalCell<S> {
    fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        match self.0.try_read_untracked() {
            Some(guard) => f(&*guard),
            None => f(&S::default()),
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        match self.0.try_write() {
            Some(mut guard) => f(&mut *guard),
            None => {
                log::debug!("[HOOK] State disposed before the call settled");
                f(&mut S::default())
            }
        }
    }
}

// ========================
// Forms
// ========================

type SubmitFn = Rc<dyn Fn(FormValues) -> LocalBoxFuture<'static, Result<(), String>>>;

/// Form bound to its submit callback.
#[derive(Clone, Copy)]
pub struct FormHandle {
    cell: SignalCell<FormController>,
    on_submit: StoredValue<SubmitFn, LocalStorage>,
}

pub fn use_form<F, Fut>(form: FormController, on_submit: F) -> FormHandle
where
    F: Fn(FormValues) -> Fut + 'static,
    Fut: Future<Output = Result<(), String>> + 'static,
{
    let on_submit: SubmitFn = Rc::new(move |values| on_submit(values).boxed_local());
    FormHandle {
        cell: SignalCell(RwSignal::new(form)),
        on_submit: StoredValue::new_local(on_submit),
    }
}

impl FormHandle {
    pub fn value(&self, field: &'static str) -> String {
        self.cell.0.with(|f| f.value(field).to_string())
    }

    /// Message to show under the field, once touched.
    pub fn error(&self, field: &'static str) -> Option<String> {
        self.cell.0.with(|f| f.visible_error(field).map(str::to_string))
    }

    pub fn is_submitting(&self) -> bool {
        self.cell.0.with(|f| f.is_submitting())
    }

    pub fn change(&self, field: &'static str, value: String) {
        self.cell.update(|f| f.handle_change(field, value));
    }

    pub fn blur(&self, field: &'static str) {
        self.cell.update(|f| f.handle_blur(field));
    }

    pub fn reset(&self) {
        self.cell.update(|f| f.reset());
    }

    /// Replace the whole form, e.g. when the edited record changes.
    pub fn replace(&self, form: FormController) {
        self.cell.0.set(form);
    }

    pub fn submit(&self, ev: web_sys::SubmitEvent) {
        ev.prevent_default();
        let cell = self.cell;
        let on_submit = self.on_submit.get_value();
        spawn_local(async move {
            form::submit(&cell, |values| on_submit(values)).await;
        });
    }
}

// ========================
// Async operations
// ========================

type Cell<T> = SignalCell<AsyncState<T>>;

/// Async call site with reactive status.
pub struct AsyncHandle<A: 'static, T: 'static> {
    op: StoredValue<AsyncOperation<A, T, Cell<T>>, LocalStorage>,
    cell: Cell<T>,
}

impl<A: 'static, T: 'static> Clone for AsyncHandle<A, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: 'static, T: 'static> Copy for AsyncHandle<A, T> {}

pub fn use_async<A, T, F, Fut>(operation: F) -> AsyncHandle<A, T>
where
    A: 'static,
    T: Clone + Send + Sync + 'static,
    F: Fn(A) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let cell = SignalCell(RwSignal::new(AsyncState::new()));
    let op = AsyncOperation::new(cell, Rc::new(move |args| operation(args).boxed_local()));
    AsyncHandle {
        op: StoredValue::new_local(op),
        cell,
    }
}

/// Like [`use_async`], started once as soon as the view mounts.
pub fn use_async_on_mount<T, F, Fut>(operation: F) -> AsyncHandle<(), T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(()) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let handle = use_async(operation);
    handle.run(());
    handle
}

impl<A: 'static, T: Clone + Send + Sync + 'static> AsyncHandle<A, T> {
    pub fn status(&self) -> AsyncStatus {
        self.cell.0.with(|s| s.status())
    }

    pub fn is_pending(&self) -> bool {
        self.status() == AsyncStatus::Pending
    }

    pub fn data(&self) -> Option<T> {
        self.cell.0.with(|s| s.data().cloned())
    }

    pub fn error_message(&self) -> Option<String> {
        self.cell.0.with(|s| s.error().map(ApiError::user_message))
    }

    /// Await the call, for callers that chain on its result.
    pub async fn execute(&self, args: A) -> Result<T, ApiError> {
        let op = self.op.get_value();
        op.execute(args).await
    }

    /// Fire and forget; the outcome lands in the state.
    pub fn run(&self, args: A) {
        let op = self.op.get_value();
        spawn_local(async move {
            let _ = op.execute(args).await;
        });
    }

    /// Patch loaded data after a mutation the server accepted.
    pub fn map_data(&self, f: impl FnOnce(&mut T)) {
        self.cell.update(|s| s.map_data(f));
    }
}
