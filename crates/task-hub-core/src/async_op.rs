//! Async Operation Wrapper
//!
//! Uniform idle/pending/success/error lifecycle around one async call site.
//! Every `execute` takes a new generation number; a resolution whose
//! generation is no longer the latest is handed back to its caller but does
//! not touch the shared state, so a slow stale response cannot overwrite a
//! fresher one.

use std::future::Future;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::cell::StateCell;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AsyncStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Snapshot of one operation site. `data` is set only on success and
/// `error` only on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncState<T, E = ApiError> {
    status: AsyncStatus,
    data: Option<T>,
    error: Option<E>,
    generation: u64,
}

impl<T, E> Default for AsyncState<T, E> {
    fn default() -> Self {
        Self {
            status: AsyncStatus::Idle,
            data: None,
            error: None,
            generation: 0,
        }
    }
}

impl<T, E> AsyncState<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> AsyncStatus {
        self.status
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.status == AsyncStatus::Pending
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Enter `Pending`, clearing previous data and error. Returns the
    /// generation the caller must present when settling.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.status = AsyncStatus::Pending;
        self.data = None;
        self.error = None;
        self.generation
    }

    /// Edit loaded data in place, e.g. after a mutation the server accepted.
    /// No-op unless the last call succeeded.
    pub fn map_data(&mut self, f: impl FnOnce(&mut T)) {
        if let Some(data) = self.data.as_mut() {
            f(data);
        }
    }

    /// Record an outcome. Ignored, returning false, when a newer call has begun.
    pub fn settle(&mut self, generation: u64, result: Result<T, E>) -> bool {
        if generation != self.generation {
            return false;
        }
        match result {
            Ok(data) => {
                self.status = AsyncStatus::Success;
                self.data = Some(data);
                self.error = None;
            }
            Err(error) => {
                self.status = AsyncStatus::Error;
                self.data = None;
                self.error = Some(error);
            }
        }
        true
    }
}

/// Run `operation` under the lifecycle held in `cell` and return its result.
pub async fn execute<T, E, C, Fut>(cell: &C, operation: Fut) -> Result<T, E>
where
    T: Clone,
    E: Clone,
    C: StateCell<AsyncState<T, E>>,
    Fut: Future<Output = Result<T, E>>,
{
    let generation = cell.update(|state| state.begin());
    let result = operation.await;
    let applied = cell.update(|state| state.settle(generation, result.clone()));
    if !applied {
        log::debug!("[ASYNC] Discarding stale resolution of generation {}", generation);
    }
    result
}

/// Boxed operation taking `A` as its argument.
pub type Operation<A, T, E> = Rc<dyn Fn(A) -> LocalBoxFuture<'static, Result<T, E>>>;

/// An operation bound to its state cell.
pub struct AsyncOperation<A, T, C, E = ApiError> {
    operation: Operation<A, T, E>,
    cell: C,
}

impl<A, T, C: Clone, E> Clone for AsyncOperation<A, T, C, E> {
    fn clone(&self) -> Self {
        Self {
            operation: self.operation.clone(),
            cell: self.cell.clone(),
        }
    }
}

impl<A, T, C, E> AsyncOperation<A, T, C, E>
where
    T: Clone,
    E: Clone,
    C: StateCell<AsyncState<T, E>>,
{
    pub fn new(cell: C, operation: Operation<A, T, E>) -> Self {
        Self { operation, cell }
    }

    /// Invoke the operation. `Pending` is visible before the first await.
    pub async fn execute(&self, args: A) -> Result<T, E> {
        execute(&self.cell, (self.operation)(args)).await
    }

    pub fn status(&self) -> AsyncStatus {
        self.cell.read(|s| s.status())
    }

    pub fn data(&self) -> Option<T> {
        self.cell.read(|s| s.data().cloned())
    }

    pub fn error(&self) -> Option<E> {
        self.cell.read(|s| s.error().cloned())
    }

    pub fn cell(&self) -> &C {
        &self.cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::FutureExt;
    use std::cell::RefCell;

    type Cell = Rc<RefCell<AsyncState<u32, String>>>;

    #[test]
    fn test_begin_clears_previous_outcome() {
        let mut state: AsyncState<u32, String> = AsyncState::new();
        let g = state.begin();
        assert!(state.settle(g, Ok(1)));
        assert_eq!(state.data(), Some(&1));

        state.begin();
        assert_eq!(state.status(), AsyncStatus::Pending);
        assert!(state.data().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_map_data_only_after_success() {
        let mut state: AsyncState<Vec<u32>, String> = AsyncState::new();
        state.map_data(|v| v.push(1));
        assert!(state.data().is_none());

        let g = state.begin();
        state.settle(g, Ok(vec![1]));
        state.map_data(|v| v.push(2));
        assert_eq!(state.data(), Some(&vec![1, 2]));
    }

    #[test]
    fn test_settle_error_clears_data() {
        let mut state: AsyncState<u32, String> = AsyncState::new();
        let g = state.begin();
        state.settle(g, Err("nope".into()));
        assert_eq!(state.status(), AsyncStatus::Error);
        assert_eq!(state.error().map(String::as_str), Some("nope"));
        assert!(state.data().is_none());
    }

    #[tokio::test]
    async fn test_pending_until_resolved() {
        let cell: Cell = Rc::new(RefCell::new(AsyncState::new()));
        let (tx, rx) = oneshot::channel::<u32>();
        let rx = Rc::new(RefCell::new(Some(rx)));
        let op: AsyncOperation<(), u32, Cell, String> = AsyncOperation::new(
            cell.clone(),
            Rc::new(move |_: ()| {
                let rx = rx.borrow_mut().take();
                async move {
                    match rx {
                        Some(rx) => rx.await.map_err(|e| e.to_string()),
                        None => Err("already consumed".to_string()),
                    }
                }
                .boxed_local()
            }),
        );
        assert_eq!(op.status(), AsyncStatus::Idle);

        let check = async {
            assert_eq!(op.status(), AsyncStatus::Pending);
            tx.send(5).unwrap();
        };
        let (result, ()) = futures::join!(op.execute(()), check);

        assert_eq!(result, Ok(5));
        assert_eq!(op.status(), AsyncStatus::Success);
        assert_eq!(op.data(), Some(5));
        assert!(op.error().is_none());
    }

    #[tokio::test]
    async fn test_failure_is_returned_and_recorded() {
        let cell: Cell = Rc::new(RefCell::new(AsyncState::new()));
        let op: AsyncOperation<u32, u32, Cell, String> = AsyncOperation::new(
            cell.clone(),
            Rc::new(|code: u32| async move { Err::<u32, String>(format!("failed {}", code)) }.boxed_local()),
        );
        assert_eq!(op.execute(7).await, Err("failed 7".to_string()));
        assert_eq!(op.status(), AsyncStatus::Error);
        assert_eq!(op.error().as_deref(), Some("failed 7"));
        assert!(op.data().is_none());
    }

    #[tokio::test]
    async fn test_stale_resolution_is_discarded() {
        let cell: Cell = Rc::new(RefCell::new(AsyncState::new()));
        let (slow_tx, slow_rx) = oneshot::channel::<u32>();
        let (fast_tx, fast_rx) = oneshot::channel::<u32>();

        let first = execute(&cell, async move { slow_rx.await.map_err(|e| e.to_string()) });
        let second = execute(&cell, async move { fast_rx.await.map_err(|e| e.to_string()) });

        let driver = async {
            fast_tx.send(2).unwrap();
            tokio::task::yield_now().await;
            slow_tx.send(1).unwrap();
        };
        let (a, b, ()) = futures::join!(first, second, driver);

        // each caller still gets its own result
        assert_eq!(a, Ok(1));
        assert_eq!(b, Ok(2));
        // but only the latest invocation lands in the shared state
        let state = cell.borrow();
        assert_eq!(state.status(), AsyncStatus::Success);
        assert_eq!(state.data(), Some(&2));
        assert_eq!(state.generation(), 2);
    }
}
