//! Cancellation tied to a view's lifetime.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::{AbortHandle, Abortable};
use thiserror::Error;

/// The view was closed before the future finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("view closed")]
pub struct Cancelled;

#[derive(Debug, Default)]
struct LifetimeState {
    cancelled: bool,
    next_id: u64,
    in_flight: HashMap<u64, AbortHandle>,
}

/// Clonable cancellation token shared by a view and its in-flight fetches.
///
/// Once cancelled it stays cancelled: every pending [`run`](Self::run)
/// resolves to `Err(Cancelled)` and new ones do so immediately.
#[derive(Debug, Clone, Default)]
pub struct ViewLifetime {
    state: Arc<Mutex<LifetimeState>>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive `fut` unless the lifetime ends first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Cancelled> {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut state = self.lock();
            if state.cancelled {
                return Err(Cancelled);
            }
            let id = state.next_id;
            state.next_id += 1;
            state.in_flight.insert(id, handle);
            id
        };

        let result = Abortable::new(fut, registration).await;
        self.lock().in_flight.remove(&id);
        result.map_err(|_| Cancelled)
    }

    /// End the lifetime, aborting every in-flight future.
    pub fn cancel(&self) {
        let handles: Vec<AbortHandle> = {
            let mut state = self.lock();
            state.cancelled = true;
            state.in_flight.drain().map(|(_, h)| h).collect()
        };
        if !handles.is_empty() {
            tracing::debug!(count = handles.len(), "Aborting in-flight view fetches");
        }
        for handle in handles {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight.len()
    }

    fn lock(&self) -> MutexGuard<'_, LifetimeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
