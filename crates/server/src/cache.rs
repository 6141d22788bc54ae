//! Single-flight memoization keyed by query shape.
//!
//! The first caller for a key runs the computation; callers arriving while it
//! is in flight wait for the same outcome instead of starting their own. A
//! failure is handed to every caller that joined the flight, then the key is
//! evicted so the next caller retries.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::OnceCell;
use tracing::debug;

type Flight<V, E> = Arc<OnceCell<Result<V, E>>>;

/// Memoization table owned by one orchestrator
pub struct SingleFlightCache<V, E> {
    cells: Mutex<HashMap<String, Flight<V, E>>>,
}

impl<V: Clone, E: Clone> SingleFlightCache<V, E> {
    pub fn new() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }

    fn cells(&self) -> MutexGuard<'_, HashMap<String, Flight<V, E>>> {
        // The map is only touched under short, non-panicking sections
        self.cells.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the cached value for `key`, computing it with `init` if needed.
    pub async fn get_or_try_init<F, Fut>(&self, key: &str, init: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let flight = self.cells().entry(key.to_string()).or_default().clone();
        let outcome = flight.get_or_init(init).await.clone();

        if outcome.is_err() {
            let mut cells = self.cells();
            // A newer flight may already occupy the key
            if cells.get(key).is_some_and(|current| Arc::ptr_eq(current, &flight)) {
                cells.remove(key);
                debug!("Evicted failed flight for {}", key);
            }
        }
        outcome
    }

    /// Cached value for `key`, if one has completed successfully
    pub fn get(&self, key: &str) -> Option<V> {
        self.cells()
            .get(key)
            .and_then(|flight| flight.get())
            .and_then(|outcome| outcome.as_ref().ok().cloned())
    }

    /// Number of keys holding a successful value
    pub fn len(&self) -> usize {
        self.cells()
            .values()
            .filter(|flight| matches!(flight.get(), Some(Ok(_))))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry; computations already in flight still finish for
    /// their own callers
    pub fn clear(&self) {
        self.cells().clear();
    }
}

impl<V: Clone, E: Clone> Default for SingleFlightCache<V, E> {
    fn default() -> Self {
        Self::new()
    }
}
