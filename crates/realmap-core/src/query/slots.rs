// crates/realmap-core/src/query/slots.rs
use crate::error::{GeoError, Result};
use crate::model::LayerKind;
use futures::future::{abortable, AbortHandle};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// A logical resource; at most one request per resource is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// The listing of one layer.
    Layer(LayerKind),
    /// Whatever the info panel is waiting for.
    Detail,
}

/// Most-recent-wins bookkeeping for in-flight requests.
///
/// Starting a request for a resource aborts the one already running for it;
/// the aborted call resolves to [`GeoError::Cancelled`].
#[derive(Debug, Default)]
pub struct RequestSlots {
    in_flight: Mutex<HashMap<Resource, (u64, AbortHandle)>>,
    next_seq: AtomicU64,
}

impl RequestSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run<F, T>(&self, resource: Resource, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let (request, handle) = abortable(request);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);

        let previous = self.lock().insert(resource, (seq, handle));
        if let Some((_, previous)) = previous {
            previous.abort();
            debug!(?resource, "cancelled superseded request");
        }

        let outcome = request.await;

        {
            let mut in_flight = self.lock();
            if in_flight.get(&resource).is_some_and(|(s, _)| *s == seq) {
                in_flight.remove(&resource);
            }
        }

        outcome.unwrap_or(Err(GeoError::Cancelled))
    }

    /// Number of requests currently running.
    pub fn in_flight(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Resource, (u64, AbortHandle)>> {
        // The map holds no invariant a panicking holder could break.
        self.in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
