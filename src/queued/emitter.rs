//! # QueuedEmitter: one tokio task per listener invocation.
//!
//! [`QueuedEmitter`] wraps an [`EventEmitter`] and trades the synchronous
//! listener calls for scheduled ones.
//!
//! ## What it keeps
//! - The snapshot protocol: which listeners run is decided synchronously
//!   at emit time, under the registry lock.
//! - The unheard-`"error"` failure, still reported synchronously.
//! - One-shot semantics: a `once` wrapper re-checks its registration when
//!   its task runs, so racing queued emits fire it exactly once.
//!
//! ## What it trades away
//! - Completion order across the scheduled tasks is unspecified.
//! - Listener failures and panics are logged, not propagated, and do not
//!   stop sibling invocations.
//!
//! ## Diagram
//! ```text
//!    emit(event, payload)
//!        │ snapshot, then Arc the payload
//!        ├────────► task 1 ─► listener₁(&payload)
//!        ├────────► task 2 ─► listener₂(&payload)
//!        └────────► task N ─► listenerN(&payload)
//!                     │
//!                cancel() aborts, flush().await settles
//! ```

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinSet;
use tracing::error;

use crate::error::EmitError;
use crate::events::{EventEmitter, ERROR_EVENT};

/// Emitter wrapper that runs each listener invocation on the tokio runtime.
///
/// Registration, removal, and introspection go through the wrapped emitter
/// ([`QueuedEmitter::emitter`]); only dispatch changes. Dropping the
/// wrapper aborts invocations that have not completed.
pub struct QueuedEmitter<T> {
    emitter: EventEmitter<T>,
    tasks: Mutex<JoinSet<()>>,
}

impl<T> QueuedEmitter<T>
where
    T: Send + Sync + 'static,
{
    /// Creates a queued emitter around a fresh [`EventEmitter`].
    #[must_use]
    pub fn new() -> Self {
        Self::from_emitter(EventEmitter::new())
    }

    /// Wraps an existing emitter.
    ///
    /// Listeners registered on `emitter` through any clone are dispatched
    /// by this wrapper; synchronous emits on the emitter itself keep
    /// working independently.
    #[must_use]
    pub fn from_emitter(emitter: EventEmitter<T>) -> Self {
        Self {
            emitter,
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    /// The wrapped emitter: register, remove, and introspect through it.
    #[must_use]
    pub fn emitter(&self) -> &EventEmitter<T> {
        &self.emitter
    }

    /// Emits `event`, scheduling one tokio task per snapshotted listener.
    ///
    /// The payload is shared across tasks behind an `Arc`, so `T` needs no
    /// `Clone`. `Ok(handled)` and the unheard-`"error"` failure follow the
    /// synchronous emit; everything after the snapshot is deferred.
    ///
    /// Must be called within a tokio runtime.
    pub fn emit(&self, event: &str, payload: T) -> Result<bool, EmitError<T>>
    where
        T: std::fmt::Debug,
    {
        let snapshot = self.emitter.snapshot(event);
        let handled = !snapshot.is_empty();
        if !handled && event == ERROR_EVENT {
            return Err(EmitError::Uncaught { payload });
        }

        let payload = Arc::new(payload);
        let event: Arc<str> = Arc::from(event);

        let mut tasks = self.tasks.lock();
        while tasks.try_join_next().is_some() {}

        for invoke in snapshot {
            let payload = Arc::clone(&payload);
            let event = Arc::clone(&event);
            tasks.spawn(async move {
                match catch_unwind(AssertUnwindSafe(|| invoke(&*payload))) {
                    Ok(Ok(())) => {}
                    Ok(Err(source)) => {
                        error!(%event, %source, "queued listener failed");
                    }
                    Err(_) => {
                        error!(%event, "queued listener panicked");
                    }
                }
            });
        }
        Ok(handled)
    }

    /// Aborts every scheduled invocation that has not completed.
    ///
    /// Best-effort: a task not yet polled never runs its listener, a
    /// listener already running finishes its current call. Pair with
    /// [`flush`](QueuedEmitter::flush) when completion of the aborts must
    /// be observed.
    pub fn cancel(&self) {
        let mut tasks = self.tasks.lock();
        tasks.abort_all();
        while tasks.try_join_next().is_some() {}
    }

    /// Number of scheduled invocations not yet reaped.
    ///
    /// Finished tasks are reaped lazily (on emit, cancel, and flush), so
    /// this over-approximates in-flight work between calls.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Awaits every invocation scheduled so far, including aborted ones.
    ///
    /// Each flush settles the set it captured; emits racing this call may
    /// schedule work a concurrent flush does not wait for.
    pub async fn flush(&self) {
        let mut tasks = std::mem::take(&mut *self.tasks.lock());
        while tasks.join_next().await.is_some() {}
    }
}

impl<T> Default for QueuedEmitter<T>
where
    T: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{listener, Listener};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(hits: &Arc<AtomicUsize>) -> Listener<u32> {
        let hits = Arc::clone(hits);
        listener(move |_n: &u32| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_emit_defers_until_scheduled_tasks_run() {
        let queued: QueuedEmitter<u32> = QueuedEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        queued.emitter().on("tick", counting(&hits));

        assert!(queued.emit("tick", 1).unwrap());
        assert_eq!(hits.load(Ordering::SeqCst), 0, "listener must not run inline");

        queued.flush().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_cancel_before_yield_drops_all_invocations() {
        let queued: QueuedEmitter<u32> = QueuedEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        queued.emitter().on("tick", counting(&hits));
        queued.emitter().on("tick", counting(&hits));

        assert!(queued.emit("tick", 1).unwrap());
        queued.cancel();
        queued.flush().await;

        assert_eq!(hits.load(Ordering::SeqCst), 0, "cancelled tasks must never run");
        assert_eq!(queued.pending(), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_once_stays_one_shot_across_queued_emits() {
        let queued: QueuedEmitter<u32> = QueuedEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        queued.emitter().once("tick", counting(&hits));

        assert!(queued.emit("tick", 1).unwrap());
        assert!(
            queued.emit("tick", 2).unwrap(),
            "wrapper still registered until a task fires it"
        );
        queued.flush().await;

        assert_eq!(
            hits.load(Ordering::SeqCst),
            1,
            "two scheduled invocations, only one may fire"
        );
        assert!(!queued.emit("tick", 3).unwrap());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_unheard_error_event_fails_synchronously() {
        let queued: QueuedEmitter<u32> = QueuedEmitter::new();
        let err = queued.emit(ERROR_EVENT, 5).unwrap_err();
        assert_eq!(err.into_payload(), Some(5));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_listener_failure_is_contained() {
        let queued: QueuedEmitter<u32> = QueuedEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        queued.emitter().on("tick", listener(|_n: &u32| Err("boom".into())));
        queued.emitter().on("tick", counting(&hits));

        assert!(queued.emit("tick", 1).unwrap());
        queued.flush().await;
        assert_eq!(
            hits.load(Ordering::SeqCst),
            1,
            "other listeners still run after a failure"
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_listener_panic_is_contained() {
        let queued: QueuedEmitter<u32> = QueuedEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        queued.emitter().on("tick", listener(|_n: &u32| panic!("kaboom")));
        queued.emitter().on("tick", counting(&hits));

        assert!(queued.emit("tick", 1).unwrap());
        queued.flush().await;

        assert_eq!(
            hits.load(Ordering::SeqCst),
            1,
            "a panicking listener must not poison the set"
        );
        assert_eq!(queued.pending(), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_pending_reflects_unreaped_work() {
        let queued: QueuedEmitter<u32> = QueuedEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));
        queued.emitter().on("tick", counting(&hits));

        queued.emit("tick", 1).unwrap();
        assert_eq!(queued.pending(), 1);

        queued.flush().await;
        assert_eq!(queued.pending(), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_payload_shared_without_clone() {
        #[derive(Debug)]
        struct Blob(Vec<u8>);

        let queued: QueuedEmitter<Blob> = QueuedEmitter::new();
        let seen = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let seen = Arc::clone(&seen);
            queued.emitter().on(
                "blob",
                listener(move |b: &Blob| {
                    seen.fetch_add(b.0.len(), Ordering::SeqCst);
                    Ok(())
                }),
            );
        }

        queued.emit("blob", Blob(vec![0u8; 16])).unwrap();
        queued.flush().await;
        assert_eq!(
            seen.load(Ordering::SeqCst),
            48,
            "all three listeners observe one shared payload"
        );
    }
}
