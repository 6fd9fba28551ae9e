//! # evemit
//!
//! **Evemit** is an in-process publish/subscribe emitter for Rust.
//!
//! Callers register shared closures ("listeners") under string event names
//! and later emit those events, synchronously fanning the payload out to
//! every listener registered at that moment. It is a building block for
//! decoupling producers of occurrences from the consumers that react to
//! them, inside one process: no transport, no persistence, no queueing in
//! the core.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   on("change", f)      once("ready", g)        on_new_listener(h)
//!        │                      │                        │
//!        │             (stored as a remove-              │
//!        │              then-call wrapper)               │
//!        ▼                      ▼                        ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  EventEmitter<T>        Mutex<Registry<T>>                      │
//! │  "change" → [f]         "ready" → [once(g)]      hooks → [h]    │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │  emit("change", payload)
//!                                 │  1. snapshot under lock
//!                                 │  2. release lock
//!                                 ▼
//!                  f(&payload), .. in registration order
//! ```
//!
//! ### Dispatch
//! ```text
//! emit(event, payload)
//!   ├─► snapshot = registry[event]        (under lock)
//!   ├─► handled  = !snapshot.is_empty()   (lock released)
//!   ├─► unheard "error"? ─► Err(Uncaught { payload })
//!   ├─► for listener in snapshot:
//!   │     listener(&payload)
//!   │       └─ Err(e) ─► Err(Listener { event, source: e }), stop
//!   └─► Ok(handled)
//! ```
//!
//! ### Rules
//! - Listener order is registration order; re-registering a handle
//!   overwrites in place and keeps its position.
//! - The registry lock is never held while user code runs: listeners and
//!   hooks may re-enter the emitter freely.
//! - A dispatch runs the snapshot taken at emit time; concurrent mutation
//!   affects later emits.
//! - `"error"` must be heard: emitting it with no listeners returns the
//!   payload as [`EmitError::Uncaught`].
//! - Clones of [`EventEmitter`] share one registry and are `Send + Sync`.
//!
//! ## Features
//! | Area             | Description                                               | Key types / traits               |
//! |------------------|-----------------------------------------------------------|----------------------------------|
//! | **Registration** | Ordered, identity-keyed listeners on named events.        | [`EventEmitter`], [`Listener`]   |
//! | **One-shot**     | Listeners that remove themselves before their first call. | [`EventEmitter::once`]           |
//! | **Hooks**        | Observe registrations before they become invokable.       | [`NewListenerHook`]              |
//! | **Bindings**     | Declarative event→method tables on plain types.           | [`EventHandlers`], [`Evented`]   |
//! | **Errors**       | Typed emission failures with payload recovery.            | [`EmitError`], [`ListenerError`] |
//!
//! ## Optional features
//! - `queued`: defers each listener invocation onto the tokio runtime
//!   (`QueuedEmitter`), with best-effort cancellation of not-yet-run work.
//!
//! ## Example
//! ```rust
//! use evemit::{listener, EventEmitter};
//!
//! #[derive(Debug)]
//! enum Change {
//!     Added { id: u32 },
//!     Removed { id: u32 },
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let emitter: EventEmitter<Change> = EventEmitter::new();
//!
//!     // Permanent listener: every change.
//!     emitter.on("change", listener(|change: &Change| {
//!         match change {
//!             Change::Added { id } => println!("added #{id}"),
//!             Change::Removed { id } => println!("removed #{id}"),
//!         }
//!         Ok(())
//!     }));
//!
//!     // One-shot listener: first change only.
//!     emitter.once("change", listener(|_change: &Change| {
//!         println!("first change observed");
//!         Ok(())
//!     }));
//!
//!     emitter.emit("change", Change::Added { id: 7 })?;
//!     emitter.emit("change", Change::Removed { id: 7 })?;
//!     assert_eq!(emitter.listener_count("change"), 1, "one-shot is gone");
//!     Ok(())
//! }
//! ```
mod error;
mod evented;
mod events;

// ---- Public re-exports ----

pub use error::{EmitError, ListenerError};
pub use evented::{Evented, EventHandlers, Handler, HandlerFn};
pub use events::{listener, new_listener_hook, EventEmitter, Listener, NewListenerHook, ERROR_EVENT};

// Optional: defer listener invocations onto the tokio runtime.
// Enable with: `--features queued`
#[cfg(feature = "queued")]
mod queued;
#[cfg(feature = "queued")]
pub use queued::QueuedEmitter;
