//! # Deferred dispatch on the tokio runtime.
//!
//! [`QueuedEmitter`] keeps the registry semantics of
//! [`EventEmitter`](crate::EventEmitter) and moves each listener
//! invocation onto its own tokio task, with best-effort
//! [`cancel`](QueuedEmitter::cancel) over the not-yet-run remainder.
//!
//! ## Example
//! ```rust
//! use evemit::{listener, QueuedEmitter};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let queued: QueuedEmitter<String> = QueuedEmitter::new();
//!     queued.emitter().on("line", listener(|line: &String| {
//!         println!("> {line}");
//!         Ok(())
//!     }));
//!
//!     queued.emit("line", "deferred".to_string()).unwrap();
//!     queued.flush().await;
//! }
//! ```

mod emitter;

pub use emitter::QueuedEmitter;
