//! # Declarative bindings for event-handling types.
//!
//! A type lists its event→method pairs once ([`EventHandlers::handlers`]);
//! building an [`Evented`] host registers every pair on an emitter as a
//! closure over the shared instance. The table is plain data, so a type's
//! bindings are inspectable without constructing anything.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use evemit::{Evented, EventHandlers, Handler, ListenerError};
//!
//! #[derive(Default)]
//! struct Tracker {
//!     opened: AtomicUsize,
//! }
//!
//! impl Tracker {
//!     fn on_open(&self, _path: &String) -> Result<(), ListenerError> {
//!         self.opened.fetch_add(1, Ordering::SeqCst);
//!         Ok(())
//!     }
//! }
//!
//! impl EventHandlers<String> for Tracker {
//!     fn handlers() -> Vec<Handler<Self, String>> {
//!         vec![Handler::new("open", Tracker::on_open)]
//!     }
//! }
//!
//! let host = Evented::new(Tracker::default());
//! host.emitter().emit("open", "/tmp/a".to_string())?;
//! assert_eq!(host.instance().opened.load(Ordering::SeqCst), 1);
//! # Ok::<(), evemit::EmitError<String>>(())
//! ```

mod handler;
mod host;

pub use handler::{EventHandlers, Handler, HandlerFn};
pub use host::Evented;
