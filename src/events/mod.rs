//! # Event registry and dispatch.
//!
//! The core of the crate: [`EventEmitter`] maps string event names to
//! ordered listener tables and fans emitted payloads out synchronously.
//!
//! ## Contents
//! - [`EventEmitter`] registration, removal, introspection, dispatch
//! - [`Listener`], [`NewListenerHook`] shared handle types and the
//!   [`listener`]/[`new_listener_hook`] wrapping helpers
//! - [`ERROR_EVENT`] the reserved name with must-be-heard semantics
//!
//! See `emitter.rs` for the dispatch rules and the locking diagram.

mod emitter;
mod listener;
mod registry;

pub use emitter::EventEmitter;
pub use listener::{listener, new_listener_hook, Listener, NewListenerHook};

/// Reserved event name for error payloads.
///
/// Emitting it with no listeners fails with
/// [`EmitError::Uncaught`](crate::EmitError::Uncaught) instead of silently
/// dropping the payload. Every other event is fire-and-forget when unheard.
pub const ERROR_EVENT: &str = "error";
