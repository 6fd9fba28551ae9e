//! # Example: evented_type
//!
//! A plain type declares which events its methods handle; constructing an
//! [`Evented`] host registers the whole table on an emitter.
//!
//! ## Run
//! ```bash
//! cargo run --example evented_type
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use evemit::{Evented, EventHandlers, Handler, ListenerError};

#[derive(Default)]
struct Auditor {
    seen: AtomicUsize,
}

impl Auditor {
    fn on_write(&self, path: &String) -> Result<(), ListenerError> {
        self.seen.fetch_add(1, Ordering::SeqCst);
        println!("[audit] write: {path}");
        Ok(())
    }

    fn on_delete(&self, path: &String) -> Result<(), ListenerError> {
        self.seen.fetch_add(1, Ordering::SeqCst);
        println!("[audit] delete: {path}");
        Ok(())
    }
}

impl EventHandlers<String> for Auditor {
    fn handlers() -> Vec<Handler<Self, String>> {
        vec![
            Handler::new("write", Auditor::on_write),
            Handler::new("delete", Auditor::on_delete),
        ]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Construction registers both bindings over the shared instance.
    let host = Evented::new(Auditor::default());

    // 2. Emits reach the instance's methods.
    host.emitter().emit("write", "/etc/app.conf".to_string())?;
    host.emitter().emit("delete", "/tmp/cache.bin".to_string())?;

    let seen = host.instance().seen.load(Ordering::SeqCst);
    println!("audited {seen} operations");
    Ok(())
}
