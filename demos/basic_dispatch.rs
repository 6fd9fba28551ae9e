//! # Example: basic_dispatch
//!
//! Minimal tour of the synchronous emitter: a permanent listener, a
//! one-shot listener, and both sides of the `"error"` channel.
//!
//! ## Flow
//! ```text
//! on("line", print) ──► emit("line", ..) ──► print runs every time
//! once("line", first) ─► emit("line", ..) ──► first runs, removes itself
//! emit("error", ..) ───► heard   ─► ordinary dispatch
//!                   └──► unheard ─► Err(Uncaught { payload })
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic_dispatch
//! ```

use evemit::{listener, EventEmitter, ERROR_EVENT};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let emitter: EventEmitter<String> = EventEmitter::new();

    // 1. Permanent listener: every "line" event.
    emitter.on(
        "line",
        listener(|line: &String| {
            println!("[line] {line}");
            Ok(())
        }),
    );

    // 2. One-shot listener: first "line" only.
    emitter.once(
        "line",
        listener(|line: &String| {
            println!("[first] {line}");
            Ok(())
        }),
    );

    emitter.emit("line", "alpha".to_string())?;
    emitter.emit("line", "beta".to_string())?;

    // 3. The error channel is ordinary dispatch while somebody listens.
    emitter.on(
        ERROR_EVENT,
        listener(|reason: &String| {
            println!("[error] {reason}");
            Ok(())
        }),
    );
    emitter.emit(ERROR_EVENT, "handled downstream".to_string())?;

    // 4. Unheard, it hands the payload back instead of dropping it.
    emitter.remove_all_listeners(Some(ERROR_EVENT));
    match emitter.emit(ERROR_EVENT, "nobody listening".to_string()) {
        Err(err) => println!("uncaught: {}", err.as_message()),
        Ok(_) => unreachable!(),
    }

    Ok(())
}
