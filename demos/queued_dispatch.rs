//! # Example: queued_dispatch
//!
//! Deferred dispatch: each listener invocation runs as its own tokio task.
//! `cancel()` drops scheduled work that has not started; `flush()` awaits
//! the rest.
//!
//! ## Run
//! ```bash
//! cargo run --example queued_dispatch --features queued
//! ```

use evemit::{listener, QueuedEmitter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let queued: QueuedEmitter<u64> = QueuedEmitter::new();

    // 1. Three workers on the same event.
    for worker in 1..=3u64 {
        queued.emitter().on(
            "job",
            listener(move |job: &u64| {
                println!("[worker {worker}] job #{job}");
                Ok(())
            }),
        );
    }

    // 2. Scheduled, not yet run; flush drives the tasks to completion.
    queued.emit("job", 1)?;
    println!("scheduled {} invocations", queued.pending());
    queued.flush().await;

    // 3. Cancelled before any task gets to run: nothing printed for job 2.
    queued.emit("job", 2)?;
    queued.cancel();
    queued.flush().await;
    println!("job #2 cancelled");

    Ok(())
}
