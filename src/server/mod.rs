// Server module entry
// Starts the listener, runs the accept loop and handles shutdown

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::task::LocalSet;

use crate::config::AppState;
use crate::logger;

// Re-export commonly used types
pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;
pub use signal::{start_signal_handler, SignalHandler};

/// Bind the configured address and serve until SIGINT/SIGTERM
pub async fn run(state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let addr = state.config.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;
    logger::log_server_start(&addr, &state.config);

    let signals = Arc::new(SignalHandler::new());
    start_signal_handler(Arc::clone(&signals));

    let local = LocalSet::new();
    local
        .run_until(start_server_loop(
            listener,
            state,
            Arc::new(AtomicUsize::new(0)),
            signals,
        ))
        .await
}
