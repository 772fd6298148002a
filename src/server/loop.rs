// Server loop module
// Accepts connections until shutdown, then drains active ones

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::AppState;
use crate::logger;

/// Interval between checks while waiting for connections to finish
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Accept connections until a shutdown is requested.
///
/// Must run inside a `LocalSet`; each connection is a local task. After the
/// listener closes, in-flight connections get up to `write_timeout` seconds
/// to finish.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = signals.shutdown.notified() => {
                break;
            }
        }
    }

    drop(listener);
    let grace = Duration::from_secs(state.config.performance.write_timeout);
    let remaining = drain_connections(&active_connections, grace).await;
    if remaining > 0 {
        logger::log_warning(&format!(
            "Shutting down with {remaining} connection(s) still open"
        ));
    }
    Ok(())
}

/// Wait until no connections are active or `grace` elapses.
///
/// Returns the number of connections still open.
pub async fn drain_connections(active_connections: &AtomicUsize, grace: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace;
    loop {
        let active = active_connections.load(Ordering::SeqCst);
        if active == 0 || tokio::time::Instant::now() >= deadline {
            return active;
        }
        tokio::time::sleep(DRAIN_POLL).await;
    }
}
