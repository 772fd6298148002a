// Connection handling module
// Accepts single TCP connections and serves them with the page router

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Accept and process a connection, checking limits and logging.
///
/// Connections over `performance.max_connections` are dropped immediately.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            // Exceeded limit: rollback counter and reject
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    if state.access_log_enabled() {
        logger::log_connection_accepted(&peer_addr);
    }

    handle_connection(stream, peer_addr, Arc::clone(state), Arc::clone(conn_counter));
}

/// Serve one connection in a local task.
///
/// HTTP/1.1 with keep-alive, bounded by the larger of the read and write
/// timeouts. Decrements the connection counter when done.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let keep_alive_timeout = state.config.performance.keep_alive_timeout;
        let timeout_duration = connection_timeout(
            state.config.performance.read_timeout,
            state.config.performance.write_timeout,
        );

        let mut builder = http1::Builder::new();
        builder.keep_alive(keep_alive_timeout > 0);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&state), peer_addr)),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

fn connection_timeout(read_timeout: u64, write_timeout: u64) -> Duration {
    Duration::from_secs(std::cmp::max(read_timeout, write_timeout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_timeout_uses_larger_value() {
        assert_eq!(connection_timeout(30, 45), Duration::from_secs(45));
        assert_eq!(connection_timeout(10, 5), Duration::from_secs(10));
    }
}
