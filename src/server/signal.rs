// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Signal handler state
pub struct SignalHandler {
    /// Shutdown signal (SIGTERM, SIGINT)
    pub shutdown: Arc<Notify>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Wake the server loop.
    ///
    /// The loop may be busy accepting when this fires, so the wakeup is
    /// stored as a permit rather than broadcast.
    pub fn request_shutdown(&self) {
        self.shutdown.notify_one();
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix only)
///
/// | Signal  | Action        |
/// |---------|---------------|
/// | SIGTERM | Graceful stop |
/// | SIGINT  | Graceful stop |
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    logger::log_error(&format!("Failed to register signal handlers: {e}"));
                    return;
                }
            };

        logger::log_debug(&format!(
            "Signal handlers registered (SIGTERM, SIGINT), pid {}",
            std::process::id()
        ));

        let name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };
        logger::log_shutdown(&format!("{name} received"));
        handler.request_shutdown();
    });
}

/// Fallback for other platforms - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<SignalHandler>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                logger::log_shutdown("Ctrl+C received");
                handler.request_shutdown();
            }
            Err(e) => logger::log_error(&format!("Failed to listen for Ctrl+C: {e}")),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_permit_is_kept() {
        let handler = SignalHandler::new();

        // Requested before anyone waits
        handler.request_shutdown();
        tokio::time::timeout(Duration::from_secs(1), handler.shutdown.notified())
            .await
            .unwrap();
    }
}
