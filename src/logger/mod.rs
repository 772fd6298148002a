//! Logger module
//!
//! Provides logging utilities for the wired page server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging, including caller-signaled wire errors
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether `[DEBUG]` lines are written (`logging.level = "debug"`)
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    DEBUG_ENABLED.store(
        config.logging.level.eq_ignore_ascii_case("debug"),
        Ordering::Relaxed,
    );
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_info(message);
    } else {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    if writer::is_initialized() {
        writer::get().write_access(message);
    } else {
        println!("{message}");
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Wires server started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info(&format!("Templates: {}", config.wires.templates_dir));
    write_info(&format!("API marker: ?{}", config.wires.marker));
    write_info("======================================\n");
}

pub fn log_templates_loaded(count: usize, dir: &str) {
    write_info(&format!("[Templates] Loaded {count} template(s) from {dir}"));
}

pub fn log_handler_registered(endpoint: &str) {
    write_info(&format!("[Handlers] /{endpoint}"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_info(message: &str) {
    write_info(message);
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_debug(message: &str) {
    if DEBUG_ENABLED.load(Ordering::Relaxed) {
        write_info(&format!("[DEBUG] {message}"));
    }
}

/// Log an error a handler returned while answering an API call
pub fn log_wire_error(code: u16, message: &str) {
    write_error(&format!("[WIRES] Error ({code}): {message}"));
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        write_info(&format!("[Headers] Count: {count}"));
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown(reason: &str) {
    write_info(&format!("\n[Shutdown] {reason}, no longer accepting connections"));
}
