// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub wires: WiresConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            show_headers: false,
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            keep_alive_timeout: 75,
            read_timeout: 30,
            write_timeout: 30,
            max_connections: None,
        }
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub default_content_type: String,
    pub server_name: String,
    /// Charset handed to template filters
    #[serde(default = "default_charset")]
    pub charset: String,
    pub max_body_size: u64,
}

#[allow(clippy::missing_const_for_fn)]
fn default_charset() -> String {
    "UTF-8".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            default_content_type: "text/html; charset=utf-8".to_string(),
            server_name: "alpine-wires/0.1".to_string(),
            charset: default_charset(),
            max_body_size: 1_048_576,
        }
    }
}

/// Wiring configuration: how pages find their endpoint and client framework
#[derive(Debug, Deserialize, Clone)]
pub struct WiresConfig {
    /// Query key that marks a request as an API call
    pub marker: String,
    /// Client framework script, added deferred on initial renders
    pub script_src: String,
    /// Root directory of page templates
    pub templates_dir: String,
    /// Extension of template files (without the dot)
    #[serde(default = "default_template_extension")]
    pub template_extension: String,
    /// Reject malformed JSON bodies with 400 instead of falling back to defaults
    #[serde(default)]
    pub strict_json: bool,
    /// Wrap initial renders in the page layout
    #[serde(default = "default_layout")]
    pub layout: bool,
}

#[allow(clippy::missing_const_for_fn)]
fn default_template_extension() -> String {
    "html".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_layout() -> bool {
    true
}

impl Default for WiresConfig {
    fn default() -> Self {
        Self {
            marker: "_wired_".to_string(),
            script_src: "https://cdn.jsdelivr.net/gh/alpinejs/alpine@v2.4.1/dist/alpine.min.js"
                .to_string(),
            templates_dir: "templates".to_string(),
            template_extension: default_template_extension(),
            strict_json: false,
            layout: default_layout(),
        }
    }
}
