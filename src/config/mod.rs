// Configuration module entry point
// Manages application configuration and per-process shared state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, WiresConfig,
};

/// Config file looked up when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// Layers, lowest priority first: built-in defaults, the file (if it
    /// exists), then `WIRES__SECTION__KEY` environment variables.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.default_content_type", "text/html; charset=utf-8")?
            .set_default("http.server_name", "alpine-wires/0.1")?
            .set_default("http.charset", "UTF-8")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("wires.marker", "_wired_")?
            .set_default(
                "wires.script_src",
                "https://cdn.jsdelivr.net/gh/alpinejs/alpine@v2.4.1/dist/alpine.min.js",
            )?
            .set_default("wires.templates_dir", "templates")?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("WIRES")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does/not/exist/config").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.wires.marker, "_wired_");
        assert_eq!(cfg.wires.template_extension, "html");
        assert!(cfg.wires.layout);
        assert!(!cfg.wires.strict_json);
        assert_eq!(cfg.http.charset, "UTF-8");
        assert_eq!(cfg.logging.access_log_format, "combined");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[wires]\nmarker = \"_api_\"\nstrict_json = true\n"
        )
        .unwrap();

        let cfg = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.wires.marker, "_api_");
        assert!(cfg.wires.strict_json);
        assert_eq!(cfg.wires.templates_dir, "templates");
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8080);

        cfg.server.host = "not an address".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
