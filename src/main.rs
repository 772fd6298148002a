use std::path::Path;
use std::sync::Arc;

use alpine_wires::config::{self, AppState};
use alpine_wires::handler::HandlerRegistry;
use alpine_wires::template::TemplateEngine;
use alpine_wires::{demos, logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config path as the first argument
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Create Tokio runtime with configured worker threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        logger::log_info(&format!("[CONFIG] Using {workers} worker threads"));
    } else {
        logger::log_info("[CONFIG] Using default worker threads (CPU cores)");
    }

    let templates = TemplateEngine::load(
        Path::new(&cfg.wires.templates_dir),
        &cfg.wires.template_extension,
        &cfg.http.charset,
    )?;

    let mut handlers = HandlerRegistry::new();
    demos::register(&mut handlers);

    let state = Arc::new(AppState::new(&cfg, templates, handlers));

    let runtime = runtime_builder.build()?;
    runtime.block_on(server::run(state))
}
