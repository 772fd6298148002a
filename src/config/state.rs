// Application state module
// Read-only state shared by every connection

use super::types::Config;
use crate::handler::HandlerRegistry;
use crate::template::TemplateEngine;

/// Application state
///
/// Nothing in here is mutated per request; request-scoped data lives in
/// [`crate::wires::Wires`] and [`crate::handler::Page`].
pub struct AppState {
    pub config: Config,
    pub templates: TemplateEngine,
    pub handlers: HandlerRegistry,
}

impl AppState {
    pub fn new(config: &Config, templates: TemplateEngine, handlers: HandlerRegistry) -> Self {
        Self {
            config: config.clone(),
            templates,
            handlers,
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
