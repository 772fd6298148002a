//! Page handler registry
//!
//! Maps endpoints (request path without surrounding slashes) to handlers.
//! The endpoint doubles as the template name rendered on page loads.

use std::collections::HashMap;

use crate::logger;
use crate::wires::{Wires, WiresError};

pub type HandlerFn = dyn Fn(&mut Wires<'_>) -> Result<String, WiresError> + Send + Sync;

#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<HandlerFn>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `path`; `/demos/inputs/` and `demos/inputs`
    /// name the same endpoint. A later registration replaces an earlier one.
    pub fn register<F>(&mut self, path: &str, handler: F)
    where
        F: Fn(&mut Wires<'_>) -> Result<String, WiresError> + Send + Sync + 'static,
    {
        let endpoint = path.trim_matches('/').to_string();
        logger::log_handler_registered(&endpoint);
        self.handlers.insert(endpoint, Box::new(handler));
    }

    pub fn get(&self, endpoint: &str) -> Option<&HandlerFn> {
        self.handlers.get(endpoint).map(AsRef::as_ref)
    }

    /// Registered endpoints, sorted
    pub fn endpoints(&self) -> Vec<&str> {
        let mut endpoints: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        endpoints.sort_unstable();
        endpoints
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
