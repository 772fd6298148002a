//! Demo pages
//!
//! Each demo is a page handler plus a template of the same name under
//! `templates/`.

pub mod demo;
pub mod inputs;
pub mod randomnames;
pub mod todo;

use crate::handler::HandlerRegistry;

/// Register every demo page
pub fn register(registry: &mut HandlerRegistry) {
    registry.register("demo", demo::handler);
    registry.register("demos/inputs", inputs::handler);
    registry.register("demos/randomnames", randomnames::handler);
    registry.register("todo", todo::handler);
}
