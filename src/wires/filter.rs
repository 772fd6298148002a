//! Placeholder filter for initial renders
//!
//! Special labels turn into Alpine.js bindings; every other placeholder is
//! wrapped in an `x-text` span so the client can update it in place.

use serde_json::Value;

use crate::template::{sanitize, Filter};

/// `<div {{_wire_}}>`: root of a wired region
pub const WIRE: &str = "_wire_";
/// `x-data="{{_wire_data_}}"`: the region's state factory, for custom markup
pub const WIRE_DATA: &str = "_wire_data_";
/// `<input {{_wire_input_}}>`: post on (debounced) input
pub const WIRE_INPUT: &str = "_wire_input_";
/// `<button {{_wire_button_}}>`: post on click
pub const WIRE_BUTTON: &str = "_wire_button_";
/// `<a {{_wire_link_}}>`: post on click
pub const WIRE_LINK: &str = "_wire_link_";

/// Name of the client-side state factory for render `counter`
pub fn factory_name(counter: u32) -> String {
    format!("_wire_{counter}")
}

/// Filter bound to one render's counter
#[derive(Debug, Clone, Copy)]
pub struct WireFilter {
    counter: u32,
}

impl WireFilter {
    pub const fn new(counter: u32) -> Self {
        Self { counter }
    }
}

impl Filter for WireFilter {
    fn apply(&self, value: &Value, charset: &str, label: &str) -> String {
        match label {
            WIRE => format!("x-data=\"{}()\"", factory_name(self.counter)),
            WIRE_DATA => format!("{}()", factory_name(self.counter)),
            WIRE_INPUT => "x-on:input.debounce=\"handle($event)\"".to_string(),
            WIRE_BUTTON | WIRE_LINK => "x-on:click=\"handle($event)\"".to_string(),
            _ => format!(
                "<span x-text=\"{label}\">{}</span>",
                sanitize(value, charset)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wiring_labels() {
        let filter = WireFilter::new(3);
        let null = Value::Null;
        assert_eq!(filter.apply(&null, "UTF-8", WIRE), "x-data=\"_wire_3()\"");
        assert_eq!(filter.apply(&null, "UTF-8", WIRE_DATA), "_wire_3()");
        assert_eq!(
            filter.apply(&null, "UTF-8", WIRE_INPUT),
            "x-on:input.debounce=\"handle($event)\""
        );
        assert_eq!(
            filter.apply(&null, "UTF-8", WIRE_BUTTON),
            "x-on:click=\"handle($event)\""
        );
        assert_eq!(
            filter.apply(&null, "UTF-8", WIRE_LINK),
            "x-on:click=\"handle($event)\""
        );
    }

    #[test]
    fn test_other_labels_are_escaped_text_bindings() {
        let filter = WireFilter::new(1);
        assert_eq!(
            filter.apply(&json!("<script>"), "UTF-8", "name"),
            "<span x-text=\"name\">&lt;script&gt;</span>"
        );
        assert_eq!(
            filter.apply(&json!(27), "UTF-8", "age"),
            "<span x-text=\"age\">27</span>"
        );
    }
}
