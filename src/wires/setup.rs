//! Setup fragment appended after each wired render
//!
//! Defines the client-side state factory `_wire_<c>()` referenced by the
//! render's `{{_wire_}}` tag, seeded with the render's fields so the page
//! needs no extra round trip. A `wires/setup` template in the templates
//! directory replaces the built-in one.

use serde::Serialize;
use serde_json::Value;

use super::error::WiresError;
use super::fields::FieldSet;
use super::filter::factory_name;
use crate::template::{display, TemplateEngine};

pub const SETUP_TEMPLATE: &str = "wires/setup";

const BUILTIN_SETUP: &str = include_str!("setup.html");

/// Render the setup fragment for render `counter`.
///
/// Template data (inserted verbatim, JSON values already script-safe):
/// `c`, `factory`, `endpoint`, `keys`, `state`.
pub fn render(
    templates: &TemplateEngine,
    counter: u32,
    state: &FieldSet,
    endpoint: &str,
    marker: &str,
) -> Result<String, WiresError> {
    let keys: Vec<&String> = state.keys().collect();

    let mut data = FieldSet::new();
    data.insert("c".to_string(), Value::from(counter));
    data.insert("factory".to_string(), Value::from(factory_name(counter)));
    data.insert(
        "endpoint".to_string(),
        Value::from(script_json(&endpoint_url(endpoint, marker))?),
    );
    data.insert("keys".to_string(), Value::from(script_json(&keys)?));
    data.insert("state".to_string(), Value::from(script_json(state)?));

    let verbatim = |value: &Value, _: &str, _: &str| display(value).into_owned();
    let out = if templates.contains(SETUP_TEMPLATE) {
        templates.render(SETUP_TEMPLATE, &data, &verbatim)?
    } else {
        templates.render_source(SETUP_TEMPLATE, BUILTIN_SETUP, &data, &verbatim)?
    };
    Ok(out)
}

/// URL the client posts to: the page's own path plus the marker
pub fn endpoint_url(endpoint: &str, marker: &str) -> String {
    format!("/{endpoint}?{marker}")
}

/// JSON that can sit inside a `<script>` element
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wires::fields::from_json;
    use serde_json::json;

    #[test]
    fn test_builtin_fragment() {
        let templates = TemplateEngine::new("UTF-8");
        let state = from_json(json!({"name": "Joe", "age": "27"}));
        let out = render(&templates, 2, &state, "demos/inputs", "_wired_").unwrap();

        assert!(out.starts_with("<script>\nfunction _wire_2() {"));
        assert!(out.contains(r#"const endpoint = "/demos/inputs?_wired_";"#));
        assert!(out.contains(r#"const keys = ["name","age"];"#));
        assert!(out.contains(r#"return Object.assign({"name":"Joe","age":"27"}, {"#));
        assert!(out.trim_end().ends_with("</script>"));
    }

    #[test]
    fn test_state_cannot_close_script() {
        let templates = TemplateEngine::new("UTF-8");
        let state = from_json(json!({"bio": "</script><script>alert(1)</script>"}));
        let out = render(&templates, 1, &state, "demo", "_wired_").unwrap();
        assert_eq!(out.matches("</script>").count(), 1);
        assert!(out.contains(r"\u003c/script>\u003cscript>alert(1)\u003c/script>"));
    }

    #[test]
    fn test_custom_setup_template() {
        let templates = TemplateEngine::from_sources(
            [(SETUP_TEMPLATE, "<!-- {{c}} {{factory}} {{endpoint}} {{state}} -->")],
            "UTF-8",
        )
        .unwrap();
        let state = from_json(json!({"n": 1}));
        let out = render(&templates, 4, &state, "", "_wired_").unwrap();
        assert_eq!(out, r#"<!-- 4 _wire_4 "/?_wired_" {"n":1} -->"#);
    }
}
