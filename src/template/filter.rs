//! Placeholder filters
//!
//! Every `{{label}}` in a template is passed through a [`Filter`] chosen by
//! the caller of [`super::TemplateEngine::render`].

use html_escape::encode_quoted_attribute;
use serde_json::Value;
use std::borrow::Cow;

/// Turns a placeholder's value into the text written to the output
pub trait Filter {
    fn apply(&self, value: &Value, charset: &str, label: &str) -> String;
}

impl<F> Filter for F
where
    F: Fn(&Value, &str, &str) -> String,
{
    fn apply(&self, value: &Value, charset: &str, label: &str) -> String {
        self(value, charset, label)
    }
}

/// Default filter: the value's text, HTML-escaped
#[derive(Debug, Clone, Copy, Default)]
pub struct Sanitize;

impl Filter for Sanitize {
    fn apply(&self, value: &Value, charset: &str, _label: &str) -> String {
        sanitize(value, charset)
    }
}

/// Escape `& < > " '` in the value's text.
///
/// Output is always UTF-8; `charset` is accepted so filters share one
/// signature with the renderer.
pub fn sanitize(value: &Value, _charset: &str) -> String {
    encode_quoted_attribute(&display(value)).into_owned()
}

/// Text form of a value: strings as-is, null as nothing, the rest as JSON
pub fn display(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display() {
        assert_eq!(display(&json!(null)), "");
        assert_eq!(display(&json!("Joe")), "Joe");
        assert_eq!(display(&json!(27)), "27");
        assert_eq!(display(&json!(true)), "true");
        assert_eq!(display(&json!(["One", "Two"])), r#"["One","Two"]"#);
    }

    #[test]
    fn test_sanitize_escapes_markup() {
        assert_eq!(
            sanitize(&json!("<script>alert('x')</script>"), "UTF-8"),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"
        );
        assert_eq!(sanitize(&json!("Tom & \"Jerry\""), "UTF-8"), "Tom &amp; &quot;Jerry&quot;");
    }

    #[test]
    fn test_closure_filter() {
        let upper = |value: &Value, _: &str, label: &str| format!("{label}={}", display(value).to_uppercase());
        assert_eq!(upper.apply(&json!("joe"), "UTF-8", "name"), "name=JOE");
        assert_eq!(Sanitize.apply(&json!("a<b"), "UTF-8", "name"), "a&lt;b");
    }
}
