//! Template module
//!
//! Minimal `{{placeholder}}` templates loaded once at startup. The filter for
//! placeholders is an argument of each render call, so concurrent renders
//! with different filters never see each other's choice.

mod filter;

pub use filter::{display, sanitize, Filter, Sanitize};

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use walkdir::WalkDir;

use crate::logger;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

static NULL: Value = Value::Null;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(String),
    #[error("unclosed placeholder in template '{name}' at byte {offset}")]
    Unclosed { name: String, offset: usize },
    #[error("failed to read template {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to walk template directory: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder(String),
}

/// A parsed template
#[derive(Debug, Clone)]
struct Template {
    segments: Vec<Segment>,
}

impl Template {
    fn parse(name: &str, source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut consumed = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            let after_open = &rest[start + OPEN.len()..];
            let Some(end) = after_open.find(CLOSE) else {
                return Err(TemplateError::Unclosed {
                    name: name.to_string(),
                    offset: consumed + start,
                });
            };
            segments.push(Segment::Placeholder(after_open[..end].trim().to_string()));

            let advance = start + OPEN.len() + end + CLOSE.len();
            consumed += advance;
            rest = &rest[advance..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { segments })
    }

    fn render(&self, data: &Map<String, Value>, filter: &dyn Filter, charset: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(label) => {
                    let value = lookup(data, label).unwrap_or(&NULL);
                    out.push_str(&filter.apply(value, charset, label));
                }
            }
        }
        out
    }
}

/// Resolve a label against the data: a plain key first, then a dotted path
/// through objects and array indices.
fn lookup<'a>(data: &'a Map<String, Value>, label: &str) -> Option<&'a Value> {
    if let Some(value) = data.get(label) {
        return Some(value);
    }

    let mut parts = label.split('.');
    let mut current = data.get(parts.next()?)?;
    for part in parts {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Set of named templates
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    templates: HashMap<String, Template>,
    charset: String,
}

impl TemplateEngine {
    pub fn new(charset: &str) -> Self {
        Self {
            templates: HashMap::new(),
            charset: charset.to_string(),
        }
    }

    /// Load every `*.{extension}` file below `dir`.
    ///
    /// Names are the relative path without extension, `/`-separated, so
    /// `templates/demos/inputs.html` becomes `demos/inputs`.
    pub fn load(dir: &Path, extension: &str, charset: &str) -> Result<Self, TemplateError> {
        let mut engine = Self::new(charset);

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(extension)
            {
                continue;
            }

            let Ok(relative) = path.strip_prefix(dir) else {
                continue;
            };
            let name = relative
                .with_extension("")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");

            let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
                path: path.display().to_string(),
                source,
            })?;
            engine.insert(&name, &source)?;
        }

        logger::log_templates_loaded(engine.len(), &dir.display().to_string());
        Ok(engine)
    }

    /// Build an engine from in-memory `(name, source)` pairs
    pub fn from_sources<'s, I>(sources: I, charset: &str) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (&'s str, &'s str)>,
    {
        let mut engine = Self::new(charset);
        for (name, source) in sources {
            engine.insert(name, source)?;
        }
        Ok(engine)
    }

    /// Parse and add (or replace) a template
    pub fn insert(&mut self, name: &str, source: &str) -> Result<(), TemplateError> {
        let template = Template::parse(name, source)?;
        self.templates.insert(name.to_string(), template);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Render a loaded template, passing every placeholder through `filter`
    pub fn render(
        &self,
        name: &str,
        data: &Map<String, Value>,
        filter: &dyn Filter,
    ) -> Result<String, TemplateError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        Ok(template.render(data, filter, &self.charset))
    }

    /// Render a source string that is not part of the loaded set
    pub fn render_source(
        &self,
        name: &str,
        source: &str,
        data: &Map<String, Value>,
        filter: &dyn Filter,
    ) -> Result<String, TemplateError> {
        Ok(Template::parse(name, source)?.render(data, filter, &self.charset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_parse_segments() {
        let template = Template::parse("t", "<p>{{ lname }}, {{fname}}</p>").unwrap();
        assert_eq!(
            template.segments,
            vec![
                Segment::Text("<p>".to_string()),
                Segment::Placeholder("lname".to_string()),
                Segment::Text(", ".to_string()),
                Segment::Placeholder("fname".to_string()),
                Segment::Text("</p>".to_string()),
            ]
        );
    }

    #[test]
    fn test_unclosed_placeholder() {
        let err = Template::parse("broken", "ok {{ fine }} then {{ oops").unwrap_err();
        match err {
            TemplateError::Unclosed { name, offset } => {
                assert_eq!(name, "broken");
                assert_eq!(offset, 19);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_single_braces_are_text() {
        let engine = TemplateEngine::from_sources([("js", "function f() { return {a: {{n}}}; }")], "UTF-8")
            .unwrap();
        let out = engine.render("js", &data(json!({"n": 1})), &Sanitize).unwrap();
        assert_eq!(out, "function f() { return {a: 1}; }");
    }

    #[test]
    fn test_render_sanitizes_by_default() {
        let engine =
            TemplateEngine::from_sources([("page", "<b>{{name}}</b>{{missing}}")], "UTF-8").unwrap();
        let out = engine
            .render("page", &data(json!({"name": "<i>Joe</i>"})), &Sanitize)
            .unwrap();
        assert_eq!(out, "<b>&lt;i&gt;Joe&lt;/i&gt;</b>");
    }

    #[test]
    fn test_dotted_lookup() {
        let fields = data(json!({
            "user": {"name": "Joni"},
            "list": ["One", "Two"],
            "a.b": "literal"
        }));
        assert_eq!(lookup(&fields, "user.name"), Some(&json!("Joni")));
        assert_eq!(lookup(&fields, "list.1"), Some(&json!("Two")));
        assert_eq!(lookup(&fields, "a.b"), Some(&json!("literal")));
        assert_eq!(lookup(&fields, "list.9"), None);
        assert_eq!(lookup(&fields, "user.name.first"), None);
    }

    #[test]
    fn test_filter_receives_charset_and_label() {
        let engine = TemplateEngine::from_sources([("t", "[{{x}}]")], "ISO-8859-1").unwrap();
        let seen = |value: &Value, charset: &str, label: &str| format!("{label}:{charset}:{value}");
        let out = engine.render("t", &data(json!({"x": 5})), &seen).unwrap();
        assert_eq!(out, "[x:ISO-8859-1:5]");
    }

    #[test]
    fn test_not_found() {
        let engine = TemplateEngine::new("UTF-8");
        assert!(matches!(
            engine.render("nope", &Map::new(), &Sanitize),
            Err(TemplateError::NotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("demos")).unwrap();
        std::fs::write(dir.path().join("demo.html"), "<p>{{name}}</p>").unwrap();
        std::fs::write(dir.path().join("demos/inputs.html"), "<i>{{age}}</i>").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "{{ignored").unwrap();

        let engine = TemplateEngine::load(dir.path(), "html", "UTF-8").unwrap();
        assert_eq!(engine.len(), 2);
        assert!(engine.contains("demo"));
        assert!(engine.contains("demos/inputs"));
        assert!(!engine.contains("notes"));

        let out = engine
            .render("demos/inputs", &data(json!({"age": "27"})), &Sanitize)
            .unwrap();
        assert_eq!(out, "<i>27</i>");
    }
}
