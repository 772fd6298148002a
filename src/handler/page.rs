//! Per-request page state
//!
//! Collects what a handler and the wiring layer decide about the response
//! (title, layout, assets, headers, status line) before the router turns it
//! into a hyper response.

use html_escape::{encode_double_quoted_attribute, encode_text};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http;

/// A `<script>` tag in the layout head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub src: String,
    pub defer: bool,
}

/// Status line override: `HTTP/1.1 <code> <reason>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub code: u16,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    /// Wrap the body in the HTML layout
    pub layout: bool,
    scripts: Vec<Script>,
    styles: Vec<String>,
    headers: Vec<(String, String)>,
    status: Option<StatusLine>,
}

impl Page {
    pub fn new(content_type: &str, layout: bool) -> Self {
        Self {
            title: String::new(),
            layout,
            scripts: Vec::new(),
            styles: Vec::new(),
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            status: None,
        }
    }

    /// Add a script once; a repeated `src` keeps its first position
    pub fn add_script(&mut self, src: &str, defer: bool) {
        if self.scripts.iter().any(|s| s.src == src) {
            return;
        }
        self.scripts.push(Script {
            src: src.to_string(),
            defer,
        });
    }

    pub fn add_style(&mut self, href: &str) {
        if !self.styles.iter().any(|s| s == href) {
            self.styles.push(href.to_string());
        }
    }

    /// Set a header, replacing any earlier value with the same name
    pub fn header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_status(&mut self, code: u16, reason: &str) {
        self.status = Some(StatusLine {
            code,
            reason: reason.to_string(),
        });
    }

    pub const fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    /// The final document: `body` wrapped in the layout when enabled
    pub fn render(&self, body: &str) -> String {
        if !self.layout {
            return body.to_string();
        }

        let mut head = String::new();
        for href in &self.styles {
            head.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">\n",
                encode_double_quoted_attribute(href)
            ));
        }
        for script in &self.scripts {
            head.push_str(&format!(
                "<script src=\"{}\"{}></script>\n",
                encode_double_quoted_attribute(&script.src),
                if script.defer { " defer" } else { "" }
            ));
        }

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{head}</head>\n<body>\n{body}\n</body>\n</html>\n",
            encode_text(&self.title)
        )
    }

    pub fn into_response(self, body: &str, is_head: bool) -> Response<Full<Bytes>> {
        let content = self.render(body);
        let (code, reason) = self
            .status
            .as_ref()
            .map_or((200, None), |s| (s.code, Some(s.reason.as_str())));
        http::build_page_response(code, reason, &self.headers, content, is_head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_wraps_body() {
        let mut page = Page::new("text/html; charset=utf-8", true);
        page.title = "Wires <Demo>".to_string();
        page.add_script("/js/alpine.min.js", true);
        page.add_script("/js/alpine.min.js", false);
        page.add_style("/css/app.css");

        let html = page.render("<div>hi</div>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Wires &lt;Demo&gt;</title>"));
        assert!(html.contains("<script src=\"/js/alpine.min.js\" defer></script>"));
        assert_eq!(html.matches("<script").count(), 1);
        assert!(html.contains("<link rel=\"stylesheet\" href=\"/css/app.css\">"));
        assert!(html.contains("<body>\n<div>hi</div>\n</body>"));
    }

    #[test]
    fn test_no_layout_is_body_only() {
        let mut page = Page::new("application/json", false);
        page.add_script("/js/alpine.min.js", true);
        assert_eq!(page.render(r#"{"a":1}"#), r#"{"a":1}"#);
    }

    #[test]
    fn test_header_replaces_case_insensitively() {
        let mut page = Page::new("text/html; charset=utf-8", true);
        page.header("content-type", "application/json");
        assert_eq!(page.header_value("Content-Type"), Some("application/json"));
        assert_eq!(page.headers.len(), 1);
    }

    #[test]
    fn test_into_response_uses_status_line() {
        let mut page = Page::new("application/json", false);
        page.set_status(503, "Busy");
        let resp = page.into_response(r#"{"code":503,"error":"Busy"}"#, false);
        assert_eq!(resp.status().as_u16(), 503);
        assert_eq!(resp.headers()["content-type"], "application/json");
    }
}
