//! Request mode resolution
//!
//! A request is an API call from already-rendered markup when it is a `POST`
//! whose query string carries the marker key; anything else renders the
//! page.

use hyper::Method;
use url::form_urlencoded;

use crate::config::WiresConfig;
use crate::handler::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    InitialRender,
    ApiCall,
}

impl RequestMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InitialRender => "render",
            Self::ApiCall => "api",
        }
    }

    /// Tell the host page how to respond in this mode
    pub fn apply(self, page: &mut Page, settings: &WiresConfig) {
        match self {
            Self::ApiCall => {
                page.header("Content-Type", "application/json");
                page.layout = false;
            }
            Self::InitialRender => page.add_script(&settings.script_src, true),
        }
    }
}

pub fn resolve(query_has_marker: bool, method: &Method) -> RequestMode {
    if query_has_marker && *method == Method::POST {
        RequestMode::ApiCall
    } else {
        RequestMode::InitialRender
    }
}

/// Whether `marker` is one of the query's keys; its value is ignored.
///
/// Keys are form-decoded first, so `%5Fwired%5F` matches `_wired_`.
pub fn query_has_marker(query: Option<&str>, marker: &str) -> bool {
    query.is_some_and(|q| form_urlencoded::parse(q.as_bytes()).any(|(key, _)| key == marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_truth_table() {
        assert_eq!(resolve(true, &Method::POST), RequestMode::ApiCall);
        assert_eq!(resolve(true, &Method::GET), RequestMode::InitialRender);
        assert_eq!(resolve(false, &Method::POST), RequestMode::InitialRender);
        assert_eq!(resolve(false, &Method::GET), RequestMode::InitialRender);
        assert_eq!(resolve(true, &Method::PUT), RequestMode::InitialRender);
    }

    #[test]
    fn test_query_has_marker() {
        assert!(query_has_marker(Some("_wired_"), "_wired_"));
        assert!(query_has_marker(Some("_wired_="), "_wired_"));
        assert!(query_has_marker(Some("a=1&_wired_=yes"), "_wired_"));
        assert!(!query_has_marker(Some("a=_wired_"), "_wired_"));
        assert!(!query_has_marker(Some("_wired_x"), "_wired_"));
        assert!(!query_has_marker(None, "_wired_"));
        assert!(!query_has_marker(Some(""), "_wired_"));
    }

    #[test]
    fn test_query_marker_is_decoded() {
        assert!(query_has_marker(Some("%5Fwired%5F"), "_wired_"));
        assert!(query_has_marker(Some("a=1&_wired%5f=1"), "_wired_"));
        assert!(query_has_marker(Some("my+marker"), "my marker"));
        assert!(!query_has_marker(Some("%5Fwired"), "_wired_"));
    }

    #[test]
    fn test_api_call_suppresses_layout() {
        let settings = WiresConfig::default();
        let mut page = Page::new("text/html; charset=utf-8", true);
        RequestMode::ApiCall.apply(&mut page, &settings);
        assert!(!page.layout);
        assert_eq!(page.header_value("content-type"), Some("application/json"));
        assert!(page.scripts().is_empty());
    }

    #[test]
    fn test_initial_render_adds_deferred_script() {
        let settings = WiresConfig::default();
        let mut page = Page::new("text/html; charset=utf-8", true);
        RequestMode::InitialRender.apply(&mut page, &settings);
        assert!(page.layout);
        assert_eq!(page.scripts().len(), 1);
        assert_eq!(page.scripts()[0].src, settings.script_src);
        assert!(page.scripts()[0].defer);
    }
}
