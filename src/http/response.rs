//! HTTP response building module
//!
//! Provides builders for the status code responses the page router emits,
//! decoupled from wiring logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::ext::ReasonPhrase;
use hyper::{Response, StatusCode};

/// Methods a wired page answers to
pub const ALLOWED_METHODS: &str = "GET, HEAD, POST, OPTIONS";

/// Build 400 Bad Request response
pub fn build_400_response() -> Response<Full<Bytes>> {
    build_plain_response(StatusCode::BAD_REQUEST, "400 Bad Request")
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_plain_response(StatusCode::NOT_FOUND, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "text/plain")
        .header("Allow", ALLOWED_METHODS)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_plain_response(StatusCode::PAYLOAD_TOO_LARGE, "413 Payload Too Large")
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_plain_response(StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error")
}

/// Build OPTIONS response
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn build_plain_response(status: StatusCode, text: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(text)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from(text)))
        })
}

/// Build the response for a handled page or API call.
///
/// `reason` replaces the canonical reason phrase of the HTTP/1 status line,
/// so a handler error reads e.g. `HTTP/1.1 500 Nope`. Codes that are not
/// valid HTTP status codes, and codes whose responses carry no body (1xx,
/// 204, 304), are sent as 500.
pub fn build_page_response(
    code: u16,
    reason: Option<&str>,
    headers: &[(String, String)],
    content: String,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let status = match StatusCode::from_u16(code) {
        Ok(status) if carries_body(status) => status,
        Ok(_) => {
            crate::logger::log_warning(&format!(
                "Status {code} cannot carry a body, sending 500"
            ));
            StatusCode::INTERNAL_SERVER_ERROR
        }
        Err(_) => {
            crate::logger::log_warning(&format!("Invalid status code {code}, sending 500"));
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    let mut builder = Response::builder()
        .status(status)
        .header("Content-Length", content_length);
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(phrase) = reason.and_then(|r| ReasonPhrase::try_from(r.as_bytes()).ok()) {
        builder = builder.extension(phrase);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(status.as_str(), &e);
        build_500_response()
    })
}

fn carries_body(status: StatusCode) -> bool {
    !status.is_informational()
        && status != StatusCode::NO_CONTENT
        && status != StatusCode::NOT_MODIFIED
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
