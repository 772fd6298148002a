//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! body limits, and dispatching to the page handler registered for the path.

use crate::config::AppState;
use crate::handler::Page;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::wires::{RequestMode, WireRequest, Wires};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, HeaderName, HeaderValue, REFERER, SERVER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    logger::log_headers_count(parts.headers.len(), state.config.logging.show_headers);

    // 1. Check HTTP method, 2. check declared body size
    let precheck = check_http_method(&parts.method)
        .or_else(|| check_body_size(&parts.headers, state.config.http.max_body_size));

    let (mut response, mode) = match precheck {
        Some(resp) => (resp, None),
        // 3. Read the body (POST only) and dispatch
        None => match read_body(&parts.method, body, state.config.http.max_body_size).await {
            Ok(bytes) => {
                let request = WireRequest {
                    method: &parts.method,
                    path: parts.uri.path(),
                    query: parts.uri.query(),
                    body: &bytes,
                };
                dispatch(&state, &request)
            }
            Err(resp) => (resp, None),
        },
    };

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if state.access_log_enabled() {
        log_access(&state, &parts, peer_addr, &response, mode, started);
    }
    Ok(response)
}

/// Run the handler registered for the request path.
///
/// Returns the response and, when a handler ran, the mode it ran in.
pub fn dispatch(
    state: &AppState,
    request: &WireRequest<'_>,
) -> (Response<Full<Bytes>>, Option<RequestMode>) {
    let endpoint = request.path.trim_matches('/');
    let Some(handler) = state.handlers.get(endpoint) else {
        logger::log_debug(&format!("No handler for {}", request.path));
        return (http::build_404_response(), None);
    };

    let mut page = Page::new(
        &state.config.http.default_content_type,
        state.config.wires.layout,
    );
    let (result, mode) = {
        let mut wires = Wires::init(request, &mut page, &state.templates, &state.config.wires);
        let mode = wires.mode();
        (handler(&mut wires), mode)
    };

    let response = match result {
        Ok(body) => page.into_response(&body, *request.method == Method::HEAD),
        Err(e) => {
            logger::log_error(&format!("/{endpoint}: {e}"));
            http::build_500_response()
        }
    };
    (response, Some(mode))
}

/// Check HTTP method and answer anything other than GET/HEAD/POST directly
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD | Method::POST => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Collect a POST body, enforcing the size limit on chunked bodies too
async fn read_body<B>(
    method: &Method,
    body: B,
    max_body_size: u64,
) -> Result<Bytes, Response<Full<Bytes>>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    if *method != Method::POST {
        return Ok(Bytes::new());
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => {
            logger::log_error(&format!("Request body too large (max: {max_body_size})"));
            Err(http::build_413_response())
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(http::build_400_response())
        }
    }
}

fn log_access(
    state: &AppState,
    parts: &Parts,
    peer_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    mode: Option<RequestMode>,
    started: Instant,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = http_version(parts.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header_string(&parts.headers, &REFERER);
    entry.user_agent = header_string(&parts.headers, &USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry.wire_mode = mode.map(RequestMode::as_str);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

fn header_string(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
