//! Request dispatch.
//!
//! Entry point for request processing: validates the method and declared
//! body size, extracts the conditional/range headers, and hands the path to
//! the static-file layer. The isolation headers are not applied here; the
//! connection layer attaches them to whatever response comes back.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Per-request information the static-file layer needs.
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let path = req.uri().path();
    let is_head = *method == Method::HEAD;

    // 1. Method gate: static serving is GET/HEAD only
    if let Some(resp) = check_http_method(method) {
        return Ok(resp);
    }

    // 2. Reject oversized declared bodies up front
    if let Some(resp) = check_body_size(&req, state.config.performance.max_body_size) {
        return Ok(resp);
    }

    // 3. Extract conditional and range headers
    let ctx = RequestContext {
        path,
        is_head,
        if_none_match: header_string(&req, "if-none-match"),
        if_modified_since: header_string(&req, "if-modified-since"),
        range_header: header_string(&req, "range"),
    };

    Ok(static_files::serve(&ctx, &state.config.files).await)
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Non-GET/HEAD methods get an early response: 204 for OPTIONS, 405 for
/// everything else.
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::method_not_allowed())
        }
    }
}

/// Reject a request whose declared Content-Length exceeds the configured
/// maximum. Absent or unparseable declarations let the request through; a
/// file server never reads the body anyway.
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let declared = req.headers().get("content-length")?;

    let Ok(size_str) = declared.to_str() else {
        logger::log_warning("Unreadable Content-Length header, ignoring it");
        return None;
    };

    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Declared body of {size} bytes exceeds the {max_body_size} byte limit"
            ));
            Some(http::payload_too_large())
        }
        Ok(_) => None,
        Err(_) => {
            logger::log_warning(&format!(
                "Content-Length '{size_str}' is not a number, skipping size check"
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_head_pass_the_method_gate() {
        assert!(check_http_method(&Method::GET).is_none());
        assert!(check_http_method(&Method::HEAD).is_none());
    }

    #[test]
    fn options_gets_204() {
        let resp = check_http_method(&Method::OPTIONS).unwrap();
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers().get("Allow").unwrap(), "GET, HEAD, OPTIONS");
    }

    #[test]
    fn write_methods_get_405() {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
            let resp = check_http_method(&method).unwrap();
            assert_eq!(resp.status(), 405);
        }
    }

    fn request_with_content_length(value: &str) -> Request<()> {
        Request::builder()
            .method(Method::GET)
            .uri("/index.html")
            .header("content-length", value)
            .body(())
            .unwrap()
    }

    #[test]
    fn oversized_declared_body_gets_413() {
        let req = request_with_content_length("2048");
        let resp = check_body_size(&req, 1024).unwrap();
        assert_eq!(resp.status(), 413);
    }

    #[test]
    fn small_or_absent_declarations_pass() {
        let req = request_with_content_length("512");
        assert!(check_body_size(&req, 1024).is_none());

        let bare = Request::builder().uri("/").body(()).unwrap();
        assert!(check_body_size(&bare, 1024).is_none());
    }

    #[test]
    fn unparseable_declaration_is_skipped() {
        let req = request_with_content_length("a-lot");
        assert!(check_body_size(&req, 1024).is_none());
    }
}
