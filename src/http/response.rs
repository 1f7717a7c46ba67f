//! Response builders.
//!
//! One constructor per status the server emits. Builder failures are logged
//! and replaced with a bare response instead of panicking; the isolation
//! headers are attached later by the connection layer, so nothing here
//! needs to know about them.

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// 200 OK for a whole file, with `ETag`, `Last-Modified`, and range
/// advertisement.
pub fn file_response(
    data: &[u8],
    content_type: &str,
    etag: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data.to_owned())
    };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600");
    if let Some(stamp) = last_modified {
        builder = builder.header("Last-Modified", stamp);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// 206 Partial Content for a byte range of a file.
#[allow(clippy::too_many_arguments)]
pub fn partial_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    last_modified: Option<&str>,
    start: usize,
    end: usize,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = end - start + 1;
    let body = if is_head { Bytes::new() } else { data };

    let mut builder = Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Content-Range", format!("bytes {start}-{end}/{total_size}"))
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600");
    if let Some(stamp) = last_modified {
        builder = builder.header("Last-Modified", stamp);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("206", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// 304 Not Modified for a matching `If-None-Match`.
pub fn not_modified(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// 404 Not Found.
pub fn not_found() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// 405 Method Not Allowed for anything besides GET/HEAD/OPTIONS.
pub fn method_not_allowed() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// 204 No Content for OPTIONS.
pub fn options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// 413 Payload Too Large for an oversized declared request body.
pub fn payload_too_large() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// 416 Range Not Satisfiable, advertising the actual size.
pub fn range_not_satisfiable(file_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::from("Range Not Satisfiable")))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(Full::new(Bytes::from("Range Not Satisfiable")))
        })
}

fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_response_sets_caching_headers() {
        let resp = file_response(
            b"<html></html>",
            "text/html; charset=utf-8",
            "\"e1\"",
            Some("Thu, 01 Jan 1970 00:00:00 GMT"),
            false,
        );
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "13");
        assert_eq!(resp.headers().get("Accept-Ranges").unwrap(), "bytes");
        assert_eq!(resp.headers().get("ETag").unwrap(), "\"e1\"");
        assert_eq!(
            resp.headers().get("Last-Modified").unwrap(),
            "Thu, 01 Jan 1970 00:00:00 GMT"
        );
    }

    #[test]
    fn unknown_mtime_omits_last_modified() {
        let resp = file_response(b"payload", "text/plain", "\"e2\"", None, false);
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().get("Last-Modified").is_none());
    }

    #[test]
    fn head_has_length_but_no_body() {
        let resp = file_response(b"payload", "text/plain", "\"e2\"", None, true);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "7");
        // Full<Bytes> body built from Bytes::new()
        assert_eq!(resp.status(), 200);
    }

    #[test]
    fn partial_response_carries_content_range() {
        let resp = partial_response(
            Bytes::from_static(b"cdefg"),
            "application/octet-stream",
            "\"e3\"",
            Some("Thu, 01 Jan 1970 00:00:00 GMT"),
            2,
            6,
            100,
            false,
        );
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers().get("Content-Range").unwrap(), "bytes 2-6/100");
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "5");
        assert!(resp.headers().get("Last-Modified").is_some());
    }

    #[test]
    fn error_statuses() {
        assert_eq!(not_found().status(), 404);
        assert_eq!(method_not_allowed().status(), 405);
        assert_eq!(options_response().status(), 204);
        assert_eq!(payload_too_large().status(), 413);
        let resp = range_not_satisfiable(42);
        assert_eq!(resp.status(), 416);
        assert_eq!(resp.headers().get("Content-Range").unwrap(), "bytes */42");
    }
}
