//! Static file serving.
//!
//! Maps request paths onto the configured root directory, with index-file
//! fallback for directories and canonicalization-based traversal protection.
//! Built responses honor conditional (`If-None-Match`) and Range requests.

use crate::config::FilesConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, url, RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

/// A file resolved and read from the served root.
pub struct ServedFile {
    pub content: Vec<u8>,
    pub content_type: &'static str,
    /// Filesystem mtime, when the platform reports one.
    pub modified: Option<SystemTime>,
}

/// Serve the request path from the configured root.
pub async fn serve(ctx: &RequestContext<'_>, files: &FilesConfig) -> Response<Full<Bytes>> {
    match load(files, ctx.path).await {
        Some(file) => respond_with_file(&file, ctx),
        None => http::not_found(),
    }
}

/// Resolve and read the file a request path maps to.
///
/// Returns `None` for anything that should be a 404: missing files,
/// directories without an index file, undecodable paths, and paths
/// escaping the root.
pub async fn load(files: &FilesConfig, request_path: &str) -> Option<ServedFile> {
    // Percent-escapes decode first, so /hello%20world.html can find its
    // file and so %2e%2e cannot sneak past the dot-dot neutralization
    let decoded = url::percent_decode(request_path.trim_start_matches('/'))?;
    let relative = decoded.replace("..", "");

    let root = Path::new(&files.root);
    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Served root not found or inaccessible '{}': {e}",
                files.root
            ));
            return None;
        }
    };

    let mut file_path = root.join(&relative);

    // Directory requests fall back to the first existing index file
    if file_path.is_dir() || relative.is_empty() || relative.ends_with('/') {
        file_path = find_index(&file_path, &files.index_files)?;
    }

    // Missing files are ordinary 404s, not worth a warning
    let file_canonical = file_path.canonicalize().ok()?;
    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            file_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_canonical.display()
            ));
            return None;
        }
    };

    let modified = fs::metadata(&file_canonical)
        .await
        .ok()
        .and_then(|m| m.modified().ok());

    Some(ServedFile {
        content,
        content_type: mime::from_extension(file_canonical.extension().and_then(|e| e.to_str())),
        modified,
    })
}

fn find_index(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    index_files
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Build the response for a loaded file: 304 when the client's validators
/// are current, 206/416 for Range requests, otherwise a full 200.
fn respond_with_file(file: &ServedFile, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    let data = &file.content;
    let etag = cache::etag_for(data);
    let total_size = data.len();

    // If-None-Match takes precedence; If-Modified-Since is only consulted
    // when the client sent no ETag validator
    if ctx.if_none_match.is_some() {
        if cache::none_match(ctx.if_none_match.as_deref(), &etag) {
            return http::response::not_modified(&etag);
        }
    } else if let Some(mtime) = file.modified {
        if cache::unmodified_since(ctx.if_modified_since.as_deref(), mtime) {
            return http::response::not_modified(&etag);
        }
    }

    let last_modified = file.modified.map(cache::http_date);

    match http::evaluate_range(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Partial(range) => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(data[range.start..=range.end].to_vec())
            };
            http::response::partial_response(
                body,
                file.content_type,
                &etag,
                last_modified.as_deref(),
                range.start,
                range.end,
                total_size,
                ctx.is_head,
            )
        }
        RangeOutcome::Unsatisfiable => http::range_not_satisfiable(total_size),
        RangeOutcome::Full => http::response::file_response(
            data,
            file.content_type,
            &etag,
            last_modified.as_deref(),
            ctx.is_head,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(name: &str) -> (PathBuf, FilesConfig) {
        let dir = std::env::temp_dir().join(format!(
            "isoserve-static-{}-{name}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let files = FilesConfig {
            root: dir.to_string_lossy().into_owned(),
            index_files: vec!["index.html".to_string(), "index.htm".to_string()],
        };
        (dir, files)
    }

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
            if_none_match: None,
            if_modified_since: None,
            range_header: None,
        }
    }

    #[tokio::test]
    async fn serves_on_disk_bytes_with_content_type() {
        let (dir, files) = temp_root("bytes");
        std::fs::write(dir.join("index.html"), "<html></html>").unwrap();

        let file = load(&files, "/index.html").await.unwrap();
        assert_eq!(file.content, b"<html></html>");
        assert_eq!(file.content_type, "text/html; charset=utf-8");
        assert!(file.modified.is_some());
    }

    #[tokio::test]
    async fn percent_encoded_path_reaches_its_file() {
        let (dir, files) = temp_root("encoded");
        std::fs::write(dir.join("hello world.html"), "<p>hi</p>").unwrap();

        let file = load(&files, "/hello%20world.html").await.unwrap();
        assert_eq!(file.content, b"<p>hi</p>");
        assert_eq!(file.content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn directory_request_uses_index_file() {
        let (dir, files) = temp_root("index");
        std::fs::write(dir.join("index.html"), "<html></html>").unwrap();

        let file = load(&files, "/").await.unwrap();
        assert_eq!(file.content, b"<html></html>");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let (_dir, files) = temp_root("missing");
        assert!(load(&files, "/nope.js").await.is_none());

        let resp = serve(&ctx("/nope.js"), &files).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn dot_dot_segments_cannot_escape_the_root() {
        let (dir, files) = temp_root("traversal");
        std::fs::write(dir.join("index.html"), "safe").unwrap();

        assert!(load(&files, "/../../etc/passwd").await.is_none());
        assert!(load(&files, "/..%2F..%2Fetc/passwd").await.is_none());
        // Encoded dot-dot decodes before the guard and is neutralized too
        assert!(load(&files, "/%2e%2e/%2e%2e/etc/passwd").await.is_none());
    }

    #[tokio::test]
    async fn matching_etag_returns_304() {
        let (dir, files) = temp_root("etag");
        std::fs::write(dir.join("app.js"), "console.log(1)").unwrap();

        let etag = cache::etag_for(b"console.log(1)");
        let context = RequestContext {
            path: "/app.js",
            is_head: false,
            if_none_match: Some(etag.clone()),
            if_modified_since: None,
            range_header: None,
        };
        let resp = serve(&context, &files).await;
        assert_eq!(resp.status(), 304);
        assert_eq!(resp.headers().get("ETag").unwrap().to_str().unwrap(), etag);
    }

    #[tokio::test]
    async fn fresh_if_modified_since_returns_304() {
        let (dir, files) = temp_root("ims");
        std::fs::write(dir.join("app.js"), "console.log(2)").unwrap();

        // A validator from the future is certainly as fresh as the file
        let future = std::time::SystemTime::now() + std::time::Duration::from_secs(3600);
        let context = RequestContext {
            path: "/app.js",
            is_head: false,
            if_none_match: None,
            if_modified_since: Some(cache::http_date(future)),
            range_header: None,
        };
        let resp = serve(&context, &files).await;
        assert_eq!(resp.status(), 304);
    }

    #[tokio::test]
    async fn stale_if_modified_since_returns_full_body() {
        let (dir, files) = temp_root("ims-stale");
        std::fs::write(dir.join("app.js"), "console.log(3)").unwrap();

        let context = RequestContext {
            path: "/app.js",
            is_head: false,
            if_none_match: None,
            if_modified_since: Some("Thu, 01 Jan 1970 00:00:00 GMT".to_string()),
            range_header: None,
        };
        let resp = serve(&context, &files).await;
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().get("Last-Modified").is_some());
    }

    #[tokio::test]
    async fn range_request_gets_partial_content() {
        let (dir, files) = temp_root("range");
        std::fs::write(dir.join("data.bin"), "0123456789").unwrap();

        let context = RequestContext {
            path: "/data.bin",
            is_head: false,
            if_none_match: None,
            if_modified_since: None,
            range_header: Some("bytes=2-5".to_string()),
        };
        let resp = serve(&context, &files).await;
        assert_eq!(resp.status(), 206);
        assert_eq!(
            resp.headers().get("Content-Range").unwrap(),
            "bytes 2-5/10"
        );
    }

    #[tokio::test]
    async fn unsatisfiable_range_gets_416() {
        let (dir, files) = temp_root("range416");
        std::fs::write(dir.join("data.bin"), "0123456789").unwrap();

        let context = RequestContext {
            path: "/data.bin",
            is_head: false,
            if_none_match: None,
            if_modified_since: None,
            range_header: Some("bytes=100-".to_string()),
        };
        let resp = serve(&context, &files).await;
        assert_eq!(resp.status(), 416);
    }

    #[tokio::test]
    async fn head_keeps_length_and_drops_body() {
        let (dir, files) = temp_root("head");
        std::fs::write(dir.join("page.html"), "<html></html>").unwrap();

        let context = RequestContext {
            path: "/page.html",
            is_head: true,
            if_none_match: None,
            if_modified_since: None,
            range_header: None,
        };
        let resp = serve(&context, &files).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "13");
    }
}
