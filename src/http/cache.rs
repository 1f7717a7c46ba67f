//! Conditional request support.
//!
//! `ETag` values are content hashes, so a 304 is only returned when the
//! client's cached copy is byte-identical to what would be served.
//! Time-based validation (`Last-Modified` / `If-Modified-Since`) works at
//! second granularity, the precision an HTTP-date carries.

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// Compute the quoted `ETag` for a body, e.g. `"9f86d081"`.
pub fn etag_for(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Whether an `If-None-Match` header matches the current `ETag`.
///
/// Handles comma-separated lists and the `*` wildcard. A match means the
/// client cache is current and a 304 should be returned.
pub fn none_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client| {
        client.split(',').any(|e| {
            let e = e.trim();
            e == etag || e == "*"
        })
    })
}

/// Format a filesystem timestamp as an HTTP-date (IMF-fixdate), e.g.
/// `Thu, 01 Jan 1970 00:00:00 GMT`.
pub fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// Whether an `If-Modified-Since` header proves the client copy is current.
///
/// True when the header parses as an HTTP-date and the file has not been
/// modified since, comparing whole seconds. Unparseable headers validate
/// nothing.
pub fn unmodified_since(if_modified_since: Option<&str>, mtime: SystemTime) -> bool {
    let Some(header) = if_modified_since else {
        return false;
    };
    let Ok(since) = DateTime::parse_from_rfc2822(header) else {
        return false;
    };
    DateTime::<Utc>::from(mtime).timestamp() <= since.timestamp()
}
