//! Cross-origin isolation headers.
//!
//! Every response leaves the server with three fixed headers that opt the
//! served pages into a cross-origin isolated browsing context. Browsers
//! require that context for `SharedArrayBuffer` and high-resolution timers.

use hyper::header::{HeaderName, HeaderValue};
use hyper::HeaderMap;

/// Headers appended to every response, in emission order.
///
/// The `Access-Control-Allow-Origin: same-origin` value is kept verbatim
/// even though `same-origin` is not a registered ACAO value; isolated
/// contexts are established by the COOP/COEP pair.
pub const ISOLATION_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "same-origin"),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-embedder-policy", "credentialless"),
];

/// Append the isolation headers to a prepared response header map.
///
/// Runs once per response, after the handler has finished building it and
/// before hyper serializes the header block. Applies to every status code,
/// error responses included.
pub fn apply(headers: &mut HeaderMap) {
    for (name, value) in ISOLATION_HEADERS {
        headers.append(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}
