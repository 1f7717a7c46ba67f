//! HTTP protocol layer.
//!
//! Protocol-level helpers shared by the request handler: MIME lookup,
//! Range parsing, conditional requests, and response builders. Nothing in
//! here knows about the filesystem or the isolation headers.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;
pub mod url;

pub use range::{evaluate as evaluate_range, RangeOutcome};
pub use response::{
    method_not_allowed, not_found, options_response, payload_too_large, range_not_satisfiable,
};
