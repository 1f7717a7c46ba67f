//! Request handling module
//!
//! Turns an incoming HTTP request into a response: method gate, then
//! static-file lookup under the configured root.

pub mod router;
pub mod static_files;

pub use router::{handle_request, RequestContext};
