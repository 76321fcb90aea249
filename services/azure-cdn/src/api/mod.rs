//! Typed management api operations.
//!
//! Each operation is a thin wrapper around [`Client::send`](crate::Client::send).

use percent_encoding::utf8_percent_encode;

use crate::constants::PATH_SEGMENT_ENCODE_SET;

mod certificate;
pub use certificate::*;
mod content;
pub use content::*;
mod endpoint;
pub use endpoint::*;
mod operation;
mod traffic;
pub use traffic::*;

/// Path of an endpoint scoped resource, `suffix` must start with `/` or be empty.
fn endpoint_path(endpoint_id: &str, suffix: &str) -> String {
    format!("/endpoints/{}{suffix}", segment(endpoint_id))
}

/// Encode a single path segment.
fn segment(s: &str) -> String {
    utf8_percent_encode(s, &PATH_SEGMENT_ENCODE_SET).to_string()
}
