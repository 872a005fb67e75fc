//! Webhook protocol
//!
//! Request/response shapes exchanged with the skill backend, plus the pure
//! functions that build and validate them.

mod codec;
mod types;

pub use codec::{build_request, merge_json, parse_reply, parse_response};
pub use types::*;
