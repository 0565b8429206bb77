//! Flexible JSON response decoding.
//!
//! The decoder turns a raw byte payload into a caller-supplied shape,
//! optionally narrowing into a nested field first via a dotted key path
//! (see the `json-keypath` crate). Timestamp fields get an ordered
//! fallback chain of accepted wire formats, and a lenient `User`
//! constructor demonstrates element-level tolerance for role lists.

pub mod decoder;
pub mod error;
pub mod timestamp;
pub mod user;

pub use decoder::ResponseDecoder;
pub use error::DecodeError;
pub use timestamp::{parse_timestamp, DatePolicy, TimestampParseError};
pub use user::{Role, User};
