//! Response decoder error type.

use json_keypath::KeyPathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// Payload bytes are not valid JSON at all.
    #[error("malformed payload: {0}")]
    MalformedPayload(serde_json::Error),
    /// The key path string itself is unusable.
    #[error("invalid key path: {0}")]
    InvalidKeyPath(#[from] KeyPathError),
    /// A non-terminal path segment is absent or not an object.
    #[error("missing intermediate key `{0}`")]
    MissingIntermediateKey(String),
    /// The final path segment is absent.
    #[error("missing key `{0}`")]
    MissingTerminalKey(String),
    /// Payload (or the narrowed sub-value) does not conform to the target shape.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(serde_json::Error),
}
