//! Response decoder with optional key-path narrowing.

use json_keypath::parse_key_path;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DecodeError;

/// Stateless decoder from raw JSON payload bytes to a caller-supplied shape.
///
/// Owns no state between calls, so a single instance is safe to share
/// across callers without coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseDecoder;

impl ResponseDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode `payload` as `T`, optionally narrowing into the nested field
    /// addressed by `key_path` first.
    ///
    /// Without a key path the whole payload must conform to `T`. With one,
    /// the payload is parsed generically, the path is walked object by
    /// object, and only the addressed sub-value is decoded as `T`. On any
    /// failure the caller gets an error, never a partially populated value.
    pub fn decode<T: DeserializeOwned>(
        &self,
        payload: &[u8],
        key_path: Option<&str>,
    ) -> Result<T, DecodeError> {
        match key_path {
            None => serde_json::from_slice(payload).map_err(DecodeError::ShapeMismatch),
            Some(path) => self.decode_nested(payload, path),
        }
    }

    fn decode_nested<T: DeserializeOwned>(
        &self,
        payload: &[u8],
        key_path: &str,
    ) -> Result<T, DecodeError> {
        let segments = parse_key_path(key_path)?;
        let root: Value =
            serde_json::from_slice(payload).map_err(DecodeError::MalformedPayload)?;

        // parse_key_path rejects empty paths, so split_last always succeeds
        let (terminal, intermediate) = match segments.split_last() {
            Some(parts) => parts,
            None => return Err(DecodeError::MissingTerminalKey(key_path.to_string())),
        };

        let mut current = &root;
        for segment in intermediate {
            let next = match current {
                Value::Object(map) => map.get(segment.as_str()),
                _ => None,
            };
            current = match next {
                Some(value @ Value::Object(_)) => value,
                _ => return Err(DecodeError::MissingIntermediateKey(segment.clone())),
            };
        }

        let target = match current {
            Value::Object(map) => map.get(terminal.as_str()),
            _ => None,
        };
        match target {
            Some(value) => T::deserialize(value).map_err(DecodeError::ShapeMismatch),
            None => Err(DecodeError::MissingTerminalKey(terminal.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_payload_only_reported_when_narrowing() {
        let decoder = ResponseDecoder::new();
        let err = decoder
            .decode::<Value>(b"not json", Some("data"))
            .unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPayload(_)));

        // without a key path the same bytes surface as a shape failure
        let err = decoder.decode::<Value>(b"not json", None).unwrap_err();
        assert!(matches!(err, DecodeError::ShapeMismatch(_)));
    }

    #[test]
    fn intermediate_segment_must_be_an_object() {
        let decoder = ResponseDecoder::new();
        let payload = serde_json::to_vec(&json!({"data": "scalar"})).unwrap();
        let err = decoder
            .decode::<Value>(&payload, Some("data.items"))
            .unwrap_err();
        assert!(matches!(err, DecodeError::MissingIntermediateKey(seg) if seg == "data"));
    }

    #[test]
    fn empty_key_path_is_rejected() {
        let decoder = ResponseDecoder::new();
        let err = decoder.decode::<Value>(b"{}", Some("")).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidKeyPath(_)));
    }
}
