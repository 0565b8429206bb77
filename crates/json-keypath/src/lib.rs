//! Dotted key-path utilities.
//!
//! A key path such as `"data.items"` addresses a nested field inside a JSON
//! object: each dot-separated segment names one object key, outermost first.
//! This crate only handles the textual form; traversal over parsed values
//! lives with the consumers.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyPathError {
    #[error("key path contains an empty segment")]
    EmptySegment,
}

/// Parse a dotted key path into its ordered segments.
///
/// Examples:
/// - `"data" -> ["data"]`
/// - `"data.items" -> ["data", "items"]`
///
/// Empty segments are rejected, so `""`, `".data"`, `"data."`, and
/// `"data..items"` all fail with [`KeyPathError::EmptySegment`].
pub fn parse_key_path(path: &str) -> Result<Vec<String>, KeyPathError> {
    let mut segments = Vec::new();
    for segment in path.split('.') {
        if segment.is_empty() {
            return Err(KeyPathError::EmptySegment);
        }
        segments.push(segment.to_string());
    }
    Ok(segments)
}

/// Format ordered segments back into a dotted key path.
pub fn format_key_path(segments: &[String]) -> String {
    segments.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_and_format_matrix() {
        assert_eq!(parse_key_path("data").unwrap(), vec!["data".to_string()]);
        assert_eq!(
            parse_key_path("data.items.0").unwrap(),
            vec!["data".to_string(), "items".to_string(), "0".to_string()]
        );
        assert_eq!(
            format_key_path(&["data".to_string(), "items".to_string()]),
            "data.items"
        );
        assert_eq!(parse_key_path(""), Err(KeyPathError::EmptySegment));
        assert_eq!(parse_key_path(".data"), Err(KeyPathError::EmptySegment));
        assert_eq!(parse_key_path("data."), Err(KeyPathError::EmptySegment));
        assert_eq!(
            parse_key_path("data..items"),
            Err(KeyPathError::EmptySegment)
        );
    }

    proptest! {
        #[test]
        fn format_then_parse_roundtrips(
            segments in prop::collection::vec("[^.]{1,12}", 1..6)
        ) {
            let formatted = format_key_path(&segments);
            prop_assert_eq!(parse_key_path(&formatted).unwrap(), segments);
        }
    }
}
