//! Validation for pointers that come from configuration.

use crate::{parse_json_pointer, JsonPointerError, Path};

/// Maximum allowed pointer string length.
const MAX_POINTER_LENGTH: usize = 1024;

/// Validate a pointer string: empty, or starting with `/`, and not longer
/// than 1024 bytes.
///
/// ```
/// use levelboard_json_pointer::validate_json_pointer;
///
/// validate_json_pointer("").unwrap();
/// validate_json_pointer("/spec/query/spec/parsedQuery").unwrap();
/// validate_json_pointer("spec/query").unwrap_err();
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), JsonPointerError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(JsonPointerError::PointerInvalid(pointer.to_string()));
    }
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(JsonPointerError::PointerTooLong);
    }
    Ok(())
}

/// [`validate_json_pointer`] followed by [`parse_json_pointer`].
pub fn parse_validated(pointer: &str) -> Result<Path, JsonPointerError> {
    validate_json_pointer(pointer)?;
    Ok(parse_json_pointer(pointer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_relative_pointer() {
        assert_eq!(
            validate_json_pointer("spec"),
            Err(JsonPointerError::PointerInvalid("spec".into()))
        );
    }

    #[test]
    fn test_validate_long_pointer() {
        let long_pointer = "/".to_string() + &"a".repeat(2000);
        assert_eq!(
            validate_json_pointer(&long_pointer),
            Err(JsonPointerError::PointerTooLong)
        );
    }

    #[test]
    fn test_parse_validated() {
        assert_eq!(parse_validated("/spec/layout").unwrap(), vec!["spec", "layout"]);
        assert!(parse_validated("layout").is_err());
    }
}
