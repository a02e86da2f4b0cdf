use std::num::NonZeroU64;

use crate::error::internal::InternalError;

/// Parses a Discord snowflake stored as a string
///
/// Snowflakes are never zero, so `"0"` is rejected like any other invalid value.
///
/// # Arguments
/// - `value` - The string to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed the snowflake
/// - `Err(InternalError::ParseStringId)` - The string is not a valid non-zero `u64`
pub fn parse_u64_from_string(value: &str) -> Result<u64, InternalError> {
    value
        .trim()
        .parse::<NonZeroU64>()
        .map(NonZeroU64::get)
        .map_err(|e| InternalError::ParseStringId {
            value: value.to_string(),
            source: e,
        })
}

/// Parses an optional snowflake, treating an absent value as `None`.
///
/// # Arguments
/// - `value` - Optional string holding a snowflake
///
/// # Returns
/// - `Ok(Some(u64))` - Value was present and parsed
/// - `Ok(None)` - Value was absent
/// - `Err(InternalError::ParseStringId)` - Value was present but not a valid `u64`
pub fn parse_optional_u64(value: Option<&str>) -> Result<Option<u64>, InternalError> {
    value.map(parse_u64_from_string).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snowflake() {
        assert_eq!(parse_u64_from_string("123456789012345678").unwrap(), 123456789012345678);
    }

    #[test]
    fn rejects_non_numeric() {
        let err = parse_u64_from_string("abc").unwrap_err();
        assert!(matches!(err, InternalError::ParseStringId { ref value, .. } if value == "abc"));
    }

    #[test]
    fn rejects_zero() {
        assert!(parse_u64_from_string("0").is_err());
    }

    #[test]
    fn optional_none_is_none() {
        assert_eq!(parse_optional_u64(None).unwrap(), None);
        assert_eq!(parse_optional_u64(Some("42")).unwrap(), Some(42));
    }
}
