use crate::error::{AbookError, AbookResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> AbookResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(AbookError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Same as `is_blank` for fields that may be absent altogether.
pub fn is_blank_optional(value: Option<&str>) -> bool {
    value.map(is_blank).unwrap_or(true)
}

/// Checks the `DDD-DDD-DDDD` phone number shape.
pub fn is_phone_number(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 12
        && bytes.iter().enumerate().all(|(i, b)| match i {
            3 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_accepts_valid_string() {
        assert_eq!(non_blank("hello", "name").unwrap(), "hello");
    }

    #[test]
    fn non_blank_trims_whitespace() {
        assert_eq!(non_blank("  hello  ", "name").unwrap(), "hello");
    }

    #[test]
    fn non_blank_rejects_whitespace_only() {
        assert!(non_blank("   ", "name").is_err());
    }

    #[test]
    fn trim_optional_returns_none_for_blank() {
        assert_eq!(trim_optional(Some("   ")), None);
        assert_eq!(trim_optional(None), None);
        assert_eq!(trim_optional(Some(" Mr. ")), Some("Mr.".to_string()));
    }

    #[test]
    fn blank_optional() {
        assert!(is_blank_optional(None));
        assert!(is_blank_optional(Some("  ")));
        assert!(!is_blank_optional(Some("x")));
    }

    #[test]
    fn phone_number_accepts_dashed_form() {
        assert!(is_phone_number("312-555-1234"));
    }

    #[test]
    fn phone_number_rejects_other_shapes() {
        assert!(!is_phone_number("3125551234"));
        assert!(!is_phone_number("312-555-123"));
        assert!(!is_phone_number("312-555-12345"));
        assert!(!is_phone_number("(312)555-1234"));
        assert!(!is_phone_number("312-5a5-1234"));
        assert!(!is_phone_number(""));
    }
}
