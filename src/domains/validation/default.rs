//! The platform's standard request validator.
//!
//! Flags values that resemble markup or character-reference injection: a `<`
//! followed by an ASCII letter, `!`, `/` or `?`, or `&` followed by `#`.
//! Header values are never validated.

use super::{RequestContext, RequestValidationSource, RequestValidator, ValidationOutcome};

/// Standard script-pattern validator used when no bypass applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidator;

impl DefaultValidator {
    /// Create the standard validator.
    pub fn new() -> Self {
        Self
    }

    /// Returns the byte offset of the first dangerous sequence in `value`.
    pub fn find_dangerous(value: &str) -> Option<usize> {
        let bytes = value.as_bytes();

        bytes.windows(2).position(|pair| match pair {
            [b'<', next] => next.is_ascii_alphabetic() || matches!(next, b'!' | b'/' | b'?'),
            [b'&', b'#'] => true,
            _ => false,
        })
    }
}

impl RequestValidator for DefaultValidator {
    fn validate(
        &self,
        _context: Option<&RequestContext>,
        value: &str,
        source: RequestValidationSource,
        _collection_key: Option<&str>,
    ) -> ValidationOutcome {
        if source == RequestValidationSource::Headers {
            return ValidationOutcome::valid();
        }

        match Self::find_dangerous(value) {
            Some(index) => ValidationOutcome::invalid(index),
            None => ValidationOutcome::valid(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(value: &str) -> ValidationOutcome {
        DefaultValidator::new().validate(None, value, RequestValidationSource::Form, Some("field"))
    }

    #[test]
    fn test_plain_text_is_valid() {
        assert_eq!(check("hello world"), ValidationOutcome::valid());
        assert_eq!(check(""), ValidationOutcome::valid());
    }

    #[test]
    fn test_script_tag_is_invalid() {
        assert_eq!(check("<script>"), ValidationOutcome::invalid(0));
        assert_eq!(check("abc</b>"), ValidationOutcome::invalid(3));
    }

    #[test]
    fn test_markup_declarations_are_invalid() {
        assert_eq!(check("x<!--"), ValidationOutcome::invalid(1));
        assert_eq!(check("<?xml"), ValidationOutcome::invalid(0));
    }

    #[test]
    fn test_character_reference_is_invalid() {
        assert_eq!(check("a&#60;"), ValidationOutcome::invalid(1));
    }

    #[test]
    fn test_harmless_angle_and_ampersand() {
        assert!(check("1 < 2").is_valid);
        assert!(check("a<1").is_valid);
        assert!(check("fish & chips").is_valid);
        assert!(check("ends with <").is_valid);
        assert!(check("ends with &").is_valid);
    }

    #[test]
    fn test_first_dangerous_sequence_wins() {
        assert_eq!(check("a < b <i>"), ValidationOutcome::invalid(6));
    }

    #[test]
    fn test_headers_are_not_validated() {
        let outcome = DefaultValidator::new().validate(
            None,
            "<script>",
            RequestValidationSource::Headers,
            Some("User-Agent"),
        );
        assert_eq!(outcome, ValidationOutcome::valid());
    }
}
