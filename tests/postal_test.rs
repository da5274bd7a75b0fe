//! Property tests for postal code sanitizing and validation

use cep_temperature::lookup::postal::{is_valid, sanitize, PostalCode, RESERVED_POSTAL_CODE};
use proptest::prelude::*;

proptest! {
    /// Sanitizing keeps exactly the ASCII digits, in order
    #[test]
    fn sanitize_keeps_digits_in_order(raw in "\\PC*") {
        let expected: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        prop_assert_eq!(sanitize(&raw), expected);
    }

    /// Sanitized output never contains anything but ASCII digits
    #[test]
    fn sanitize_output_is_digits(raw in "\\PC*") {
        prop_assert!(sanitize(&raw).bytes().all(|b| b.is_ascii_digit()));
    }

    /// Validity is exactly "8 digits and not the reserved code"
    #[test]
    fn validity_rule(raw in "[0-9 .-]{0,14}") {
        let sanitized = sanitize(&raw);
        let expected = sanitized.len() == 8 && sanitized != RESERVED_POSTAL_CODE;

        prop_assert_eq!(is_valid(&sanitized), expected);
        prop_assert_eq!(PostalCode::parse(&raw).is_ok(), expected);
    }

    /// Any 8 digits other than the reserved code parse back unchanged
    #[test]
    fn eight_digits_parse(digits in "[0-9]{8}") {
        prop_assume!(digits != RESERVED_POSTAL_CODE);
        let cep = PostalCode::parse(&digits).unwrap();
        prop_assert_eq!(cep.as_str(), digits.as_str());
    }
}

#[test]
fn test_reserved_code_rejected() {
    assert!(PostalCode::parse("00000000").is_err());
}

#[test]
fn test_seven_digits_rejected() {
    assert!(PostalCode::parse("2525526").is_err());
}
