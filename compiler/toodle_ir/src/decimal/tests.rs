#![allow(clippy::unwrap_used)]

use super::*;

fn dec(text: &str) -> Decimal {
    text.parse().unwrap()
}

#[test]
fn test_plain_string_keeps_scale() {
    assert_eq!(dec("12.50").to_plain_string(), "12.50");
    assert_eq!(dec("-0.050").to_plain_string(), "-0.050");
    assert_eq!(dec("7").to_plain_string(), "7");
    assert_eq!(dec("0.5").to_plain_string(), "0.5");
}

#[test]
fn test_exponent_is_multiplied_out() {
    assert_eq!(dec("1e3").to_plain_string(), "1000");
    assert_eq!(dec("1.5E2").to_plain_string(), "150");
    assert_eq!(dec("25e-3").to_plain_string(), "0.025");
}

#[test]
fn test_integer_classification() {
    assert!(dec("42").is_integer());
    assert!(dec("3.00").is_integer());
    assert!(!dec("3.01").is_integer());
    assert_eq!(dec("3.00").to_i64(), Some(3));
    assert_eq!(dec("-17").to_i64(), Some(-17));
    assert_eq!(dec("0.5").to_i64(), None);
}

#[test]
fn test_beyond_machine_width() {
    let huge = dec("123456789012345678901234567890");
    assert!(huge.is_integer());
    assert_eq!(huge.to_i64(), None);
    assert_eq!(huge.to_plain_string(), "123456789012345678901234567890");
}

#[test]
fn test_malformed_numbers() {
    for bad in ["abc", "1.2.3", "1e", "12x"] {
        assert!(
            matches!(bad.parse::<Decimal>(), Err(DecimalError::Malformed { .. })),
            "accepted {bad:?}"
        );
    }
}

#[test]
fn test_huge_exponents_are_rejected() {
    assert_eq!(
        "1e99999".parse::<Decimal>(),
        Err(DecimalError::ExponentOutOfRange("1e99999".to_owned()))
    );
    assert!("1e-99999".parse::<Decimal>().is_err());
}

#[test]
fn test_scale_follows_source_digits() {
    assert_eq!(dec("12.50").scale(), 2);
    assert_eq!(dec("1e3").scale(), 0);
    assert_eq!(dec("25e-3").scale(), 3);
}

#[test]
fn test_scale_is_part_of_equality() {
    assert_ne!(dec("2.0"), dec("2.00"));
    assert_eq!(dec("2.0"), dec("2.0"));
}
