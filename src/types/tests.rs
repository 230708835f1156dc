use super::errors::AmountError;
use super::Amount;
use anyhow::Result;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;

fn usd(value: &str) -> Result<Decimal> {
    Ok(Decimal::from_str(value)?)
}

fn normalize(value: Option<&Value>) -> Option<Decimal> {
    Amount::normalize(value).usd()
}

#[test]
fn test_numeric_amounts_are_always_minor_units() -> Result<()> {
    let test_cases = vec![
        (json!(4500), "45"),
        (json!(1234), "12.34"),
        (json!(1), "0.01"),
        (json!(0), "0"),
        (json!(-250), "-2.5"),
        (json!(4500.0), "45"),
        (json!(1234.5), "12.345"),
        (json!(18446744073709551615u64), "184467440737095516.15"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(normalize(Some(&input)), Some(usd(expected)?), "input {input}");
    }

    Ok(())
}

#[test]
fn test_dotted_text_is_taken_as_dollars() -> Result<()> {
    let test_cases = vec![
        ("$12.34", "12.34"),
        ("$45.00", "45.00"),
        ("$ 45.00", "45"),
        ("  $7.5  ", "7.5"),
        ("USD 12.5", "12.5"),
        ("usd12.50", "12.5"),
        ("99.99", "99.99"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(normalize(Some(&json!(input))), Some(usd(expected)?), "input {input}");
    }

    Ok(())
}

#[test]
fn test_dotless_text_is_taken_as_minor_units() -> Result<()> {
    assert_eq!(normalize(Some(&json!("1234"))), Some(usd("12.34")?));
    assert_eq!(normalize(Some(&json!("$4500"))), Some(usd("45")?));
    assert_eq!(normalize(Some(&json!(" 7 "))), Some(usd("0.07")?));

    Ok(())
}

#[test]
fn test_dotless_text_accepts_the_same_range_as_numbers() -> Result<()> {
    let text = normalize(Some(&json!("18446744073709551615")));
    let number = normalize(Some(&json!(18446744073709551615u64)));

    assert_eq!(text, Some(usd("184467440737095516.15")?));
    assert_eq!(text, number);
    assert_eq!(normalize(Some(&json!("$-250"))), normalize(Some(&json!(-250))));

    Ok(())
}

#[test]
fn test_absent_and_empty_amounts_are_missing() {
    assert_eq!(Amount::normalize(None), Amount::Missing);
    assert_eq!(Amount::normalize(Some(&Value::Null)), Amount::Missing);
    assert_eq!(Amount::normalize(Some(&json!(""))), Amount::Missing);

    assert_eq!(normalize(None), None);
    assert_eq!(normalize(Some(&json!(""))), None);
}

#[test]
fn test_malformed_amounts_are_unparseable_without_panicking() {
    let test_cases = vec![
        json!("not-a-number"),
        json!("   "),
        json!("$"),
        json!("USD"),
        json!("1.2.3"),
        json!("12,50"),
        json!("1000000000000000000000000000000"),
        json!(true),
        json!([4500]),
        json!({"cents": 4500}),
    ];

    for input in test_cases {
        assert!(matches!(Amount::normalize(Some(&input)), Amount::Unparseable(_)), "input {input}");
        assert_eq!(normalize(Some(&input)), None);
    }
}

#[test]
fn test_unparseable_amounts_carry_the_reason() {
    assert!(matches!(
        Amount::normalize(Some(&json!("abc"))),
        Amount::Unparseable(AmountError::InvalidFormat(_))
    ));
    assert!(matches!(
        Amount::normalize(Some(&json!("a.b"))),
        Amount::Unparseable(AmountError::InvalidFormat(_))
    ));
    assert_eq!(
        Amount::normalize(Some(&json!(false))),
        Amount::Unparseable(AmountError::UnsupportedType("boolean"))
    );
}
