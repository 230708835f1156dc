use crate::types::errors::AmountError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::str::FromStr;

/// Decimal places between the minor unit (cents) and the reporting currency (USD).
const MINOR_UNIT_SCALE: u32 = 2;
const CURRENCY_SYMBOL: char = '$';
const CURRENCY_CODE: &str = "USD";

/// Outcome of normalizing a raw `payload.Amount` value.
///
/// Upstream systems encode amounts as integer cents, dollar display strings or
/// not at all. `Missing` and `Unparseable` are kept apart so callers can tell
/// "no amount field" from "malformed amount field", even though the current
/// business rules reject both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount {
    /// Canonical amount in the reporting currency.
    Usd(Decimal),
    /// Absent, `null` or empty string.
    Missing,
    /// Present but could not be converted.
    Unparseable(AmountError)
}

impl Amount {
    /// Converts a heterogeneous amount into dollars. Never fails; parse errors
    /// become `Amount::Unparseable`.
    ///
    /// - numbers are always minor units and are divided by 100
    /// - text has its currency marker stripped, then a dotted value is taken as
    ///   dollars and a dotless value as cents
    pub fn normalize(value: Option<&Value>) -> Self {
        let parsed = match value {
            None | Some(Value::Null) => return Amount::Missing,
            Some(Value::String(text)) if text.is_empty() => return Amount::Missing,
            Some(Value::String(text)) => parse_text(text),
            Some(Value::Number(number)) => parse_number(number),
            Some(Value::Bool(_)) => Err(AmountError::UnsupportedType("boolean")),
            Some(Value::Array(_)) => Err(AmountError::UnsupportedType("array")),
            Some(Value::Object(_)) => Err(AmountError::UnsupportedType("object"))
        };

        match parsed {
            Ok(amount) => Amount::Usd(amount),
            Err(error) => Amount::Unparseable(error)
        }
    }

    pub fn usd(&self) -> Option<Decimal> {
        match self {
            Amount::Usd(amount) => Some(*amount),
            Amount::Missing | Amount::Unparseable(_) => None
        }
    }
}

fn parse_text(raw: &str) -> Result<Decimal, AmountError> {
    let cleaned = strip_currency(raw);

    if cleaned.is_empty() {
        return Err(AmountError::InvalidFormat("Value is empty after removing the currency marker".to_string()));
    }

    let amount = Decimal::from_str(&cleaned)
        .map_err(|error| AmountError::InvalidFormat(format!("Value is not a numeric amount: {error}")))?;

    if cleaned.contains('.') {
        return Ok(amount);
    }

    //NOTE: Dotless text is minor units, the same as a JSON number
    if amount.scale() != 0 {
        return Err(AmountError::InvalidFormat(format!("Minor units must be whole, got [{cleaned}]")));
    }

    to_major_units(amount)
}

fn parse_number(number: &Number) -> Result<Decimal, AmountError> {
    if let Some(minor_units) = number.as_i64() {
        return Ok(Decimal::new(minor_units, MINOR_UNIT_SCALE));
    }

    let minor_units = match number.as_u64() {
        Some(value) => Decimal::from(value),
        None => number.as_f64()
            .and_then(Decimal::from_f64)
            .ok_or(AmountError::Overflow)?
    };

    to_major_units(minor_units)
}

fn to_major_units(minor_units: Decimal) -> Result<Decimal, AmountError> {
    minor_units.checked_div(Decimal::ONE_HUNDRED).ok_or(AmountError::Overflow)
}

fn strip_currency(raw: &str) -> String {
    let without_symbol = raw.replace(CURRENCY_SYMBOL, "");
    let trimmed = without_symbol.trim();

    let without_code = match trimmed.get(..CURRENCY_CODE.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(CURRENCY_CODE) => &trimmed[CURRENCY_CODE.len()..],
        _ => trimmed
    };

    without_code.trim().to_string()
}
