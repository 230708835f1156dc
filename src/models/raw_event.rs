use serde_json::Value;

const EVENT_ID: &str = "/event/id";
const EVENT_TIMESTAMP: &str = "/event/ts";
const PAYMENT_ID: &str = "/entity/payment/id";
const AMOUNT: &str = "/payload/Amount";
const STATUS: &str = "/payload/status";
const FLAGS: &str = "/payload/flags";
const IS_TEST: &str = "/payload/metadata/is_test";

/// Read-only view over one decoded raw event line.
///
/// The record itself is archived untouched, so the classifier only borrows it.
/// A missing group or a group of the wrong JSON type reads as an absent field.
#[derive(Debug, Clone, Copy)]
pub struct RawEvent<'a> {
    record: &'a Value
}

impl<'a> RawEvent<'a> {
    pub fn new(record: &'a Value) -> Self {
        Self { record }
    }

    /// `event.id`, passed through as text.
    pub fn event_id(&self) -> Option<String> {
        to_text(self.record.pointer(EVENT_ID))
    }

    /// `event.ts`, passed through as text.
    pub fn timestamp(&self) -> Option<String> {
        to_text(self.record.pointer(EVENT_TIMESTAMP))
    }

    /// `entity.payment.id`, or `None` when absent or falsy.
    pub fn payment_id(&self) -> Option<String> {
        self.record.pointer(PAYMENT_ID)
            .filter(|value| is_truthy(value))
            .and_then(|value| to_text(Some(value)))
    }

    pub fn amount(&self) -> Option<&'a Value> {
        self.record.pointer(AMOUNT)
    }

    pub fn status(&self) -> Option<&'a str> {
        self.record.pointer(STATUS).and_then(Value::as_str)
    }

    pub fn flags(&self) -> Option<&'a str> {
        self.record.pointer(FLAGS).and_then(Value::as_str)
    }

    /// `payload.metadata.is_test`, defaulting to false.
    pub fn is_test(&self) -> bool {
        self.record.pointer(IS_TEST).is_some_and(is_truthy)
    }
}

fn to_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(other) => Some(other.to_string())
    }
}

/// Loose truthiness used by the upstream producers for flags and identifiers.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty()
    }
}
