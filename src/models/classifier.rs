use serde_json::Value;

use crate::models::{CleanTransaction, RawEvent, Rejection};
use crate::types::Amount;

const SUCCESS_STATUS: &str = "SUCCESS";
const SANDBOX_FLAG: &str = "sandbox";

/// Result of classifying one raw event.
///
/// Archival does not depend on this: every decoded record is archived by the
/// pipeline before it is classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Accepted(CleanTransaction),
    Rejected(Rejection)
}

/// Applies the business rules to one raw event.
///
/// A record is accepted only when all of these hold:
/// - `payload.status` is exactly `SUCCESS` (case-sensitive)
/// - `entity.payment.id` is present and non-empty
/// - `payload.Amount` normalizes to a dollar amount
/// - it is not a test transaction (`flags == "sandbox"` or `metadata.is_test`)
///
/// Pure: the same record always yields the same classification.
pub fn classify(record: &Value) -> Classification {
    let event = RawEvent::new(record);

    if event.status() != Some(SUCCESS_STATUS) {
        return Classification::Rejected(Rejection::NotSuccessful);
    }

    let amount = Amount::normalize(event.amount());

    let Some(payment_id) = event.payment_id() else {
        return Classification::Rejected(Rejection::MissingPaymentId);
    };

    let Some(amount_usd) = amount.usd() else {
        let rejection = match amount {
            Amount::Missing => Rejection::MissingAmount,
            _ => Rejection::UnparseableAmount
        };

        return Classification::Rejected(rejection);
    };

    if event.flags() == Some(SANDBOX_FLAG) || event.is_test() {
        return Classification::Rejected(Rejection::TestTransaction);
    }

    Classification::Accepted(CleanTransaction {
        transaction_id: payment_id,
        event_id: event.event_id(),
        amount_usd,
        timestamp: event.timestamp()
    })
}
