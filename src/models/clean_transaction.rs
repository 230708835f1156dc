use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A business-validated transaction derived from an accepted raw event.
///
/// Field order is the column order of the exported table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanTransaction {
    /// The payment identifier from `entity.payment.id`. Never empty.
    pub transaction_id: String,
    /// The originating `event.id`, if the event carried one.
    pub event_id: Option<String>,
    /// Normalized amount in dollars.
    pub amount_usd: Decimal,
    /// The originating `event.ts`, passed through untouched.
    pub timestamp: Option<String>
}
