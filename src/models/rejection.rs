use std::fmt;
use std::fmt::{Display, Formatter};

/// Why a raw event did not produce a clean transaction.
///
/// Rejections are normal control flow. They are counted per run, never
/// reported per record.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Rejection {
    /// `payload.status` is not exactly `SUCCESS`.
    NotSuccessful,
    /// `entity.payment.id` is absent or empty.
    MissingPaymentId,
    /// `payload.Amount` is absent or empty.
    MissingAmount,
    /// `payload.Amount` is present but malformed.
    UnparseableAmount,
    /// Sandbox or `metadata.is_test` traffic.
    TestTransaction
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Rejection::NotSuccessful => "not_successful",
            Rejection::MissingPaymentId => "missing_payment_id",
            Rejection::MissingAmount => "missing_amount",
            Rejection::UnparseableAmount => "unparseable_amount",
            Rejection::TestTransaction => "test_transaction"
        }
    }
}

impl Display for Rejection {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
