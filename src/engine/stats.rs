use std::path::PathBuf;

use crate::models::Rejection;

/// Per-reason tally of rejected records.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct RejectionCounts {
    pub not_successful: usize,
    pub missing_payment_id: usize,
    pub missing_amount: usize,
    pub unparseable_amount: usize,
    pub test_transaction: usize
}

impl RejectionCounts {
    pub fn record(&mut self, rejection: Rejection) {
        let counter = match rejection {
            Rejection::NotSuccessful => &mut self.not_successful,
            Rejection::MissingPaymentId => &mut self.missing_payment_id,
            Rejection::MissingAmount => &mut self.missing_amount,
            Rejection::UnparseableAmount => &mut self.unparseable_amount,
            Rejection::TestTransaction => &mut self.test_transaction
        };

        *counter += 1;
    }

    pub fn total(&self) -> usize {
        self.not_successful
            + self.missing_payment_id
            + self.missing_amount
            + self.unparseable_amount
            + self.test_transaction
    }
}

/// Counters of one pipeline run. `archived_count` is always
/// `cleaned_count + rejections.total()`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct RunStats {
    pub archived_count: usize,
    pub cleaned_count: usize,
    pub rejections: RejectionCounts
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ExportOutcome {
    /// The clean table was handed to the export sink.
    Exported {
        destination: String,
        rows: usize
    },
    /// Every record was rejected; the export sink was not invoked.
    NoValidRecords,
    /// The input file does not exist; nothing was archived.
    InputMissing(PathBuf)
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RunSummary {
    pub stats: RunStats,
    pub outcome: ExportOutcome
}
