mod classifier;
mod clean_transaction;
mod raw_event;
mod rejection;

pub use classifier::{classify, Classification};
pub use clean_transaction::CleanTransaction;
pub use raw_event::RawEvent;
pub use rejection::Rejection;
