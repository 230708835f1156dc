use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount error: {0}")]
    InvalidFormat(String),
    #[error("Amount error: Unsupported value type [{0}]")]
    UnsupportedType(&'static str),
    #[error("Amount error: Overflow")]
    Overflow
}
