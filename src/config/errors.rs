use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set. Provide the archive connection string in the environment or a .env file")]
    MissingVariable(&'static str),
    #[error("{name} must be a positive integer, got [{value}]")]
    InvalidNumber {
        name: &'static str,
        value: String
    }
}
