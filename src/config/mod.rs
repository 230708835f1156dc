mod errors;
mod settings;

pub use errors::ConfigError;
pub use settings::Settings;
