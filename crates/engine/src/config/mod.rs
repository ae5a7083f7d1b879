mod loader;
mod validation;

pub use loader::{load_config, ConfigError, CONFIG_FILE_NAME};
pub use validation::validate;
