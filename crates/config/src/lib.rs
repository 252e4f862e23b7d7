mod config;
mod error;
mod loader;

pub use config::{ResolutionUrlConfig, RuleDefinition, RuleSetConfig, SupportConfig};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str};
