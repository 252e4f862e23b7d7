use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Invalid config in {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("Invalid rule set '{rule_set}' in {}: {message}", path.display())]
    InvalidRuleSet {
        path: PathBuf,
        rule_set: String,
        message: String,
    },

    #[error("Invalid rule '{rule}' of rule set '{rule_set}' in {}: {message}", path.display())]
    InvalidRule {
        path: PathBuf,
        rule_set: String,
        rule: String,
        message: String,
    },
}
