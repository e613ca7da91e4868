//! Error type raised while loading and validating a lint configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Every way `ConfigProvider::load` can fail. Messages name the offending
/// field or file so the binary can surface them verbatim.
pub enum ConfigError {
    #[error("`include` is missing; set it to the directory or pattern to lint")]
    MissingInclude,

    #[error("`include` must not be empty")]
    EmptyInclude,

    #[error("`exclude[{index}]` must not be an empty pattern")]
    EmptyExclude { index: usize },

    #[error("`{field}` has an invalid glob pattern '{pattern}': {message}")]
    InvalidPattern {
        field: String,
        pattern: String,
        message: String,
    },

    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported config format for {} (expected .toml, .yaml, .yml or .json)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("no natspec-smells config found from {} upward", .start.display())]
    NotFound { start: PathBuf },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
