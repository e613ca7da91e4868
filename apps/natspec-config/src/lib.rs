//! natspec-config core library.
//!
//! Loads, defaults, and validates the configuration consumed by the
//! natspec-smells documentation linter for Solidity sources.
//!
//! High-level modules:
//! - `app`: Binary flow (resolve, render, exit code) kept testable.
//! - `config`: Raw schema, validated `LintConfig`, and `ConfigProvider`s
//!   (canonical literal, single file, upward discovery).
//! - `error`: `ConfigError`, the single load-time error type.
//! - `pattern`: Expansion of `(a|b)` / `{a,b}` groups in exclude globs.
//! - `selector`: `include` minus `exclude` applied to Solidity files.
//! - `output`: Human/JSON printers for the effective config.
//!
//! The config is never held in global state; callers pass `&LintConfig`
//! to whatever needs it.
pub mod app;
pub mod config;
pub mod error;
pub mod output;
pub mod pattern;
pub mod selector;

pub use config::{ConfigProvider, DiscoveryProvider, FileProvider, LintConfig, StaticProvider};
pub use error::ConfigError;
