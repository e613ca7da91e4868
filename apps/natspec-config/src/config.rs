//! Lint configuration: raw schema, validated record, and providers.
//!
//! A natspec-smells config is read from a static literal or from
//! `natspec-smells.config.toml|yaml|yml|json` and resolved into a
//! `LintConfig`. Defaults:
//! - `root`: `./`
//! - `constructorNatspec`: false
//! - `enforceInheritdoc`: false
//!
//! `include` has no default. `exclude` entries are expanded (see
//! `pattern::expand_pattern`), stripped of leading `./`, and compiled once
//! so invalid globs fail at load time rather than during a lint run. Every
//! stored entry is non-empty, and reloading a serialized record is lossless.
//!
//! Discovery precedence: `NATSPEC_SMELLS_CONFIG` > closest config file
//! walking upward (stops at a `.git` directory).

use crate::error::{ConfigError, Result};
use crate::pattern::{expand_pattern, is_glob, strip_cur_dir};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "NATSPEC_SMELLS_CONFIG";

/// File names probed in each directory, in order.
pub const CONFIG_FILES: [&str; 4] = [
    "natspec-smells.config.toml",
    "natspec-smells.config.yaml",
    "natspec-smells.config.yml",
    "natspec-smells.config.json",
];

const DEFAULT_ROOT: &str = "./";

/// The version-controlled configuration this repository lints with.
const CANONICAL: &str = r#"
include = "solidity"
exclude = ["solidity/(test|scripts)/**/*.sol"]
constructorNatspec = true
enforceInheritdoc = false
"#;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
/// `exclude` may be written as one pattern or a list of patterns.
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
/// Config exactly as written; every field optional.
pub struct RawConfig {
    pub include: Option<String>,
    pub exclude: Option<OneOrMany>,
    pub root: Option<String>,
    pub constructor_natspec: Option<bool>,
    pub enforce_inheritdoc: Option<bool>,
    /// Options the linter may support that are not modelled here.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Fully-resolved, validated configuration handed to the linter.
///
/// Only constructible through `LintConfig::from_raw`, so every instance
/// satisfies the invariants: non-empty `include`, non-empty and valid
/// `exclude` globs, both policy flags set.
pub struct LintConfig {
    include: String,
    exclude: Vec<String>,
    root: String,
    constructor_natspec: bool,
    enforce_inheritdoc: bool,
}

impl LintConfig {
    /// Apply defaults and validate a raw config.
    pub fn from_raw(raw: RawConfig) -> Result<Self> {
        for key in raw.extra.keys() {
            warn!("Ignoring unsupported config option `{}`", key);
        }

        let include = raw.include.ok_or(ConfigError::MissingInclude)?;
        if include.trim().is_empty() {
            return Err(ConfigError::EmptyInclude);
        }
        if is_glob(&include) {
            check_glob("include", &include)?;
        }

        let written = raw.exclude.map(OneOrMany::into_vec).unwrap_or_default();
        let mut exclude: Vec<String> = Vec::new();
        for (index, p) in written.iter().enumerate() {
            if p.trim().is_empty() {
                return Err(ConfigError::EmptyExclude { index });
            }
            for expanded in expand_pattern(p) {
                let expanded = strip_cur_dir(&expanded);
                if expanded.trim().is_empty() {
                    return Err(ConfigError::EmptyExclude { index });
                }
                check_glob(&format!("exclude[{}]", index), expanded)?;
                if !exclude.iter().any(|e| e == expanded) {
                    exclude.push(expanded.to_string());
                }
            }
        }

        let root = raw
            .root
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ROOT.to_string());

        Ok(Self {
            include,
            exclude,
            root,
            constructor_natspec: raw.constructor_natspec.unwrap_or(false),
            enforce_inheritdoc: raw.enforce_inheritdoc.unwrap_or(false),
        })
    }

    pub fn include(&self) -> &str {
        &self.include
    }

    /// Exclude globs after alternation expansion.
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Whether constructors must carry NatSpec.
    pub fn constructor_natspec(&self) -> bool {
        self.constructor_natspec
    }

    /// Whether `@inheritdoc` is mandatory on overriding declarations.
    pub fn enforce_inheritdoc(&self) -> bool {
        self.enforce_inheritdoc
    }
}

fn check_glob(field: &str, pattern: &str) -> Result<()> {
    glob::Pattern::new(pattern)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidPattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            message: e.msg.to_string(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Encodings accepted for config files.
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Parse `text` as a raw config. `origin` is only used for error messages.
pub fn parse_raw(text: &str, format: ConfigFormat, origin: &Path) -> Result<RawConfig> {
    let parsed = match format {
        ConfigFormat::Toml => toml::from_str::<RawConfig>(text).map_err(|e| e.to_string()),
        ConfigFormat::Yaml => serde_yaml::from_str::<RawConfig>(text).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::from_str::<RawConfig>(text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ConfigError::Parse {
        path: origin.to_path_buf(),
        message,
    })
}

/// Parse and resolve in one step.
pub fn load_str(text: &str, format: ConfigFormat, origin: &Path) -> Result<LintConfig> {
    LintConfig::from_raw(parse_raw(text, format, origin)?)
}

/// Source of a validated `LintConfig`.
pub trait ConfigProvider {
    fn load(&self) -> Result<LintConfig>;
}

#[derive(Debug, Default, Clone, Copy)]
/// Serves the canonical, version-controlled configuration.
pub struct StaticProvider;

impl ConfigProvider for StaticProvider {
    fn load(&self) -> Result<LintConfig> {
        load_str(CANONICAL, ConfigFormat::Toml, Path::new("<canonical>"))
    }
}

#[derive(Debug, Clone)]
/// Loads one config file; format follows its extension.
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigProvider for FileProvider {
    fn load(&self) -> Result<LintConfig> {
        let format = ConfigFormat::from_path(&self.path)?;
        debug!("Loading config from: {}", self.path.display());
        let text = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        let cfg = load_str(&text, format, &self.path)?;
        info!(
            "Loaded config from {} (include={}, {} exclude pattern(s))",
            self.path.display(),
            cfg.include(),
            cfg.exclude().len()
        );
        Ok(cfg)
    }
}

#[derive(Debug, Clone)]
/// Finds the config by override or by walking upward from `start`.
pub struct DiscoveryProvider {
    start: PathBuf,
    override_path: Option<PathBuf>,
}

impl DiscoveryProvider {
    /// Discovery from `start` without an override.
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
            override_path: None,
        }
    }

    /// Discovery from `start`, honoring `NATSPEC_SMELLS_CONFIG` when set.
    pub fn from_env(start: impl Into<PathBuf>) -> Self {
        let provider = Self::new(start);
        match std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            Some(path) => provider.with_override(path),
            None => provider,
        }
    }

    pub fn with_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    /// Resolve the config file this provider would load.
    pub fn locate(&self) -> Result<PathBuf> {
        if let Some(p) = &self.override_path {
            debug!("Using config override: {}", p.display());
            return Ok(p.clone());
        }
        find_config_file(&self.start).ok_or_else(|| ConfigError::NotFound {
            start: self.start.clone(),
        })
    }
}

impl ConfigProvider for DiscoveryProvider {
    fn load(&self) -> Result<LintConfig> {
        FileProvider::new(self.locate()?).load()
    }
}

/// Return the first config file present directly in `dir`.
pub fn config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

/// Walk upward from `start` to the closest config file.
///
/// Stops at the first directory holding `.git`; a config in that directory
/// still counts.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut cur = start;
    loop {
        debug!("Probing for config in: {}", cur.display());
        if let Some(found) = config_file_in(cur) {
            return Some(found);
        }
        if cur.join(".git").exists() {
            return None;
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return None,
        }
    }
}
