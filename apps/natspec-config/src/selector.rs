//! Source selection: which Solidity files a lint run covers.
//!
//! A file is selected when it is a `.sol` file under `include` and matches
//! none of the `exclude` globs. Paths are compared relative to the config's
//! `root`, itself resolved against the project directory passed in.

use crate::config::LintConfig;
use crate::error::{ConfigError, Result};
use crate::pattern::{is_glob, strip_cur_dir};
use glob::{MatchOptions, Pattern};
use rayon::prelude::*;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

const SOURCE_EXT: &str = "sol";

const MATCH_OPTS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

enum Include {
    /// Plain directory: everything below it.
    Dir(PathBuf),
    Glob(Pattern),
}

/// Compiled include/exclude rules bound to a project directory.
pub struct SourceSelector {
    root: PathBuf,
    include: Include,
    exclude: Vec<Pattern>,
}

impl SourceSelector {
    /// Compile the selector for `config`, resolving `root` against `base`.
    pub fn new(config: &LintConfig, base: &Path) -> Result<Self> {
        let root = normalize(&base.join(config.root()));
        let include_pat = strip_cur_dir(config.include());
        let include = if is_glob(include_pat) {
            Include::Glob(compile("include", include_pat)?)
        } else {
            Include::Dir(normalize(Path::new(config.include())))
        };
        let exclude = config
            .exclude()
            .iter()
            .enumerate()
            .map(|(i, p)| compile(&format!("exclude[{}]", i), strip_cur_dir(p)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            root,
            include,
            exclude,
        })
    }

    /// Absolute (or base-relative) root all patterns are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decide whether `path` is linted. Relative paths are taken as relative
    /// to `root`; absolute paths outside `root` never match.
    pub fn matches(&self, path: &Path) -> bool {
        let rel = match self.relativize(path) {
            Some(r) => r,
            None => return false,
        };
        if rel.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXT) {
            return false;
        }
        let included = match &self.include {
            Include::Dir(d) => rel.starts_with(d),
            Include::Glob(p) => p.matches_path_with(&rel, MATCH_OPTS),
        };
        if !included {
            return false;
        }
        !self
            .exclude
            .iter()
            .any(|p| p.matches_path_with(&rel, MATCH_OPTS))
    }

    /// Enumerate selected files on disk, relative to `root`, sorted.
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let escaped_root = Pattern::escape(&self.root.to_string_lossy());
        let pattern = match &self.include {
            Include::Dir(d) => format!(
                "{}/{}/**/*.{}",
                escaped_root,
                Pattern::escape(&d.to_string_lossy()),
                SOURCE_EXT
            ),
            Include::Glob(p) => format!("{}/{}", escaped_root, p.as_str()),
        };
        debug!("Enumerating sources with: {}", pattern);
        let candidates: Vec<PathBuf> = glob::glob_with(&pattern, MATCH_OPTS)
            .map_err(|e| ConfigError::InvalidPattern {
                field: "include".to_string(),
                pattern: pattern.clone(),
                message: e.msg.to_string(),
            })?
            .filter_map(|entry| entry.ok())
            .filter(|p| p.is_file())
            .collect();

        let mut selected: Vec<PathBuf> = candidates
            .par_iter()
            .filter(|p| self.matches(p))
            .filter_map(|p| self.relativize(p))
            .collect();
        selected.sort();
        debug!(
            "Selected {} of {} candidate file(s)",
            selected.len(),
            candidates.len()
        );
        Ok(selected)
    }

    fn relativize(&self, path: &Path) -> Option<PathBuf> {
        let clean = normalize(path);
        if !clean.is_absolute() {
            return Some(clean);
        }
        let rel = pathdiff::diff_paths(&clean, &self.root)?;
        if rel.components().next() == Some(Component::ParentDir) {
            return None;
        }
        Some(rel)
    }
}

fn compile(field: &str, pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        field: field.to_string(),
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })
}

/// Drop `.` components so `./solidity/A.sol` and `solidity/A.sol` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
