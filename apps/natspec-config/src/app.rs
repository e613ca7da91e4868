//! Binary flow: locate the config, validate it, select sources, report.
//!
//! `run` writes the rendered config to `out` and returns exit code 0, or
//! writes a field-naming message to `err` and returns 2.

use crate::config::{ConfigProvider, DiscoveryProvider, FileProvider, LintConfig};
use crate::error::Result;
use crate::output;
use crate::selector::SourceSelector;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG: i32 = 2;

/// Everything the calling linter needs from one resolution.
#[derive(Debug)]
pub struct Resolved {
    pub source: PathBuf,
    pub root: PathBuf,
    pub config: LintConfig,
    pub files: Vec<PathBuf>,
}

/// Load the config `provider` points at and select its sources.
///
/// Patterns are relative to the directory holding the config file; a bare
/// file name falls back to `cwd`.
pub fn resolve(provider: &DiscoveryProvider, cwd: &Path) -> Result<Resolved> {
    let source = provider.locate()?;
    let config = FileProvider::new(&source).load()?;
    let base = match source.parent() {
        Some(p) if p != Path::new("") => p.to_path_buf(),
        _ => cwd.to_path_buf(),
    };
    let selector = SourceSelector::new(&config, &base)?;
    let files = selector.collect()?;
    Ok(Resolved {
        source,
        root: selector.root().to_path_buf(),
        config,
        files,
    })
}

/// Resolve and report; returns the process exit code.
pub fn run<O: Write, E: Write>(
    provider: &DiscoveryProvider,
    cwd: &Path,
    mode: &str,
    out: &mut O,
    err: &mut E,
) -> i32 {
    match resolve(provider, cwd) {
        Ok(res) => {
            let _ = writeln!(out, "{}", output::render_config(&res, mode));
            EXIT_OK
        }
        Err(e) => {
            let _ = writeln!(err, "{}", output::render_error(&e));
            EXIT_CONFIG
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(base: &Path, rel: &str) {
        let p = base.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(&p, "// SPDX-License-Identifier: MIT\n").unwrap();
    }

    #[test]
    fn test_run_prints_json_and_exits_zero() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("natspec-smells.config.toml"),
            "include = \"solidity\"\nexclude = [\"./solidity/(test|scripts)/**/*.sol\"]\nconstructorNatspec = true\n",
        )
        .unwrap();
        touch(root, "solidity/contracts/Token.sol");
        touch(root, "solidity/test/Token.t.sol");
        let start = root.join("solidity/contracts");

        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
        let code = run(&DiscoveryProvider::new(&start), &start, "json", &mut out, &mut err);
        assert_eq!(code, EXIT_OK);
        assert!(err.is_empty());

        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["config"]["include"], "solidity");
        assert_eq!(v["config"]["constructorNatspec"], true);
        assert_eq!(v["config"]["exclude"][0], "solidity/test/**/*.sol");
        assert_eq!(v["files"], serde_json::json!(["solidity/contracts/Token.sol"]));
    }

    #[test]
    fn test_run_reports_field_and_exits_two() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("natspec-smells.config.json"),
            r#"{"include": "solidity", "exclude": ["solidity/test/*.sol", ""]}"#,
        )
        .unwrap();

        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
        let code = run(&DiscoveryProvider::new(root), root, "json", &mut out, &mut err);
        assert_eq!(code, EXIT_CONFIG);
        assert!(out.is_empty());
        let msg = String::from_utf8(err).unwrap();
        assert!(msg.contains("`exclude[1]`"), "{msg}");
    }

    #[test]
    fn test_run_missing_include_and_missing_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();

        let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
        assert_eq!(
            run(&DiscoveryProvider::new(root), root, "json", &mut out, &mut err),
            EXIT_CONFIG
        );
        assert!(String::from_utf8_lossy(&err).contains("no natspec-smells config found"));

        fs::write(root.join("natspec-smells.config.yaml"), "constructorNatspec: true\n").unwrap();
        let mut err = Vec::<u8>::new();
        assert_eq!(
            run(&DiscoveryProvider::new(root), root, "human", &mut out, &mut err),
            EXIT_CONFIG
        );
        assert!(String::from_utf8_lossy(&err).contains("`include` is missing"));
    }

    #[test]
    fn test_resolve_with_override_selects_from_its_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("custom.json"), r#"{"include": "src"}"#).unwrap();
        touch(root, "src/A.sol");

        let provider = DiscoveryProvider::new(root).with_override(root.join("custom.json"));
        let res = resolve(&provider, root).unwrap();
        assert_eq!(res.root, root.to_path_buf());
        assert_eq!(res.files, vec![PathBuf::from("src/A.sol")]);
    }
}
