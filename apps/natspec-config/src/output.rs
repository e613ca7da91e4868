//! Output rendering for the effective config and load errors.
//!
//! Supports `json` (default, meant for the calling linter) and `human`.
//! The JSON form carries the config, where it came from, the resolved
//! root, and the selected source files.

use crate::app::Resolved;
use crate::config::LintConfig;
use crate::error::ConfigError;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Prefix for fatal messages on stderr.
pub fn error_prefix() -> String {
    if std::env::var_os("NO_COLOR").is_none() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Render a load failure as one stderr line.
pub fn render_error(err: &ConfigError) -> String {
    format!("{} {}", error_prefix(), err)
}

/// Render the effective config in the requested format.
pub fn render_config(res: &Resolved, output: &str) -> String {
    match output {
        "human" => {
            let color = use_colors(output);
            let mut lines = Vec::new();
            let origin = res.source.to_string_lossy().to_string();
            let root = res.root.to_string_lossy().to_string();
            if color {
                lines.push(format!(
                    "{} {} (root {})",
                    "natspec-smells config".bold(),
                    origin.cyan(),
                    root
                ));
            } else {
                lines.push(format!("natspec-smells config {} (root {})", origin, root));
            }
            for (key, value) in human_rows(&res.config) {
                if color {
                    lines.push(format!("  {}{}", format!("{:<20}", key).bright_black(), value));
                } else {
                    lines.push(format!("  {:<20}{}", key, value));
                }
            }
            let summary = format!("— {} source file(s) selected —", res.files.len());
            if color {
                lines.push(summary.bold().to_string());
            } else {
                lines.push(summary);
            }
            lines.join("\n")
        }
        _ => match serde_json::to_string_pretty(&compose_config_json(res)) {
            Ok(s) => s,
            Err(e) => format!("{} {}", error_prefix(), e),
        },
    }
}

fn human_rows(cfg: &LintConfig) -> Vec<(&'static str, String)> {
    let mut rows = vec![("include", cfg.include().to_string())];
    if cfg.exclude().is_empty() {
        rows.push(("exclude", "(none)".to_string()));
    }
    for (i, p) in cfg.exclude().iter().enumerate() {
        rows.push((if i == 0 { "exclude" } else { "" }, p.clone()));
    }
    rows.push(("root", cfg.root().to_string()));
    rows.push(("constructorNatspec", cfg.constructor_natspec().to_string()));
    rows.push(("enforceInheritdoc", cfg.enforce_inheritdoc().to_string()));
    rows
}

/// Compose the JSON document (pure) for testing purposes.
pub fn compose_config_json(res: &Resolved) -> JsonVal {
    json!({
        "config": res.config,
        "source": res.source.to_string_lossy(),
        "rootDir": res.root.to_string_lossy(),
        "files": res.files.iter().map(|p| p.to_string_lossy().to_string()).collect::<Vec<_>>(),
        "summary": { "files": res.files.len() },
    })
}
