//! Alternation expansion for exclude patterns.
//!
//! natspec-smells configs are written for a JS glob engine and commonly use
//! `(a|b)` groups, e.g. `solidity/(test|scripts)/**/*.sol`. The `glob` crate
//! has no alternation, so each group (and each `{a,b}` brace group) is
//! rewritten into one pattern per alternative before compiling.
//!
//! Rules:
//! - Groups are expanded innermost first, leftmost first.
//! - Output order follows the alternatives' order; duplicates are dropped.
//! - A `(...)` group without `|` and a `{...}` group without `,` are literal.
//! - Groups opening inside a `[...]` character class are literal.
//! - Unbalanced groups are left verbatim for glob validation to reject.
//! - Empty alternatives are kept; `LintConfig::from_raw` rejects them.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

// Literal patterns; compilation cannot fail.
static PAREN_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*\|[^()]*)\)").expect("static regex"));
static BRACE_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*,[^{}]*)\}").expect("static regex"));

/// Byte spans of `[...]` character classes, read the way `glob` reads them:
/// a leading `!` negates and a `]` right after the opening is literal.
fn class_spans(pattern: &str) -> Vec<Range<usize>> {
    let b = pattern.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;
    while i < b.len() {
        if b[i] == b'[' {
            let mut j = i + 1;
            if j < b.len() && b[j] == b'!' {
                j += 1;
            }
            if j < b.len() && b[j] == b']' {
                j += 1;
            }
            match b[j..].iter().position(|&c| c == b']') {
                Some(k) => {
                    let end = j + k + 1;
                    spans.push(i..end);
                    i = end;
                    continue;
                }
                None => break,
            }
        }
        i += 1;
    }
    spans
}

/// Leftmost group matched by `re` that does not open inside a class.
fn group_outside_classes<'p>(
    re: &Regex,
    pattern: &'p str,
    classes: &[Range<usize>],
    sep: char,
) -> Option<(Range<usize>, &'p str, char)> {
    re.captures_iter(pattern).find_map(|c| {
        let whole = c.get(0)?;
        if classes.iter().any(|s| s.contains(&whole.start())) {
            return None;
        }
        Some((whole.range(), c.get(1)?.as_str(), sep))
    })
}

/// Locate the leftmost innermost group: its full span and its alternatives.
fn first_group(pattern: &str) -> Option<(Range<usize>, Vec<&str>)> {
    let classes = class_spans(pattern);
    let paren = group_outside_classes(&PAREN_GROUP, pattern, &classes, '|');
    let brace = group_outside_classes(&BRACE_GROUP, pattern, &classes, ',');
    let (range, inner, sep) = match (paren, brace) {
        (Some(p), Some(b)) => {
            if p.0.start <= b.0.start {
                p
            } else {
                b
            }
        }
        (Some(p), None) => p,
        (None, Some(b)) => b,
        (None, None) => return None,
    };
    Some((range, inner.split(sep).collect()))
}

fn expand_into(pattern: &str, out: &mut Vec<String>) {
    match first_group(pattern) {
        None => {
            if !out.iter().any(|p| p == pattern) {
                out.push(pattern.to_string());
            }
        }
        Some((range, alternatives)) => {
            for alt in alternatives {
                let next = format!("{}{}{}", &pattern[..range.start], alt, &pattern[range.end..]);
                expand_into(&next, out);
            }
        }
    }
}

/// Expand every alternation group in `pattern` into standalone patterns.
pub fn expand_pattern(pattern: &str) -> Vec<String> {
    let mut out = Vec::new();
    expand_into(pattern, &mut out);
    out
}

/// Drop leading `./` segments; paths are compared without them.
pub fn strip_cur_dir(pattern: &str) -> &str {
    let mut p = pattern;
    while let Some(rest) = p.strip_prefix("./") {
        p = rest.trim_start_matches('/');
    }
    p
}

/// True when the pattern carries glob metacharacters (after expansion).
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_paren_group() {
        assert_eq!(
            expand_pattern("solidity/(test|scripts)/**/*.sol"),
            vec!["solidity/test/**/*.sol", "solidity/scripts/**/*.sol"]
        );
    }

    #[test]
    fn test_expand_brace_group_and_multiple_groups() {
        assert_eq!(
            expand_pattern("{src,lib}/(a|b).sol"),
            vec!["src/a.sol", "src/b.sol", "lib/a.sol", "lib/b.sol"]
        );
    }

    #[test]
    fn test_nested_groups_dedupe() {
        assert_eq!(expand_pattern("x/(a|(a|c))"), vec!["x/a", "x/c"]);
    }

    #[test]
    fn test_literal_and_unbalanced_are_untouched() {
        assert_eq!(expand_pattern("contracts/**/*.sol"), vec!["contracts/**/*.sol"]);
        assert_eq!(expand_pattern("lib/(vendored)/*.sol"), vec!["lib/(vendored)/*.sol"]);
        assert_eq!(expand_pattern("lib/(a|b/*.sol"), vec!["lib/(a|b/*.sol"]);
    }

    #[test]
    fn test_groups_inside_character_class_are_literal() {
        assert_eq!(expand_pattern("s/[{,}].sol"), vec!["s/[{,}].sol"]);
        assert_eq!(expand_pattern("s/[!(|)]x"), vec!["s/[!(|)]x"]);
        assert_eq!(
            expand_pattern("[{,}]/(a|b).sol"),
            vec!["[{,}]/a.sol", "[{,}]/b.sol"]
        );
        assert!(glob::Pattern::new(&expand_pattern("s/[{,}].sol")[0]).is_ok());
    }

    #[test]
    fn test_empty_alternatives_are_kept_for_validation() {
        assert_eq!(expand_pattern("(|)"), vec![""]);
        assert_eq!(expand_pattern("( |x)"), vec![" ", "x"]);
    }

    #[test]
    fn test_strip_cur_dir() {
        assert_eq!(strip_cur_dir("./solidity/test/**/*.sol"), "solidity/test/**/*.sol");
        assert_eq!(strip_cur_dir("././/a.sol"), "a.sol");
        assert_eq!(strip_cur_dir("./"), "");
        assert_eq!(strip_cur_dir("../a.sol"), "../a.sol");
    }

    #[test]
    fn test_is_glob() {
        assert!(is_glob("solidity/**/*.sol"));
        assert!(is_glob("src/[ab].sol"));
        assert!(!is_glob("solidity"));
    }
}
