//! Regex execution.
//!
//! Scans the whole text for non-overlapping occurrences and turns each into a
//! [`RawMatch`] whose shape follows the pattern's capture-group count.

use regex::{Captures, Regex};
use tracing::debug;

use crate::error::{Error, Result};
use crate::field::RawMatch;

/// Compile `pattern` for `field`.
///
/// # Errors
/// Returns [`Error::PatternCompile`] when the regex is malformed or too large.
pub fn compile(field: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::PatternCompile {
        field: field.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

/// Compile and run `pattern` over `text`.
///
/// # Errors
/// Returns [`Error::PatternCompile`] when the pattern does not compile.
pub fn execute(field: &str, text: &str, pattern: &str) -> Result<Vec<RawMatch>> {
    let re = compile(field, pattern)?;
    let matches = find_all(&re, text);
    debug!(field, count = matches.len(), "pattern scanned");
    Ok(matches)
}

/// Every non-overlapping occurrence of `re` in `text`, in order.
#[must_use]
pub fn find_all(re: &Regex, text: &str) -> Vec<RawMatch> {
    // captures_len counts the implicit whole-match group
    let groups = re.captures_len() - 1;
    re.captures_iter(text)
        .map(|caps| to_raw(&caps, groups))
        .collect()
}

fn to_raw(caps: &Captures<'_>, groups: usize) -> RawMatch {
    let group_text = |i: usize| caps.get(i).map_or_else(String::new, |m| m.as_str().to_string());
    match groups {
        0 => RawMatch::Text(group_text(0)),
        1 => RawMatch::Text(group_text(1)),
        n => RawMatch::Tuple((1..=n).map(group_text).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawMatch {
        RawMatch::Text(s.to_string())
    }

    fn tuple(parts: &[&str]) -> RawMatch {
        RawMatch::Tuple(parts.iter().map(|s| (*s).to_string()).collect())
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn no_groups_yields_whole_match() {
        let matches = execute("n", "a1 b22 c333", r"\d+").expect("valid regex");
        assert_eq!(matches, vec![text("1"), text("22"), text("333")]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn one_group_yields_group_text() {
        let matches = execute("k", "k=1;k=2", r"k=(\d)").expect("valid regex");
        assert_eq!(matches, vec![text("1"), text("2")]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn unparticipating_group_is_empty() {
        let matches = execute("k", "x", r"x(y)?").expect("valid regex");
        assert_eq!(matches, vec![text("")]);

        let matches = execute("k", "ab", r"(a)(c)?(b)").expect("valid regex");
        assert_eq!(matches, vec![tuple(&["a", "", "b"])]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn several_groups_yield_tuples() {
        let matches = execute(
            "d",
            "2023年6月2日至2027年6月1日",
            r"(\d{4})年(\d{1,2})月(\d{1,2})日",
        )
        .expect("valid regex");
        assert_eq!(
            matches,
            vec![tuple(&["2023", "6", "2"]), tuple(&["2027", "6", "1"])]
        );
    }

    #[test]
    fn malformed_pattern_is_reported() {
        let Err(err) = execute("bad", "text", r"([unclosed") else {
            panic!("malformed pattern should not compile");
        };
        assert!(matches!(err, Error::PatternCompile { ref field, .. } if field == "bad"));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn no_match_is_empty() {
        let matches = execute("k", "nothing here", r"(\d+)").expect("valid regex");
        assert!(matches.is_empty());
    }
}
