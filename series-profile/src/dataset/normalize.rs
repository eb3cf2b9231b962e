//! Column label normalization.
//!
//! Labels are converted once, at ingestion, into plain string keys. The result
//! is trimmed, has whitespace and path separators replaced by `_`, no repeated
//! `_`, and no leading or trailing `_`.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s/\\]").unwrap());
static REPEATED_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// Normalizes a single raw label.
///
/// # Examples
///
/// ```rust
/// use series_profile::dataset::normalize_label;
///
/// assert_eq!(normalize_label("  Adj Close "), "Adj_Close");
/// assert_eq!(normalize_label("price/volume__ratio_"), "price_volume_ratio");
/// ```
pub fn normalize_label(label: &str) -> String {
    let replaced = SEPARATORS.replace_all(label.trim(), "_");
    let collapsed = REPEATED_UNDERSCORES.replace_all(&replaced, "_");
    collapsed.trim_matches('_').to_string()
}

/// Normalizes a composite label, joining its non-empty parts with `_`.
pub fn normalize_composite<S: AsRef<str>>(parts: &[S]) -> String {
    let joined = parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("_");
    normalize_label(&joined)
}

/// Makes normalized names unique.
///
/// The first occurrence keeps its name; later duplicates get the first free
/// `_1`, `_2`, ... suffix. Names already unique are returned unchanged.
pub fn deduplicate_labels(names: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = names.iter().cloned().collect();
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());

    names
        .into_iter()
        .map(|name| {
            if seen.insert(name.clone()) {
                return name;
            }
            let unique = (1..)
                .map(|k| format!("{name}_{k}"))
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or_default();
            taken.insert(unique.clone());
            seen.insert(unique.clone());
            unique
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_and_slashes() {
        assert_eq!(normalize_label("Adj Close"), "Adj_Close");
        assert_eq!(normalize_label("a/b\\c"), "a_b_c");
        assert_eq!(normalize_label("tab\there"), "tab_here");
    }

    #[test]
    fn test_collapse_and_strip() {
        assert_eq!(normalize_label("__a   b__"), "a_b");
        assert_eq!(normalize_label(" / "), "");
    }

    #[test]
    fn test_composite_label() {
        assert_eq!(normalize_composite(&["Close", "^GSPC"]), "Close_^GSPC");
        assert_eq!(normalize_composite(&["Adj Close", "", "SPY"]), "Adj_Close_SPY");
    }

    #[test]
    fn test_idempotent_on_examples() {
        for label in ["Adj Close", " x / y ", "__Volume__", "a  b", "Close_^GSPC"] {
            let once = normalize_label(label);
            assert_eq!(normalize_label(&once), once);
        }
    }

    #[test]
    fn test_deduplicate_labels() {
        let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(
            deduplicate_labels(names(&["Adj_Close", "Adj_Close", "Adj_Close"])),
            names(&["Adj_Close", "Adj_Close_1", "Adj_Close_2"])
        );
        // a suffix already used by a real column is skipped
        assert_eq!(
            deduplicate_labels(names(&["x", "x", "x_1"])),
            names(&["x", "x_2", "x_1"])
        );
        assert_eq!(deduplicate_labels(names(&["a", "b"])), names(&["a", "b"]));
    }
}
