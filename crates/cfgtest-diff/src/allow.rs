//! # Allow-List Filtering
//!
//! A fixed set of known, intentionally-ignorable diff strings. Entries are
//! matched against the full rendered record (`path: reason`), so an entry
//! only ever suppresses the exact difference it names — it can never mask
//! a genuine divergence elsewhere.

use std::collections::BTreeSet;

use crate::diff::Diff;

/// Known, intentionally-ignorable differences.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    entries: BTreeSet<String>,
}

impl AllowList {
    /// An empty allow-list: every difference is real.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a newline-delimited allow-list. Blank lines and lines
    /// starting with `#` are ignored; everything else is taken verbatim
    /// as a full `path: reason` diff string.
    pub fn from_lines(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    /// Add a single entry.
    pub fn insert(&mut self, entry: impl Into<String>) {
        self.entries.insert(entry.into());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the rendered diff string is allow-listed.
    pub fn contains(&self, rendered: &str) -> bool {
        self.entries.contains(rendered)
    }

    /// Split diffs into `(real, allowed)`, preserving order within each.
    /// `real` decides pass/fail; `allowed` is informational only.
    pub fn partition(&self, diffs: Vec<Diff>) -> (Vec<Diff>, Vec<Diff>) {
        diffs
            .into_iter()
            .partition(|d| !self.contains(&d.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::deep_diff;
    use serde_json::json;

    #[test]
    fn test_empty_allow_list_keeps_everything() {
        let diffs = deep_diff(&json!({"a": 1}), &json!({"a": 2}));
        let (real, allowed) = AllowList::new().partition(diffs);
        assert_eq!(real.len(), 1);
        assert!(allowed.is_empty());
    }

    #[test]
    fn test_allow_listed_entry_is_separated() {
        let mut allow = AllowList::new();
        allow.insert("$.mode: extra in candidate (not in reference)");

        let diffs = deep_diff(&json!({"a": 1, "mode": "x"}), &json!({"a": 1}));
        let (real, allowed) = allow.partition(diffs);
        assert!(real.is_empty());
        assert_eq!(
            allowed[0].to_string(),
            "$.mode: extra in candidate (not in reference)"
        );
    }

    #[test]
    fn test_allow_list_never_masks_other_diffs() {
        let mut allow = AllowList::new();
        allow.insert("$.mode: extra in candidate (not in reference)");

        let diffs = deep_diff(&json!({"a": 1, "mode": "x"}), &json!({"a": 2}));
        let (real, allowed) = allow.partition(diffs);
        assert_eq!(real.len(), 1);
        assert_eq!(real[0].to_string(), "$.a: 1 !== 2");
        assert_eq!(allowed.len(), 1);
    }

    #[test]
    fn test_entry_matches_full_string_not_prefix() {
        let mut allow = AllowList::new();
        allow.insert("$.a");

        let diffs = deep_diff(&json!({"a": 1}), &json!({"a": 2}));
        let (real, allowed) = allow.partition(diffs);
        assert_eq!(real.len(), 1);
        assert!(allowed.is_empty());
    }

    #[test]
    fn test_from_lines_skips_blanks_and_comments() {
        let allow = AllowList::from_lines(
            "# known normalizations\n\n$.mode: extra in candidate (not in reference)\n",
        );
        assert_eq!(allow.len(), 1);
        assert!(allow.contains("$.mode: extra in candidate (not in reference)"));
    }

    #[test]
    fn test_partition_preserves_order() {
        let mut allow = AllowList::new();
        allow.insert("$.b: missing in candidate");

        let diffs = deep_diff(
            &json!({"a": 1, "c": 3}),
            &json!({"a": 2, "b": 2, "c": 4}),
        );
        let (real, _) = allow.partition(diffs);
        let rendered: Vec<String> = real.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["$.a: 1 !== 2", "$.c: 3 !== 4"]);
    }
}
