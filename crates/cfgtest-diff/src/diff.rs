//! # Deep Structural Diff
//!
//! Walks `candidate` and `reference` in lockstep and records every
//! divergence. A kind mismatch short-circuits its subtree with a single
//! record; arrays are compared index-by-index up to the longer length;
//! objects over the sorted union of keys from both sides.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value;

/// A single structural difference between two documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    /// `$`-rooted JSON path to the diverging node.
    pub path: String,
    /// One-line reason for the divergence.
    pub reason: String,
}

impl Diff {
    fn new(path: &str, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// The six JSON value kinds, used in kind-mismatch records.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Compare two parsed documents and return every structural difference,
/// in deterministic traversal order (array index order, sorted key order).
///
/// An empty result means the documents are structurally identical.
pub fn deep_diff(candidate: &Value, reference: &Value) -> Vec<Diff> {
    let mut diffs = Vec::new();
    walk(candidate, reference, "$", &mut diffs);
    diffs
}

fn walk(candidate: &Value, reference: &Value, path: &str, diffs: &mut Vec<Diff>) {
    // Differing kinds stop recursion here: reporting every leaf under a
    // mis-typed node would only restate the one mismatch.
    if std::mem::discriminant(candidate) != std::mem::discriminant(reference) {
        diffs.push(Diff::new(
            path,
            format!("type mismatch ({} vs {})", kind(candidate), kind(reference)),
        ));
        return;
    }

    match (candidate, reference) {
        (Value::Array(cand), Value::Array(refr)) => {
            let len = cand.len().max(refr.len());
            for i in 0..len {
                let element_path = format!("{path}[{i}]");
                match (cand.get(i), refr.get(i)) {
                    (Some(c), Some(r)) => walk(c, r, &element_path, diffs),
                    (None, _) => {
                        diffs.push(Diff::new(&element_path, "missing in candidate"));
                    }
                    (Some(_), None) => {
                        diffs.push(Diff::new(
                            &element_path,
                            "extra in candidate (not in reference)",
                        ));
                    }
                }
            }
        }
        (Value::Object(cand), Value::Object(refr)) => {
            let keys: BTreeSet<&str> = cand
                .keys()
                .chain(refr.keys())
                .map(String::as_str)
                .collect();
            for key in keys {
                let member_path = format!("{path}.{key}");
                match (cand.get(key), refr.get(key)) {
                    (Some(c), Some(r)) => walk(c, r, &member_path, diffs),
                    (None, _) => {
                        diffs.push(Diff::new(&member_path, "missing in candidate"));
                    }
                    (Some(_), None) => {
                        diffs.push(Diff::new(
                            &member_path,
                            "extra in candidate (not in reference)",
                        ));
                    }
                }
            }
        }
        _ => {
            // Scalars of the same kind: unequal value is the only divergence.
            if candidate != reference {
                diffs.push(Diff::new(path, format!("{candidate} !== {reference}")));
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9_ ]{0,20}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..6).prop_map(|m| {
                    Value::Object(m.into_iter().collect())
                }),
            ]
        })
    }

    proptest! {
        /// diff(X, X) is always empty.
        #[test]
        fn diff_of_value_with_itself_is_empty(value in json_value()) {
            prop_assert!(deep_diff(&value, &value).is_empty());
        }

        /// Swapping the arguments swaps "extra" and "missing" records at
        /// the same paths.
        #[test]
        fn extra_and_missing_labels_are_symmetric(
            a in json_value(),
            b in json_value(),
        ) {
            let forward = deep_diff(&a, &b);
            let backward = deep_diff(&b, &a);

            let extras: Vec<&str> = forward
                .iter()
                .filter(|d| d.reason.starts_with("extra"))
                .map(|d| d.path.as_str())
                .collect();
            let missing: Vec<&str> = backward
                .iter()
                .filter(|d| d.reason == "missing in candidate")
                .map(|d| d.path.as_str())
                .collect();
            prop_assert_eq!(extras, missing);
        }

        /// Both directions report the same number of differences.
        #[test]
        fn diff_count_is_direction_independent(
            a in json_value(),
            b in json_value(),
        ) {
            prop_assert_eq!(deep_diff(&a, &b).len(), deep_diff(&b, &a).len());
        }
    }
}
