//! Namespace mode: dot-delimited keys become nested JSON objects.
//!
//! `HOME.TITLE` and `HOME.BODY` end up as `{"HOME": {"TITLE": .., "BODY": ..}}`.
//! A key with an empty segment (`A..B`, `.A`, `A.`) cannot be nested and is
//! kept flat under its literal text.

use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value};

use super::{extract::Extracted, merge::is_blank};

/// Split a dotted key into its segments.
///
/// Returns `None` when any segment is empty, meaning the key stays flat.
pub fn split_segments(key: &str) -> Option<Vec<&str>> {
    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        None
    } else {
        Some(segments)
    }
}

/// A nested tree built from extracted keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Nested {
    pub tree: Map<String, Value>,
    /// Keys left out because other keys use them as a namespace (`a` next
    /// to `a.b`). A JSON object cannot hold both.
    pub shadowed: Vec<String>,
}

/// Build a nested tree from extracted keys, with default values as leaves.
pub fn nest(extracted: &Extracted) -> Nested {
    let branches: HashSet<String> = extracted
        .keys()
        .filter_map(|key| split_segments(key))
        .flat_map(|segments| (1..segments.len()).map(move |i| segments[..i].join(".")))
        .collect();

    let mut nested = Nested::default();
    for (key, default_value) in extracted {
        let value = Value::String(default_value.clone());
        match split_segments(key) {
            Some(_) if branches.contains(key) => nested.shadowed.push(key.clone()),
            Some(segments) => insert_nested(&mut nested.tree, &segments, value),
            None => {
                nested.tree.insert(key.clone(), value);
            }
        }
    }
    nested
}

/// Insert a value at a nested path, creating intermediate objects as needed.
///
/// Sibling branches already present under the same parent are kept. A scalar
/// sitting where an intermediate object is needed is replaced by that object.
pub fn insert_nested(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}
        [leaf] => {
            root.insert(leaf.to_string(), value);
        }
        [head, rest @ ..] => {
            let next = root
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !next.is_object() {
                *next = Value::Object(Map::new());
            }
            if let Value::Object(inner) = next {
                insert_nested(inner, rest, value);
            }
        }
    }
}

/// Look up a value by path segments.
pub fn get_nested<'a>(root: &'a Map<String, Value>, path: &[&str]) -> Option<&'a Value> {
    let (head, rest) = path.split_first()?;
    let value = root.get(*head)?;
    if rest.is_empty() {
        return Some(value);
    }
    match value {
        Value::Object(inner) => get_nested(inner, rest),
        _ => None,
    }
}

/// Flatten nested objects into dot-joined keys.
///
/// Empty objects disappear; every non-object value is a leaf.
pub fn flatten(root: &Map<String, Value>) -> BTreeMap<String, Value> {
    let mut result = BTreeMap::new();
    flatten_into(root, String::new(), &mut result);
    result
}

fn flatten_into(map: &Map<String, Value>, prefix: String, result: &mut BTreeMap<String, Value>) {
    for (key, value) in map {
        let path = join_path(&prefix, key);
        match value {
            Value::Object(inner) => flatten_into(inner, path, result),
            leaf => {
                result.insert(path, leaf.clone());
            }
        }
    }
}

/// Replace every `""` leaf with its dot-joined path from the root.
///
/// This is the default-locale rule: an untranslated entry shows its own key.
pub fn fill_empty_with_path(tree: &mut Map<String, Value>) {
    fill_empty_leaves(tree, "", &|path: &str| Value::String(path.to_string()));
}

/// Replace every `""` leaf with `null`.
pub fn fill_empty_with_null(tree: &mut Map<String, Value>) {
    fill_empty_leaves(tree, "", &|_: &str| Value::Null);
}

fn fill_empty_leaves(tree: &mut Map<String, Value>, prefix: &str, fill: &dyn Fn(&str) -> Value) {
    for (key, value) in tree.iter_mut() {
        let path = join_path(prefix, key);
        match value {
            Value::Object(inner) => fill_empty_leaves(inner, &path, fill),
            leaf if is_blank(leaf) => *leaf = fill(&path),
            _ => {}
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
