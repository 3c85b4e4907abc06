//! Reconciliation of freshly extracted keys with a persisted dictionary.
//!
//! Two shapes are supported, selected by [`MergeOptions::namespace`]:
//!
//! - **Flat**: the dictionary is a single-level object keyed by the full
//!   translation key. A persisted nested file is flattened before merging.
//! - **Namespace**: the dictionary mirrors the dotted structure of the keys
//!   (see [`super::namespace`]). Persisted leaves without a counterpart in the
//!   extracted tree are dropped.
//!
//! In both shapes a persisted value always wins over the extracted default,
//! and `""` values are then filled according to the locale policy. A
//! persisted `null` is kept as written.

use serde_json::{Map, Value};

use super::{
    extract::Extracted,
    namespace::{fill_empty_with_null, fill_empty_with_path, flatten, get_nested, nest},
    stats::Stats,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Empty entries of the default locale are filled with their own key.
    pub is_default_locale: bool,
    /// Keep persisted keys that were not extracted (flat shape only).
    pub safe_mode: bool,
    /// Write `null` instead of `""` for empty entries of other locales.
    pub null_on_empty: bool,
    /// Nest dotted keys into objects.
    pub namespace: bool,
}

/// Output of [`reconcile`]: the dictionary to persist and what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub dictionary: Map<String, Value>,
    pub stats: Stats,
    /// Extracted keys missing from a namespace dictionary because other keys
    /// nest under them.
    pub shadowed: Vec<String>,
}

/// Only `""` is rewritten by the empty-value policy.
pub fn is_blank(value: &Value) -> bool {
    value.as_str() == Some("")
}

/// An entry counts as untranslated when it is `""` or `null`.
pub fn is_empty_entry(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Merge `extracted` keys with the `persisted` dictionary of one locale.
///
/// An absent or unreadable store should be passed as an empty map; every
/// extracted key then counts as new.
pub fn reconcile(
    extracted: &Extracted,
    persisted: &Map<String, Value>,
    options: &MergeOptions,
) -> Reconciled {
    if options.namespace {
        reconcile_nested(extracted, persisted, options)
    } else {
        reconcile_flat(extracted, persisted, options)
    }
}

fn reconcile_flat(
    extracted: &Extracted,
    persisted: &Map<String, Value>,
    options: &MergeOptions,
) -> Reconciled {
    let persisted = flatten(persisted);
    let mut stats = Stats {
        total: extracted.len(),
        ..Default::default()
    };
    let mut merged = Map::new();

    for (key, default_value) in extracted {
        let value = match persisted.get(key) {
            Some(existing) => {
                stats.updated += 1;
                existing.clone()
            }
            None => {
                stats.new += 1;
                Value::String(default_value.clone())
            }
        };
        if is_empty_entry(&value) {
            stats.empty += 1;
        }
        merged.insert(key.clone(), apply_empty_policy(key, value, options));
    }

    for (key, value) in &persisted {
        if extracted.contains_key(key) {
            continue;
        }
        stats.deleted += 1;
        if options.safe_mode {
            merged.insert(key.clone(), value.clone());
        }
    }

    if options.safe_mode {
        merged.sort_keys();
    }

    Reconciled {
        dictionary: merged,
        stats,
        shadowed: Vec::new(),
    }
}

fn apply_empty_policy(key: &str, value: Value, options: &MergeOptions) -> Value {
    if !is_blank(&value) {
        value
    } else if options.is_default_locale {
        Value::String(key.to_string())
    } else if options.null_on_empty {
        Value::Null
    } else {
        Value::String(String::new())
    }
}

fn reconcile_nested(
    extracted: &Extracted,
    persisted: &Map<String, Value>,
    options: &MergeOptions,
) -> Reconciled {
    let nested = nest(extracted);
    let persisted_paths = flatten(persisted);

    let mut stats = Stats {
        total: extracted.len(),
        ..Default::default()
    };
    for key in extracted.keys() {
        if persisted_paths.contains_key(key) {
            stats.updated += 1;
        } else {
            stats.new += 1;
        }
    }
    stats.deleted = persisted_paths
        .keys()
        .filter(|key| !extracted.contains_key(*key))
        .count();

    let mut path = Vec::new();
    let mut dictionary = overlay(&nested.tree, persisted, &mut path);
    stats.empty = flatten(&dictionary)
        .values()
        .filter(|value| is_empty_entry(value))
        .count();

    if options.is_default_locale {
        fill_empty_with_path(&mut dictionary);
    } else if options.null_on_empty {
        fill_empty_with_null(&mut dictionary);
    }

    Reconciled {
        dictionary,
        stats,
        shadowed: nested.shadowed,
    }
}

/// Copy the template tree, taking each leaf from `persisted` when it exists
/// and leaving it empty otherwise.
fn overlay<'t>(
    template: &'t Map<String, Value>,
    persisted: &Map<String, Value>,
    path: &mut Vec<&'t str>,
) -> Map<String, Value> {
    let mut result = Map::new();
    for (key, value) in template {
        path.push(key);
        let merged = match value {
            Value::Object(branch) => Value::Object(overlay(branch, persisted, path)),
            _ => lookup_leaf(persisted, path)
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
        };
        path.pop();
        result.insert(key.clone(), merged);
    }
    result
}

/// Find a persisted leaf by nested path, falling back to a flat dotted key so
/// that a dictionary written in flat mode still feeds namespace mode.
fn lookup_leaf<'p>(persisted: &'p Map<String, Value>, path: &[&str]) -> Option<&'p Value> {
    get_nested(persisted, path)
        .filter(|v| !v.is_object())
        .or_else(|| persisted.get(&path.join(".")).filter(|v| !v.is_object()))
}
