//! Reading and writing locale dictionary files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};

/// Indentation used for written dictionaries.
const INDENT: &[u8] = b"    ";

/// Why a persisted dictionary was treated as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreStatus {
    Loaded,
    Missing,
    /// The file exists but could not be read or is not a JSON object.
    Invalid(String),
}

/// A persisted dictionary as seen at the start of a run.
#[derive(Debug, Clone)]
pub struct LoadedDictionary {
    pub entries: Map<String, Value>,
    pub status: StoreStatus,
}

/// Location of a locale file: `<dest>/<prefix><locale><suffix>`.
pub fn dictionary_path(dest: &Path, prefix: &str, locale: &str, suffix: &str) -> PathBuf {
    dest.join(format!("{}{}{}", prefix, locale, suffix))
}

/// Load a persisted dictionary.
///
/// Never fails: a missing, unreadable or malformed file yields an empty map,
/// with the reason recorded in [`LoadedDictionary::status`].
pub fn load_dictionary(path: &Path) -> LoadedDictionary {
    let empty = |status| LoadedDictionary {
        entries: Map::new(),
        status,
    };

    if !path.exists() {
        return empty(StoreStatus::Missing);
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return empty(StoreStatus::Invalid(e.to_string())),
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(entries)) => LoadedDictionary {
            entries,
            status: StoreStatus::Loaded,
        },
        Ok(_) => empty(StoreStatus::Invalid(
            "root of JSON file must be an object".to_string(),
        )),
        Err(e) => empty(StoreStatus::Invalid(e.to_string())),
    }
}

/// Serialize a dictionary with 4-space indentation, sorted keys and a
/// trailing newline.
pub fn to_json_string(dictionary: &Map<String, Value>) -> Result<String> {
    let mut sorted = Value::Object(dictionary.clone());
    sort_recursive(&mut sorted);

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    sorted
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;
    buf.push(b'\n');

    String::from_utf8(buf).context("Serialized JSON is not valid UTF-8")
}

/// Write a dictionary, creating parent directories as needed.
pub fn save_dictionary(path: &Path, dictionary: &Map<String, Value>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = to_json_string(dictionary)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

fn sort_recursive(value: &mut Value) {
    if let Value::Object(map) = value {
        map.sort_keys();
        for child in map.values_mut() {
            sort_recursive(child);
        }
    }
}
