//! Extraction engine: runs the pattern catalog over raw content.

use std::collections::BTreeMap;

use regex::Captures;

use super::{
    error::ExtractError,
    patterns::{CatalogOptions, Pattern, PatternCatalog, PatternKind},
    plural::{parse_string_array, plural_default},
};

/// Keys found by one or more extraction passes, mapped to their default text.
///
/// Sorted so that output and stats do not depend on pattern or file order.
pub type Extracted = BTreeMap<String, String>;

/// A single key recovered from content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatch<'a> {
    /// Name of the catalog pattern that produced the match.
    pub pattern: &'a str,
    pub key: String,
    /// Default text, only set by the plural patterns.
    pub default_value: String,
}

pub struct Extractor {
    catalog: PatternCatalog,
}

impl Extractor {
    pub fn new(catalog: PatternCatalog) -> Self {
        Self { catalog }
    }

    pub fn from_options(options: &CatalogOptions) -> Result<Self, ExtractError> {
        Ok(Self::new(PatternCatalog::new(options)?))
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Lazily yield every key match in `content`, pattern by pattern in
    /// catalog order.
    pub fn matches<'a>(&'a self, content: &'a str) -> impl Iterator<Item = KeyMatch<'a>> + 'a {
        self.catalog.iter().flat_map(move |pattern| {
            pattern
                .regex
                .captures_iter(content)
                .filter_map(move |caps| resolve(pattern, &caps))
        })
    }

    /// Extract keys from `content` into `results`.
    ///
    /// Later matches overwrite earlier ones for the same key. Returns the
    /// number of matches recorded.
    pub fn extract_into(&self, content: &str, results: &mut Extracted) -> usize {
        let mut count = 0;
        for m in self.matches(content) {
            results.insert(m.key, m.default_value);
            count += 1;
        }
        count
    }

    pub fn extract(&self, content: &str) -> Extracted {
        let mut results = Extracted::new();
        self.extract_into(content, &mut results);
        results
    }
}

fn resolve<'a>(pattern: &'a Pattern, caps: &Captures<'_>) -> Option<KeyMatch<'a>> {
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    let (raw_key, default_value) = match pattern.kind {
        PatternKind::Default => (group(1), String::new()),
        PatternKind::PluralLast => (group(1), plural_value(group(2))),
        PatternKind::PluralFirst => (group(2), plural_value(group(1))),
    };

    let key = raw_key.trim();
    if key.is_empty() {
        return None;
    }

    Some(KeyMatch {
        pattern: &pattern.name,
        key: pattern.unescape.apply(key),
        default_value,
    })
}

/// A literal the parser rejects means "no plural value", not an error.
fn plural_value(literal: &str) -> String {
    parse_string_array(literal)
        .ok()
        .and_then(|elements| plural_default(&elements))
        .unwrap_or_default()
}
