//! Pattern catalog: the named regular expressions used to find translation keys.
//!
//! The catalog is built once per run from the interpolation delimiters, the
//! filter/directive name and any custom patterns. Order matters: when two
//! patterns yield the same key, the one applied later wins, so plural patterns
//! come after the standalone directive pattern they overlap with.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};

use super::error::ExtractError;

/// Prefix given to custom pattern names inside the catalog.
pub const CUSTOM_PATTERN_PREFIX: &str = "others_";

/// Key capture for single-quoted strings: any escape sequence or a non-quote char.
const KEY_SINGLE: &str = r"((?:\\.|[^'\\])*)";
/// Key capture for double-quoted strings.
const KEY_DOUBLE: &str = r#"((?:\\.|[^"\\])*)"#;

/// How the captures of a pattern are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Group 1 is the key, anything else is ignored.
    Default,
    /// Group 1 is the key, group 2 the plural literal.
    PluralLast,
    /// Group 1 is the plural literal, group 2 the key.
    PluralFirst,
}

/// Which quote escape is undone on the extracted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unescape {
    /// `\'` becomes `'`.
    SingleQuote,
    /// `\"` becomes `"`.
    DoubleQuote,
    Verbatim,
}

impl Unescape {
    pub fn apply(self, key: &str) -> String {
        match self {
            Unescape::SingleQuote => key.replace("\\'", "'"),
            Unescape::DoubleQuote => key.replace("\\\"", "\""),
            Unescape::Verbatim => key.to_string(),
        }
    }
}

/// A compiled, named extraction pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub name: String,
    pub kind: PatternKind,
    pub unescape: Unescape,
    pub regex: Regex,
}

/// Inputs that shape the catalog.
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub start_delimiter: String,
    pub end_delimiter: String,
    /// Name of the filter, directive and `$filter` argument (usually `translate`).
    pub filter_name: String,
    /// Extra patterns by name. Each must capture the key in group 1.
    pub custom_patterns: BTreeMap<String, String>,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            start_delimiter: "{{".to_string(),
            end_delimiter: "}}".to_string(),
            filter_name: "translate".to_string(),
            custom_patterns: BTreeMap::new(),
        }
    }
}

/// Ordered set of extraction patterns.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    patterns: Vec<Pattern>,
}

impl PatternCatalog {
    /// Build the catalog.
    ///
    /// Delimiters and the filter name are regex-escaped before being spliced
    /// into the built-in sources. Custom patterns are compiled as given and
    /// appended after the built-ins under the name `others_<name>`.
    pub fn new(options: &CatalogOptions) -> Result<Self, ExtractError> {
        if options.start_delimiter.is_empty() {
            return Err(ExtractError::EmptyDelimiter { which: "start" });
        }
        if options.end_delimiter.is_empty() {
            return Err(ExtractError::EmptyDelimiter { which: "end" });
        }

        let start = regex::escape(&options.start_delimiter);
        let end = regex::escape(&options.end_delimiter);
        let filter = regex::escape(&options.filter_name);

        use PatternKind::{Default as Plain, PluralFirst, PluralLast};
        use Unescape::{DoubleQuote, SingleQuote, Verbatim as Raw};

        let builtins: Vec<(&str, PatternKind, Unescape, String)> = vec![
            (
                "commentSimpleQuote",
                Plain,
                SingleQuote,
                format!(r"/\*\s*i18nextract\s*\*/'{KEY_SINGLE}'"),
            ),
            (
                "commentDoubleQuote",
                Plain,
                DoubleQuote,
                format!(r#"/\*\s*i18nextract\s*\*/"{KEY_DOUBLE}""#),
            ),
            (
                "HtmlFilterSimpleQuote",
                Plain,
                SingleQuote,
                format!(r"{start}\s*'{KEY_SINGLE}'\s*\|\s*{filter}(:.*?)?\s*{end}"),
            ),
            (
                "HtmlFilterDoubleQuote",
                Plain,
                DoubleQuote,
                format!(r#"{start}\s*"{KEY_DOUBLE}"\s*\|\s*{filter}(:.*?)?\s*{end}"#),
            ),
            (
                "HtmlDirective",
                Plain,
                Raw,
                format!(r"<[^>]*{filter}[^{{>]*>([^<]*)</[^>]*>"),
            ),
            (
                "HtmlDirectiveStandalone",
                Plain,
                Raw,
                format!(r#"{filter}="{KEY_DOUBLE}""#),
            ),
            (
                "HtmlDirectivePluralLast",
                PluralLast,
                Raw,
                format!(r#"{filter}="{KEY_DOUBLE}".*angular-plural-extract="{KEY_DOUBLE}""#),
            ),
            (
                "HtmlDirectivePluralFirst",
                PluralFirst,
                Raw,
                format!(r#"angular-plural-extract="{KEY_DOUBLE}".*translate="{KEY_DOUBLE}""#),
            ),
            (
                "HtmlNgBindHtml",
                Plain,
                SingleQuote,
                format!(r#"ng-bind-html="\s*'{KEY_SINGLE}'\s*\|\s*translate(:.*?)?\s*""#),
            ),
            (
                "JavascriptServiceSimpleQuote",
                Plain,
                SingleQuote,
                format!(r"\$translate\(\s*'{KEY_SINGLE}'[^)]*\)"),
            ),
            (
                "JavascriptServiceDoubleQuote",
                Plain,
                DoubleQuote,
                format!(r#"\$translate\(\s*"{KEY_DOUBLE}"[^)]*\)"#),
            ),
            (
                "JavascriptServiceInstantSimpleQuote",
                Plain,
                SingleQuote,
                format!(r"\$translate\.instant\(\s*'{KEY_SINGLE}'[^)]*\)"),
            ),
            (
                "JavascriptServiceInstantDoubleQuote",
                Plain,
                DoubleQuote,
                format!(r#"\$translate\.instant\(\s*"{KEY_DOUBLE}"[^)]*\)"#),
            ),
            (
                "JavascriptFilterSimpleQuote",
                Plain,
                SingleQuote,
                format!(r"\$filter\(\s*'{filter}'\s*\)\s*\(\s*'{KEY_SINGLE}'[^)]*\)"),
            ),
            (
                "JavascriptFilterDoubleQuote",
                Plain,
                DoubleQuote,
                format!(r#"\$filter\(\s*"{filter}"\s*\)\s*\(\s*"{KEY_DOUBLE}"[^)]*\)"#),
            ),
        ];

        let mut patterns = Vec::with_capacity(builtins.len() + options.custom_patterns.len());
        for (name, kind, unescape, source) in builtins {
            patterns.push(Pattern {
                name: name.to_string(),
                kind,
                unescape,
                regex: compile(name, &source)?,
            });
        }

        for (name, source) in &options.custom_patterns {
            let name = format!("{CUSTOM_PATTERN_PREFIX}{name}");
            let regex = compile(&name, source)?;
            // captures_len counts the implicit whole-match group.
            if regex.captures_len() < 2 {
                return Err(ExtractError::MissingKeyGroup { name });
            }
            patterns.push(Pattern {
                name,
                kind: PatternKind::Default,
                unescape: Unescape::Verbatim,
                regex,
            });
        }

        Ok(Self { patterns })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn compile(name: &str, source: &str) -> Result<Regex, ExtractError> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .map_err(|e| ExtractError::InvalidPattern {
            name: name.to_string(),
            source: Box::new(e),
        })
}
