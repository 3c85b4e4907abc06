use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{CatalogOptions, MergeOptions};

pub const CONFIG_FILE_NAME: &str = ".ngxtractrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_start_delimiter")]
    pub start_delimiter: String,
    #[serde(default = "default_end_delimiter")]
    pub end_delimiter: String,
    #[serde(default = "default_locale", alias = "defaultLang")]
    pub default_locale: String,
    #[serde(default, alias = "lang")]
    pub locales: Vec<String>,
    #[serde(default = "default_filter_name", alias = "customTranslateMatch")]
    pub filter_name: String,
    #[serde(default)]
    pub custom_patterns: BTreeMap<String, String>,
    #[serde(default)]
    pub safe_mode: bool,
    #[serde(default)]
    pub null_on_empty: bool,
    #[serde(default)]
    pub namespace: bool,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_dest")]
    pub dest: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

fn default_start_delimiter() -> String {
    "{{".to_string()
}

fn default_end_delimiter() -> String {
    "}}".to_string()
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_filter_name() -> String {
    "translate".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_extensions() -> Vec<String> {
    ["html", "js", "ts"].map(String::from).to_vec()
}

fn default_dest() -> String {
    "./i18n".to_string()
}

fn default_suffix() -> String {
    ".json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_delimiter: default_start_delimiter(),
            end_delimiter: default_end_delimiter(),
            default_locale: default_locale(),
            locales: Vec::new(),
            filter_name: default_filter_name(),
            custom_patterns: BTreeMap::new(),
            safe_mode: false,
            null_on_empty: false,
            namespace: false,
            source_root: default_source_root(),
            includes: Vec::new(),
            ignores: default_ignores(),
            extensions: default_extensions(),
            dest: default_dest(),
            prefix: String::new(),
            suffix: default_suffix(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if no locale is configured, a delimiter is empty, or
    /// any glob pattern in `ignores` or `includes` is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.locales.is_empty() {
            bail!(
                "No locales configured: set \"locales\" in {} or pass --locale",
                CONFIG_FILE_NAME
            );
        }
        if let Some(locale) = self.locales.iter().find(|l| l.trim().is_empty()) {
            bail!("Invalid locale in 'locales': \"{}\"", locale);
        }
        if self.start_delimiter.is_empty() {
            bail!("'startDelimiter' must not be empty");
        }
        if self.end_delimiter.is_empty() {
            bail!("'endDelimiter' must not be empty");
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Only entries with wildcards are globs; the rest are literal paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        Ok(())
    }

    pub fn catalog_options(&self) -> CatalogOptions {
        CatalogOptions {
            start_delimiter: self.start_delimiter.clone(),
            end_delimiter: self.end_delimiter.clone(),
            filter_name: self.filter_name.clone(),
            custom_patterns: self.custom_patterns.clone(),
        }
    }

    pub fn merge_options(&self, locale: &str) -> MergeOptions {
        MergeOptions {
            is_default_locale: locale == self.default_locale,
            safe_mode: self.safe_mode,
            null_on_empty: self.null_on_empty,
            namespace: self.namespace,
        }
    }
}

/// Default config written by `init`, listing the default locale so the file
/// is usable as-is.
pub fn default_config_json() -> Result<String> {
    let mut config = Config::default();
    config.locales = vec![config.default_locale.clone()];
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

/// Load the nearest config file, or defaults when there is none.
///
/// The result is not validated: CLI overrides are applied first, so callers
/// run [`Config::validate`] once those are in place.
pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
