use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::{
    cli::args::{ExtractArgs, ExtractCommand},
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        Extractor,
        pipeline::{LocaleTarget, extract_files, update_locale},
        scanner::{ScanOptions, scan_files},
    },
};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let verbose = args.common.verbose;

    // Priority: CLI --source-root arg > current directory
    let root_dir = args
        .common
        .source_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let config_result = load_config(&root_dir)?;
    if verbose && !config_result.from_file {
        eprintln!(
            "{} No {} found, using default configuration",
            "note:".bold(),
            CONFIG_FILE_NAME
        );
    }

    let mut config = config_result.config;
    apply_overrides(&mut config, &args);
    config.validate()?;

    let extractor = Extractor::from_options(&config.catalog_options())
        .context("Failed to build extraction patterns")?;
    if verbose {
        eprintln!(
            "{} {} extraction patterns",
            "note:".bold(),
            extractor.catalog().len()
        );
    }

    let source_dir = resolve_path(&root_dir, &config.source_root);
    let dest_dir = match &args.dest {
        Some(dest) => resolve_path(&root_dir, dest),
        None => resolve_path(&root_dir, &config.dest),
    };

    let scan_result = scan_files(
        &source_dir,
        &ScanOptions {
            includes: &config.includes,
            ignores: &config.ignores,
            extensions: &config.extensions,
            verbose,
        },
    );
    if scan_result.skipped_count > 0 {
        eprintln!(
            "{} {} path(s) skipped due to access errors{}",
            "warning:".bold().yellow(),
            scan_result.skipped_count,
            if verbose { "" } else { " (use -v for details)" }
        );
    }

    let files: Vec<PathBuf> = scan_result.files.into_iter().collect();
    let extraction = extract_files(&extractor, &files);

    let mut locales = Vec::with_capacity(config.locales.len());
    for locale in unique(&config.locales) {
        let target = LocaleTarget {
            dest: &dest_dir,
            prefix: &config.prefix,
            suffix: &config.suffix,
            locale,
            options: config.merge_options(locale),
        };
        let outcome = update_locale(&extraction.keys, &target, args.dry_run)
            .with_context(|| format!("Failed to update locale '{}'", locale))?;
        locales.push(outcome);
    }

    Ok(CommandResult {
        summary: CommandSummary::Extract(ExtractSummary {
            source_files: extraction.files_read,
            match_count: extraction.matches,
            key_count: extraction.keys.len(),
            locales,
            unreadable: extraction.unreadable,
            is_dry_run: args.dry_run,
        }),
    })
}

/// CLI > config file > defaults. Switches can only be turned on from the CLI.
fn apply_overrides(config: &mut Config, args: &ExtractArgs) {
    if !args.locales.is_empty() {
        config.locales = args.locales.clone();
    }
    if let Some(ref default_locale) = args.default_locale {
        config.default_locale = default_locale.clone();
    }
    config.safe_mode |= args.safe_mode;
    config.null_on_empty |= args.null_on_empty;
    config.namespace |= args.namespace;
}

/// Resolve a configured or `--dest` path against the project root.
fn resolve_path(root_dir: &Path, configured: impl AsRef<Path>) -> PathBuf {
    let p = configured.as_ref();
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(".").unwrap_or(p);
        root_dir.join(rel)
    }
}

/// Locales in configured order, first occurrence wins.
fn unique(locales: &[String]) -> Vec<&str> {
    let mut seen = Vec::new();
    for locale in locales {
        if !seen.contains(&locale.as_str()) {
            seen.push(locale.as_str());
        }
    }
    seen
}
