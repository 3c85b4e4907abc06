//! Glue between the pure core and the file system: read sources, extract in
//! parallel, then reconcile one locale at a time.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use rayon::prelude::*;

use super::{
    extract::{Extracted, Extractor},
    merge::{MergeOptions, reconcile},
    stats::Stats,
    store::{StoreStatus, dictionary_path, load_dictionary, save_dictionary, to_json_string},
};

/// A source file that could not be read.
#[derive(Debug, Clone)]
pub struct UnreadableFile {
    pub path: PathBuf,
    pub error: String,
}

/// Keys collected from a set of source files.
#[derive(Debug, Default)]
pub struct SourceExtraction {
    pub keys: Extracted,
    pub files_read: usize,
    pub matches: usize,
    pub unreadable: Vec<UnreadableFile>,
}

/// Extract keys from `files`.
///
/// Files are read and matched in parallel, each into its own accumulator.
/// The accumulators are folded in the given order, so when two files
/// disagree on a key's default value the later file wins.
pub fn extract_files(extractor: &Extractor, files: &[PathBuf]) -> SourceExtraction {
    let per_file: Vec<Result<(Extracted, usize), UnreadableFile>> = files
        .par_iter()
        .map(|path| {
            let bytes = fs::read(path).map_err(|e| UnreadableFile {
                path: path.clone(),
                error: e.to_string(),
            })?;
            let content = String::from_utf8_lossy(&bytes);
            let mut keys = Extracted::new();
            let matches = extractor.extract_into(&content, &mut keys);
            Ok((keys, matches))
        })
        .collect();

    let mut result = SourceExtraction::default();
    for outcome in per_file {
        match outcome {
            Ok((keys, matches)) => {
                result.files_read += 1;
                result.matches += matches;
                result.keys.extend(keys);
            }
            Err(unreadable) => result.unreadable.push(unreadable),
        }
    }
    result
}

/// Where and how a locale dictionary is written.
#[derive(Debug, Clone)]
pub struct LocaleTarget<'a> {
    pub dest: &'a Path,
    pub prefix: &'a str,
    pub suffix: &'a str,
    pub locale: &'a str,
    pub options: MergeOptions,
}

/// Result of reconciling one locale.
#[derive(Debug, Clone)]
pub struct LocaleOutcome {
    pub locale: String,
    pub path: PathBuf,
    pub store_status: StoreStatus,
    pub stats: Stats,
    /// Keys left out of a namespace dictionary, see [`super::merge::Reconciled::shadowed`].
    pub shadowed: Vec<String>,
    /// The serialized dictionary differs from what is on disk.
    pub changed: bool,
    /// The file was written during this run.
    pub written: bool,
}

/// Reconcile `keys` with the stored dictionary of one locale and, unless
/// `dry_run`, write the result back.
pub fn update_locale(
    keys: &Extracted,
    target: &LocaleTarget<'_>,
    dry_run: bool,
) -> Result<LocaleOutcome> {
    let path = dictionary_path(target.dest, target.prefix, target.locale, target.suffix);
    let loaded = load_dictionary(&path);
    let reconciled = reconcile(keys, &loaded.entries, &target.options);

    let rendered = to_json_string(&reconciled.dictionary)?;
    let changed = fs::read_to_string(&path).map_or(true, |existing| existing != rendered);

    let written = !dry_run && changed;
    if written {
        save_dictionary(&path, &reconciled.dictionary)?;
    }

    Ok(LocaleOutcome {
        locale: target.locale.to_string(),
        path,
        store_status: loaded.status,
        stats: reconciled.stats,
        shadowed: reconciled.shadowed,
        changed,
        written,
    })
}
