//! Report formatting and printing utilities.
//!
//! Results go to stdout, warnings and notes to stderr. Kept out of the core
//! so ngxtract can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, ExtractSummary, InitSummary};
use crate::core::{
    Stats,
    pipeline::LocaleOutcome,
    store::StoreStatus,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Extract(summary) => {
            print_match_note_to(summary, verbose, &mut io::stderr().lock());
            print_store_warnings_to(summary, verbose, &mut io::stderr().lock());
            print_unreadable_warning_to(summary, verbose, &mut io::stderr().lock());
            print_extract_to(summary, &mut io::stdout().lock());
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Print per-locale statistics followed by a one-line summary.
pub fn print_extract_to<W: Write>(summary: &ExtractSummary, writer: &mut W) {
    for outcome in &summary.locales {
        print_locale(outcome, summary.is_dry_run, writer);
    }

    let mut totals = Stats::default();
    for outcome in &summary.locales {
        totals += outcome.stats;
    }

    let files_msg = format!(
        "{} {} from {} source {} into {} locale {}",
        summary.key_count,
        plural(summary.key_count, "key", "keys"),
        summary.source_files,
        plural(summary.source_files, "file", "files"),
        summary.locales.len(),
        plural(summary.locales.len(), "file", "files"),
    );

    let changed = summary.changed_count();
    let msg = if summary.is_dry_run && changed > 0 {
        format!(
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "{} locale {} out of date (dry run, {} new / {} deleted)",
                changed,
                plural(changed, "file", "files"),
                totals.new,
                totals.deleted
            )
            .red()
        )
    } else if summary.is_dry_run {
        format!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Checked {} - up to date", files_msg).green()
        )
    } else {
        format!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Extracted {}", files_msg).green()
        )
    };
    let _ = writeln!(writer, "{}", msg);
}

fn print_locale<W: Write>(outcome: &LocaleOutcome, is_dry_run: bool, writer: &mut W) {
    let stats = &outcome.stats;
    let _ = writeln!(writer, "{}", stats.summary_line(&outcome.locale).bold());
    let _ = writeln!(writer, "{}", stats.empty_line(&outcome.locale).dimmed());

    let state = if outcome.written {
        "written".green()
    } else if is_dry_run && outcome.changed {
        "would be written".yellow()
    } else {
        "unchanged".dimmed()
    };
    let _ = writeln!(
        writer,
        "  {} {} ({})",
        "-->".blue(),
        outcome.path.display(),
        state
    );
}

/// Note how many pattern matches produced the extracted keys.
pub fn print_match_note_to<W: Write>(summary: &ExtractSummary, verbose: bool, writer: &mut W) {
    if verbose {
        let _ = writeln!(
            writer,
            "{} {} {} in {} source {}",
            "note:".bold(),
            summary.match_count,
            plural(summary.match_count, "match", "matches"),
            summary.source_files,
            plural(summary.source_files, "file", "files"),
        );
    }
}

/// Warn about locale files that exist but could not be used, and about keys
/// a namespace dictionary cannot hold.
///
/// Missing files are expected on a first run and only noted in verbose mode.
pub fn print_store_warnings_to<W: Write>(summary: &ExtractSummary, verbose: bool, writer: &mut W) {
    for outcome in &summary.locales {
        for key in &outcome.shadowed {
            let _ = writeln!(
                writer,
                "{} {}: key '{}' is left out because other keys are nested under it",
                "warning:".bold().yellow(),
                outcome.path.display(),
                key
            );
        }

        match &outcome.store_status {
            StoreStatus::Invalid(reason) => {
                let _ = writeln!(
                    writer,
                    "{} {} could not be loaded, treating it as empty: {}",
                    "warning:".bold().yellow(),
                    outcome.path.display(),
                    reason
                );
            }
            StoreStatus::Missing if verbose => {
                let _ = writeln!(
                    writer,
                    "{} {} does not exist yet",
                    "note:".bold(),
                    outcome.path.display()
                );
            }
            _ => {}
        }
    }
}

/// Warn about source files that could not be read.
pub fn print_unreadable_warning_to<W: Write>(
    summary: &ExtractSummary,
    verbose: bool,
    writer: &mut W,
) {
    if summary.unreadable.is_empty() {
        return;
    }

    if verbose {
        for file in &summary.unreadable {
            let _ = writeln!(
                writer,
                "{} Cannot read {}: {}",
                "warning:".bold().yellow(),
                file.path.display(),
                file.error
            );
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            summary.unreadable.len(),
            "-v".cyan()
        );
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", summary.path.display()).green()
        );
    } else {
        eprintln!(
            "{} {}",
            FAILURE_MARK.red(),
            format!("{} already exists", summary.path.display()).red()
        );
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
