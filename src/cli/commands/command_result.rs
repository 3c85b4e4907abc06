use std::path::PathBuf;

use crate::cli::exit_status::ExitStatus;
use crate::core::pipeline::{LocaleOutcome, UnreadableFile};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    /// Source files that were read and matched.
    pub source_files: usize,
    pub match_count: usize,
    /// Distinct keys after folding all files.
    pub key_count: usize,
    pub locales: Vec<LocaleOutcome>,
    pub unreadable: Vec<UnreadableFile>,
    pub is_dry_run: bool,
}

impl ExtractSummary {
    /// Locale files whose content differs from the merged dictionary.
    pub fn changed_count(&self) -> usize {
        self.locales.iter().filter(|l| l.changed).count()
    }
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    /// False if the file already existed and was left untouched.
    pub created: bool,
}

/// Result of running ngxtract commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
}

impl CommandResult {
    /// - `Failure` when `init` found an existing file, or a dry run found
    ///   locale files that would change.
    /// - `Success` otherwise.
    pub fn exit_status(&self) -> ExitStatus {
        match &self.summary {
            CommandSummary::Extract(summary) if summary.is_dry_run && summary.changed_count() > 0 => {
                ExitStatus::Failure
            }
            CommandSummary::Init(summary) if !summary.created => ExitStatus::Failure,
            _ => ExitStatus::Success,
        }
    }
}
