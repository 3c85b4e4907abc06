use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, locale files are up to date
/// - `Failure` (1): Command completed but left work undone (dry run with pending changes,
///   config file already present)
/// - `Error` (2): Command failed (invalid config, broken pattern, IO error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
