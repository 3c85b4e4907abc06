//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract translation keys from sources and update locale files
//! - `init`: Initialize ngxtract configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root; the config file is searched from here (default: current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Locale to update (overrides config file)
    /// Can be specified multiple times: --locale en-US --locale fr-FR
    #[arg(long = "locale", value_name = "LOCALE")]
    pub locales: Vec<String>,

    /// Locale whose empty entries are filled with their own key (overrides config file)
    #[arg(long)]
    pub default_locale: Option<String>,

    /// Directory of the locale files (overrides config file)
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Keep keys that are no longer found in the sources
    #[arg(long)]
    pub safe_mode: bool,

    /// Write null instead of "" for untranslated entries
    #[arg(long)]
    pub null_on_empty: bool,

    /// Nest dotted keys into JSON objects
    #[arg(long)]
    pub namespace: bool,

    /// Report what would change without writing locale files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translation keys and update locale JSON files
    Extract(ExtractCommand),
    /// Initialize a new .ngxtractrc.json configuration file
    Init,
}
