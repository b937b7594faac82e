use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for stakesync
/// CLI application to reconcile weekly stakeholder clearance exports
#[derive(Parser)]
#[command(
    name = "stakesync",
    version = env!("CARGO_PKG_VERSION"),
    about = "Reconcile weekly stakeholder clearance snapshots against a canonical dataset",
    long_about = None
)]
pub struct Cli {
    /// Override the configuration file path
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Override the data directory (useful for tests or one-off runs)
    #[arg(global = true, long = "data-dir")]
    pub data_dir: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the data directory tree
    Init {
        #[arg(
            long = "profile",
            value_enum,
            default_value_t = ProfileArg::Legacy,
            help = "Field profile: legacy (name/company) or extended (case tracking)"
        )]
        profile: ProfileArg,
    },

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check the field profile for inconsistencies")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Clean the newest raw weekly export into the staging area
    Clean {
        #[arg(long = "input", help = "Raw CSV file (default: newest file in raw/)")]
        input: Option<String>,

        #[arg(long = "dry-run", help = "Compute everything, write nothing")]
        dry_run: bool,
    },

    /// Clean the newest export and reconcile it with the canonical dataset
    Run {
        #[arg(long = "input", help = "Raw CSV file (default: newest file in raw/)")]
        input: Option<String>,

        #[arg(
            long = "auto-update",
            help = "Apply every live change directly instead of waiting for approval"
        )]
        auto_update: bool,

        #[arg(long = "dry-run", help = "Compute everything, write nothing")]
        dry_run: bool,
    },

    /// Compare two CSV snapshots
    Diff {
        #[arg(long = "old", help = "Older snapshot")]
        old: String,

        #[arg(long = "new", help = "Newer snapshot")]
        new: String,

        #[arg(long = "tag", default_value = "weekly_vs_live", help = "Tag of long rows")]
        tag: String,

        #[arg(long = "wide", help = "Write the wide diff to this file")]
        wide: Option<String>,

        #[arg(long = "long", help = "Write the long diff to this file")]
        long: Option<String>,

        #[arg(long = "format", value_enum, default_value_t = DiffFormat::Csv)]
        format: DiffFormat,
    },

    /// Review the latest wide diff and merge approved rows
    Approve {
        #[arg(long = "file", help = "Wide diff file (default: newest in diffs/wide)")]
        file: Option<String>,

        #[arg(long = "dry-run", help = "Review and merge in memory, write nothing")]
        dry_run: bool,
    },

    /// Backup the canonical dataset to a file
    Backup {
        #[arg(long = "file", help = "Destination file")]
        file: String,

        #[arg(long = "compress", help = "Compress the backup (.zip)")]
        compress: bool,
    },

    /// Print the approval log
    Log {
        #[arg(long = "print", help = "Print the entries of the approval log")]
        print: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    Legacy,
    Extended,
}

impl ProfileArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileArg::Legacy => "legacy",
            ProfileArg::Extended => "extended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiffFormat {
    Csv,
    Json,
}
