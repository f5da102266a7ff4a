use std::path::PathBuf;

use billbook_core::ResourceKind;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "billbook")]
#[command(about = "Keep utility bills and priced items in sync with a REST backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (e.g. http://localhost:8080)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Collection to work with
    #[arg(long, global = true, value_enum, value_name = "RESOURCE")]
    pub resource: Option<ResourceArg>,

    /// CLI profile name
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Records(RecordCommands),
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Commands that talk to the backend collection.
#[derive(Subcommand)]
pub enum RecordCommands {
    /// List every record
    #[command(alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a record from field=value pairs
    #[command(alias = "new")]
    Add {
        /// Field assignments, e.g. embasa=12.50 coelba=30
        #[arg(value_name = "FIELD=VALUE")]
        assignments: Vec<String>,
    },
    /// Update fields of an existing record
    Edit {
        /// Record ID
        id: String,
        /// Field assignments to override
        #[arg(value_name = "FIELD=VALUE")]
        assignments: Vec<String>,
    },
    /// Look a record up by ID
    Search {
        /// Record ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Record ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Interactive form session
    Shell,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ResourceArg {
    Bills,
    #[value(alias = "itens")]
    Items,
}

impl ResourceArg {
    pub const fn kind(self) -> ResourceKind {
        match self {
            Self::Bills => ResourceKind::Bills,
            Self::Items => ResourceKind::Items,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update a profile from --base-url and --resource
    Init {
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved profile and effective settings
    Show,
}
