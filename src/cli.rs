//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the link tree manager.
#[derive(Parser, Debug)]
#[command(
    name = "linkpack",
    about = "Resolve a declarative package configuration into a tree of symlinks",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Configuration file (TOML, or YAML for .yml/.yaml)
    #[arg(short, long, global = true, default_value = "linkpack.toml")]
    pub config: PathBuf,

    /// Destination root used when the configuration declares no baseDir
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Directory holding the packages (defaults to the configuration's directory)
    #[arg(long, global = true)]
    pub source: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved link tree
    Show(ShowOpts),
    /// Report the state of every link
    Check(CheckOpts),
    /// Create the links described by the configuration
    Install(InstallOpts),
    /// Write a starter configuration listing the source directory
    Init(InitOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name, used for the log file name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Show(_) => "show",
            Self::Check(_) => "check",
            Self::Install(_) => "install",
            Self::Init(_) => "init",
            Self::Version => "version",
        }
    }
}

/// Options for the `show` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct ShowOpts {
    /// Emit the tree as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for the `check` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct CheckOpts {}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct InstallOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,
}

/// Options for the `init` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct InitOpts {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,
}
