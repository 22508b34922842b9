//! Command-line surface
//!
//! `bump` and `compare` are available at the top level and, as in earlier
//! releases, under the `semver` group.

pub mod orchestration;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "wellcharted",
    version,
    about = "Bump and verify Helm chart semantic versions"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Log more detail to stderr (-v info, -vv debug)"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Bumps a chart's semantic version
    Bump(BumpArgs),

    /// Compares a chart's semantic version against the reference branch
    Compare(CompareArgs),

    /// Semantic version commands
    Semver {
        #[command(subcommand)]
        command: SemverCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum SemverCommand {
    /// Bumps a chart's semantic version
    Bump(BumpArgs),

    /// Compares a chart's semantic version against the reference branch
    Compare(CompareArgs),
}

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct BumpArgs {
    #[arg(help = "Chart directory")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct CompareArgs {
    #[arg(
        short,
        long,
        help = "Revision to compare against (default: refs/remotes/origin/master)"
    )]
    pub reference: Option<String>,

    #[arg(help = "Chart directory")]
    pub path: PathBuf,
}

/// A command with the `semver` grouping flattened away
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Bump(BumpArgs),
    Compare(CompareArgs),
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        match command {
            Command::Bump(args) | Command::Semver {
                command: SemverCommand::Bump(args),
            } => Action::Bump(args),
            Command::Compare(args) | Command::Semver {
                command: SemverCommand::Compare(args),
            } => Action::Compare(args),
        }
    }
}
