//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{PlanCommand, RunCommand, ValidateCommand};

/// Commit-message-driven CI dispatcher
#[derive(Debug, Parser, Clone)]
#[command(name = "ci-dispatch")]
#[command(version = "0.1.0")]
#[command(about = "Routes commit messages to component builds", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Resolve the commit and execute the stage plan
    Run(RunCommand),

    /// Resolve the commit and print the plan without executing
    Plan(PlanCommand),

    /// Validate the alias map files
    Validate(ValidateCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["ci-dispatch", "run"]).expect("should parse");
        match cli.command {
            Command::Run(cmd) => {
                assert_eq!(cmd.maps.components.to_str(), Some("ci/components.map"));
                assert_eq!(cmd.maps.stages.to_str(), Some("ci/stages.map"));
                assert_eq!(cmd.root.to_str(), Some("."));
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_plan_with_message() {
        let cli = Cli::try_parse_from([
            "ci-dispatch",
            "plan",
            "--message",
            "cpu: run lint",
            "--json",
        ])
        .expect("should parse");
        match cli.command {
            Command::Plan(cmd) => {
                assert_eq!(cmd.commit.message.as_deref(), Some("cpu: run lint"));
                assert!(cmd.json);
            }
            _ => panic!("expected plan command"),
        }
    }
}
