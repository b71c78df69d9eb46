//! CLI command definitions
//!
//! Defines the clap arguments and commands for the checker.

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Options shared by every command
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Base URL of the service under test (overrides [host] apihost)
    #[arg(long, env = "OPENTREE_APIHOST", global = true)]
    pub host: Option<String>,

    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print each step as it runs
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute test scenarios defined in YAML files
    Run {
        /// Paths to YAML scenario files
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List the built-in scenarios
    List,
}
