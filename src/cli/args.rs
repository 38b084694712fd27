//! CLI argument definitions using clap
//!
//! clap only handles the global flags. The command path after them is resolved by the
//! command tree so that groups can print their own contextual help.

use std::path::PathBuf;

use clap::{Parser, ValueHint};

/// Command-line client for the DigitalOcean v1 API
#[derive(Parser, Debug)]
#[command(name = "faucet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Debug level: -d info, -d -d debug, -d -d -d trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file (default: ./faucet.json or ./faucet.toml)
    #[arg(short, long, env = "FAUCET_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Command path and its arguments, e.g. `droplets show 42`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}
