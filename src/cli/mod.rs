//! CLI layer: global flags, command catalog and output

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::Cli;
pub use commands::{build_command_tree, execute_command};
pub use error::{CliError, CliResult};
