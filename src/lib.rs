//! faucet: command-line client for the DigitalOcean v1 API
//!
//! Layers, innermost first: `domain` (command tree, envelope, resources),
//! `infrastructure` (RPC client, I/O adapters, DI), `application` (endpoint services),
//! `cli` (argument parsing, command catalog, output).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
