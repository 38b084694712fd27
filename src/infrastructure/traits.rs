//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitStatus;

use colored::Colorize;
use reqwest::Url;

/// Boxed cause of a failed HTTP exchange.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Blocking HTTP GET abstraction.
pub trait HttpTransport: Send + Sync {
    /// Perform a GET and return the response body, whatever the HTTP status.
    fn get(&self, url: &Url) -> Result<String, TransportError>;
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command attached to the terminal (inherited stdin/stdout/stderr).
    fn run_interactive(&self, cmd: &str, args: &[&str]) -> io::Result<ExitStatus>;
}

/// Line-based prompt abstraction.
pub trait Prompter: Send + Sync {
    /// Show `prompt` and return the trimmed answer.
    fn ask(&self, prompt: &str) -> io::Result<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real transport backed by a blocking reqwest client.
#[derive(Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &Url) -> Result<String, TransportError> {
        // without_url: the query string carries the api key
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| Box::new(e.without_url()) as TransportError)?;
        response
            .text()
            .map_err(|e| Box::new(e.without_url()) as TransportError)
    }
}

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run_interactive(&self, cmd: &str, args: &[&str]) -> io::Result<ExitStatus> {
        std::process::Command::new(cmd).args(args).status()
    }
}

/// Real prompter reading answers from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{} ", format!("{prompt}:").cyan())?;
        stdout.flush()?;

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no answer for '{prompt}'"),
            ));
        }
        Ok(answer.trim().to_string())
    }
}
