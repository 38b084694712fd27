//! In-memory fakes for the I/O boundary traits, shared by the integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::{Arc, Mutex};

use reqwest::Url;

use faucet::application::ApplicationError;
use faucet::cli::build_command_tree;
use faucet::config::Settings;
use faucet::domain::{Credentials, Outcome};
use faucet::infrastructure::di::ServiceContainer;
use faucet::infrastructure::traits::{
    CommandRunner, FileSystem, HttpTransport, Prompter, TransportError,
};

pub const PUBLIC_KEY_PATH: &str = "/home/tester/.ssh/id_rsa.pub";

#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Answers GETs from a path → body table and records every URL.
pub struct FakeTransport {
    routes: Mutex<HashMap<String, String>>,
    requests: Mutex<Vec<Url>>,
}

impl FakeTransport {
    /// Unrouted paths answer with a bare `{"status":"OK"}`.
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn route(&self, path: &str, body: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), body.to_string());
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|url| url.path().to_string())
            .collect()
    }

    /// Query parameters of the most recent request.
    pub fn last_query(&self) -> BTreeMap<String, String> {
        let requests = self.requests.lock().unwrap();
        let url = requests.last().expect("no request was made");
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

impl HttpTransport for FakeTransport {
    fn get(&self, url: &Url) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(url.clone());
        let routes = self.routes.lock().unwrap();
        Ok(routes
            .get(url.path())
            .cloned()
            .unwrap_or_else(|| r#"{"status":"OK"}"#.to_string()))
    }
}

#[derive(Default)]
pub struct FakeFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl FakeFileSystem {
    pub fn insert(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
    }
}

impl FileSystem for FakeFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}

/// Records invocations and exits with a configurable code.
#[derive(Default)]
pub struct FakeCommandRunner {
    exit_code: Mutex<i32>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeCommandRunner {
    pub fn exit_with(&self, code: i32) {
        *self.exit_code.lock().unwrap() = code;
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeCommandRunner {
    fn run_interactive(&self, cmd: &str, args: &[&str]) -> io::Result<ExitStatus> {
        self.calls.lock().unwrap().push((
            cmd.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
        ));
        Ok(exit_status(*self.exit_code.lock().unwrap()))
    }
}

/// Replays queued answers; runs dry with `UnexpectedEof`.
#[derive(Default)]
pub struct FakePrompter {
    answers: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl FakePrompter {
    pub fn answer(&self, answers: &[&str]) {
        self.answers
            .lock()
            .unwrap()
            .extend(answers.iter().map(|a| a.to_string()));
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Prompter for FakePrompter {
    fn ask(&self, prompt: &str) -> io::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no answer"))
    }
}

pub fn test_settings() -> Settings {
    Settings {
        client_id: "my-client".to_string(),
        api_key: "my-key".to_string(),
        public_key_path: PathBuf::from(PUBLIC_KEY_PATH),
        ..Settings::default()
    }
}

/// Service container wired to fakes, plus handles to inspect them.
pub struct Harness {
    pub transport: Arc<FakeTransport>,
    pub fs: Arc<FakeFileSystem>,
    pub runner: Arc<FakeCommandRunner>,
    pub prompter: Arc<FakePrompter>,
    pub ctx: Arc<ServiceContainer>,
}

impl Harness {
    pub fn new() -> Self {
        let transport = Arc::new(FakeTransport::new());
        let fs = Arc::new(FakeFileSystem::default());
        let runner = Arc::new(FakeCommandRunner::default());
        let prompter = Arc::new(FakePrompter::default());
        let settings = test_settings();
        let credentials = Credentials::new(&settings.client_id, &settings.api_key);
        let ctx = Arc::new(ServiceContainer::with_deps(
            settings,
            credentials,
            transport.clone(),
            fs.clone(),
            runner.clone(),
            prompter.clone(),
        ));
        Self {
            transport,
            fs,
            runner,
            prompter,
            ctx,
        }
    }

    /// Dispatch `faucet <tokens...>` and return the outcome plus help text written.
    pub fn run(&self, tokens: &[&str]) -> (Result<Outcome, ApplicationError>, String) {
        let tree = build_command_tree(Arc::clone(&self.ctx), "faucet").expect("catalog builds");
        let args: Vec<String> = std::iter::once("faucet")
            .chain(tokens.iter().copied())
            .map(String::from)
            .collect();
        let mut out = Vec::new();
        let result = tree.dispatch(&args, 1, &mut out);
        (result, String::from_utf8(out).expect("utf8 output"))
    }
}
